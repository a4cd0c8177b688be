//! Property-based tests for QASM3 emission.

use proptest::prelude::*;
use spinchain_evolution::{EvolutionSpec, XyzEvolution};
use spinchain_qasm3::emit;

proptest! {
    /// Every instruction becomes exactly one statement after the register.
    #[test]
    fn one_statement_per_instruction(
        n in 1_u32..8,
        steps in 0_u32..4,
        field in 0.0_f64..2.0,
        bound in any::<bool>(),
        three_axis in any::<bool>(),
    ) {
        let coupling = if three_axis { [1.0, 0.5, 0.25] } else { [1.0, 0.0, 0.25] };
        let circuit = XyzEvolution::new(
            EvolutionSpec::new(n)
                .with_coupling(coupling)
                .with_magnetic_field(field)
                .with_final_time(1.0)
                .with_trotter_num(steps)
                .with_bound(bound),
        )
        .unwrap()
        .into_circuit();

        let qasm = emit(&circuit).unwrap();
        let statements = qasm
            .lines()
            .skip_while(|l| !l.starts_with("qubit["))
            .skip(1)
            .filter(|l| !l.is_empty())
            .count();
        prop_assert_eq!(statements, circuit.instructions().count());

        let inputs = qasm.lines().filter(|l| l.starts_with("input angle")).count();
        prop_assert_eq!(inputs, circuit.parameters().len());
    }
}
