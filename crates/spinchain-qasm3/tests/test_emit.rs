//! Tests for QASM3 emission of evolution circuits.

use spinchain_evolution::{EvolutionSpec, XyzEvolution};
use spinchain_ir::{Circuit, ParameterExpression, QubitId};
use spinchain_qasm3::{EmitError, emit};

fn body(qasm: &str) -> Vec<&str> {
    qasm.lines()
        .skip_while(|l| !l.starts_with("qubit["))
        .skip(1)
        .filter(|l| !l.is_empty())
        .collect()
}

#[test]
fn bound_two_site_chain() {
    let circuit = XyzEvolution::new(
        EvolutionSpec::new(2)
            .with_coupling([1.0, 0.0, 1.0])
            .with_final_time(1.0)
            .with_trotter_num(1),
    )
    .unwrap()
    .into_circuit();

    let expected = "\
OPENQASM 3.0;
include \"stdgates.inc\";

gate rxx(theta) a, b { h a; h b; cx a, b; rz(theta) b; cx a, b; h a; h b; }
gate rzz(theta) a, b { cx a, b; rz(theta) b; cx a, b; }
gate uxz(gamma, delta) a, b { rxx(2*gamma) a, b; rzz(2*delta) a, b; }

qubit[2] q;

uxz(1, 1) q[0], q[1];
";
    assert_eq!(emit(&circuit).unwrap(), expected);
}

#[test]
fn field_layers_and_barriers() {
    let circuit = XyzEvolution::new(
        EvolutionSpec::new(3)
            .with_coupling([1.0, 0.0, 1.0])
            .with_magnetic_field(1.0)
            .with_final_time(3.0)
            .with_trotter_num(2),
    )
    .unwrap()
    .into_circuit();

    let qasm = emit(&circuit).unwrap();
    let lines = body(&qasm);
    assert_eq!(
        &lines[..7],
        &[
            "barrier q;",
            "rz(1.5) q[0];",
            "rz(1.5) q[1];",
            "rz(1.5) q[2];",
            "barrier q;",
            "uxz(1.5, 1.5) q[0], q[1];",
            "uxz(1.5, 1.5) q[1], q[2];",
        ]
    );
    assert_eq!(lines.len(), circuit.instructions().count());
    assert!(!qasm.contains("gate uxyz"));
}

#[test]
fn unbound_circuit_declares_inputs() {
    let circuit = XyzEvolution::new(EvolutionSpec::new(3).with_trotter_num(1))
        .unwrap()
        .into_circuit();

    let qasm = emit(&circuit).unwrap();
    let inputs: Vec<_> = qasm.lines().filter(|l| l.starts_with("input ")).collect();
    assert_eq!(
        inputs,
        vec![
            "input angle θ0_0;",
            "input angle θ0_1;",
            "input angle θ0_2;",
            "input angle θ1_0;",
            "input angle θ1_1;",
            "input angle θ1_2;",
        ]
    );
    assert!(qasm.contains("gate ryy(theta) a, b"));
    assert!(qasm.contains("gate uxyz(theta_x, theta_y, theta_z) a, b"));
    assert!(qasm.contains("uxyz(θ1_0, θ1_1, θ1_2) q[1], q[2];"));
}

#[test]
fn decomposed_circuit_uses_pauli_rotations() {
    let circuit = XyzEvolution::new(
        EvolutionSpec::new(2)
            .with_coupling([1.0, 1.0, 1.0])
            .with_final_time(0.5)
            .with_trotter_num(1),
    )
    .unwrap()
    .into_circuit()
    .decompose_propagators()
    .unwrap();

    let qasm = emit(&circuit).unwrap();
    assert!(!qasm.contains("uxyz"));
    assert_eq!(
        body(&qasm),
        vec![
            "rxx(1) q[0], q[1];",
            "ryy(1) q[0], q[1];",
            "rzz(1) q[0], q[1];",
        ]
    );
}

#[test]
fn partial_barrier_lists_qubits() {
    let mut circuit = Circuit::with_size("fence", 3);
    circuit.barrier([QubitId(0), QubitId(2)]).unwrap();
    let qasm = emit(&circuit).unwrap();
    assert!(qasm.contains("barrier q[0], q[2];"));
}

#[test]
fn invalid_names_are_rejected() {
    let mut circuit = Circuit::with_size("bad", 1);
    circuit
        .rz(ParameterExpression::symbol("not valid"), QubitId(0))
        .unwrap();
    assert!(matches!(
        emit(&circuit),
        Err(EmitError::InvalidIdentifier(name)) if name == "not valid"
    ));

    let mut circuit = Circuit::with_size("clash", 1);
    circuit
        .rz(ParameterExpression::symbol("t_0"), QubitId(0))
        .unwrap()
        .rz(ParameterExpression::element("t", 0), QubitId(0))
        .unwrap();
    assert!(matches!(
        emit(&circuit),
        Err(EmitError::IdentifierCollision { .. })
    ));
}

#[test]
fn non_finite_angles_are_rejected() {
    let mut circuit = Circuit::with_size("nan", 1);
    circuit.rz(f64::INFINITY, QubitId(0)).unwrap();
    assert!(matches!(
        emit(&circuit),
        Err(EmitError::NonFiniteAngle { .. })
    ));
}

#[test]
fn empty_circuit() {
    let qasm = emit(&Circuit::new("empty")).unwrap();
    assert_eq!(qasm, "OPENQASM 3.0;\ninclude \"stdgates.inc\";\n\n");
}
