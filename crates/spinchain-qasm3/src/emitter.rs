//! QASM3 emitter for serializing circuits.

use rustc_hash::FxHashMap;
use spinchain_ir::{
    Circuit, Gate, GateKind, Instruction, InstructionKind, ParameterExpression, PropagatorGate,
    QubitId, StandardGate,
};

use crate::error::{EmitError, EmitResult};

/// Names that may not be reused for input parameters.
const RESERVED: &[&str] = &["q", "pi", "tau", "euler", "angle", "input", "gate", "qubit"];

/// `exp(-i θ/2 X⊗X)`.
const RXX_DEF: &str =
    "gate rxx(theta) a, b { h a; h b; cx a, b; rz(theta) b; cx a, b; h a; h b; }";
/// `exp(-i θ/2 Y⊗Y)`.
const RYY_DEF: &str = "gate ryy(theta) a, b { rx(pi/2) a; rx(pi/2) b; cx a, b; rz(theta) b; \
                       cx a, b; rx(-pi/2) a; rx(-pi/2) b; }";
/// `exp(-i θ/2 Z⊗Z)`.
const RZZ_DEF: &str = "gate rzz(theta) a, b { cx a, b; rz(theta) b; cx a, b; }";
/// `exp(-i (γ X⊗X + δ Z⊗Z))`.
const UXZ_DEF: &str = "gate uxz(gamma, delta) a, b { rxx(2*gamma) a, b; rzz(2*delta) a, b; }";
/// `exp(-i (θx X⊗X + θy Y⊗Y + θz Z⊗Z))`.
const UXYZ_DEF: &str = "gate uxyz(theta_x, theta_y, theta_z) a, b { rxx(2*theta_x) a, b; \
                        ryy(2*theta_y) a, b; rzz(2*theta_z) a, b; }";

/// Emit a circuit as QASM3 source code.
///
/// Free parameters become `input angle` declarations. Gates outside
/// `stdgates.inc` (`rxx`, `ryy`, `rzz`, `uxz`, `uxyz`) get inline
/// definitions, written only when the circuit uses them.
pub fn emit(circuit: &Circuit) -> EmitResult<String> {
    let mut emitter = Emitter::new(circuit)?;
    emitter.emit_circuit(circuit)
}

/// Which non-standard gates need a definition.
#[derive(Debug, Default, Clone, Copy)]
struct Definitions {
    rxx: bool,
    ryy: bool,
    rzz: bool,
    uxz: bool,
    uxyz: bool,
}

impl Definitions {
    fn scan(circuit: &Circuit) -> Self {
        let mut defs = Self::default();
        for gate in circuit.instructions().filter_map(Instruction::as_gate) {
            match &gate.kind {
                GateKind::Standard(StandardGate::RXX(_)) => defs.rxx = true,
                GateKind::Standard(StandardGate::RYY(_)) => defs.ryy = true,
                GateKind::Standard(StandardGate::RZZ(_)) => defs.rzz = true,
                GateKind::Propagator(PropagatorGate::Uxz(_)) => {
                    defs.uxz = true;
                    defs.rxx = true;
                    defs.rzz = true;
                }
                GateKind::Propagator(PropagatorGate::Uxyz(_)) => {
                    defs.uxyz = true;
                    defs.rxx = true;
                    defs.ryy = true;
                    defs.rzz = true;
                }
                GateKind::Standard(_) => {}
            }
        }
        defs
    }

    fn lines(self) -> Vec<&'static str> {
        [
            (self.rxx, RXX_DEF),
            (self.ryy, RYY_DEF),
            (self.rzz, RZZ_DEF),
            (self.uxz, UXZ_DEF),
            (self.uxyz, UXYZ_DEF),
        ]
        .into_iter()
        .filter_map(|(used, def)| used.then_some(def))
        .collect()
    }
}

/// QASM3 emitter.
struct Emitter {
    output: String,
    /// Placeholder name (`θ3[1]`) to declared identifier (`θ3_1`).
    identifiers: FxHashMap<String, String>,
    /// Declared identifiers in declaration order.
    inputs: Vec<String>,
}

impl Emitter {
    fn new(circuit: &Circuit) -> EmitResult<Self> {
        let mut identifiers = FxHashMap::default();
        let mut owners: FxHashMap<String, String> = FxHashMap::default();
        let mut inputs = vec![];
        for name in circuit.parameters() {
            let ident = identifier(&name)?;
            if let Some(first) = owners.get(&ident) {
                return Err(EmitError::IdentifierCollision {
                    first: first.clone(),
                    second: name,
                    identifier: ident,
                });
            }
            owners.insert(ident.clone(), name.clone());
            identifiers.insert(name, ident.clone());
            inputs.push(ident);
        }
        Ok(Self {
            output: String::new(),
            identifiers,
            inputs,
        })
    }

    fn emit_circuit(&mut self, circuit: &Circuit) -> EmitResult<String> {
        self.writeln("OPENQASM 3.0;");
        self.writeln("include \"stdgates.inc\";");
        self.writeln("");

        let defs = Definitions::scan(circuit).lines();
        for def in &defs {
            self.writeln(def);
        }
        if !defs.is_empty() {
            self.writeln("");
        }

        let inputs = std::mem::take(&mut self.inputs);
        for ident in &inputs {
            self.writeln(&format!("input angle {ident};"));
        }
        if !inputs.is_empty() {
            self.writeln("");
        }

        let num_qubits = circuit.num_qubits();
        if num_qubits > 0 {
            self.writeln(&format!("qubit[{num_qubits}] q;"));
            self.writeln("");
        }

        for instruction in circuit.instructions() {
            self.emit_instruction(instruction, num_qubits)?;
        }

        Ok(std::mem::take(&mut self.output))
    }

    fn emit_instruction(&mut self, instruction: &Instruction, num_qubits: usize) -> EmitResult<()> {
        let qubits = emit_qubits(&instruction.qubits);
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let name = gate.name();
                let params = self.emit_gate_params(gate)?;
                if params.is_empty() {
                    self.writeln(&format!("{name} {qubits};"));
                } else {
                    self.writeln(&format!("{name}({params}) {qubits};"));
                }
            }
            InstructionKind::Barrier => {
                if instruction.qubits.is_empty() || instruction.qubits.len() == num_qubits {
                    self.writeln("barrier q;");
                } else {
                    self.writeln(&format!("barrier {qubits};"));
                }
            }
        }
        Ok(())
    }

    fn emit_gate_params(&self, gate: &Gate) -> EmitResult<String> {
        let params = gate
            .parameters()
            .into_iter()
            .map(|p| self.emit_param(p, gate.name()))
            .collect::<EmitResult<Vec<_>>>()?;
        Ok(params.join(", "))
    }

    fn emit_param(&self, param: &ParameterExpression, gate: &str) -> EmitResult<String> {
        Ok(match param {
            ParameterExpression::Constant(v) => {
                if !v.is_finite() {
                    return Err(EmitError::NonFiniteAngle {
                        gate: gate.to_string(),
                        value: *v,
                    });
                }
                emit_constant(*v)
            }
            ParameterExpression::Symbol(_) | ParameterExpression::Element { .. } => {
                let name = param.placeholder_name().unwrap_or_default();
                self.identifiers.get(&name).cloned().unwrap_or(name)
            }
            ParameterExpression::Neg(e) => format!("-({})", self.emit_param(e, gate)?),
            ParameterExpression::Add(a, b) => format!(
                "({} + {})",
                self.emit_param(a, gate)?,
                self.emit_param(b, gate)?
            ),
            ParameterExpression::Mul(a, b) => format!(
                "({} * {})",
                self.emit_param(a, gate)?,
                self.emit_param(b, gate)?
            ),
        })
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

/// Declared identifier for a placeholder: symbols keep their name, vector
/// elements `v[i]` become `v_i`.
fn identifier(name: &str) -> EmitResult<String> {
    let ident = match name.strip_suffix(']').and_then(|s| s.split_once('[')) {
        Some((vector, index)) => format!("{vector}_{index}"),
        None => name.to_string(),
    };
    let mut chars = ident.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_alphanumeric() || c == '_');
    if !valid_start || !valid_rest || RESERVED.contains(&ident.as_str()) {
        return Err(EmitError::InvalidIdentifier(name.to_string()));
    }
    Ok(ident)
}

fn emit_constant(v: f64) -> String {
    let pi = std::f64::consts::PI;
    if (v - pi).abs() < 1e-10 {
        "pi".into()
    } else if (v - pi / 2.0).abs() < 1e-10 {
        "pi/2".into()
    } else if (v - pi / 4.0).abs() < 1e-10 {
        "pi/4".into()
    } else if (v + pi / 2.0).abs() < 1e-10 {
        "-pi/2".into()
    } else if (v + pi / 4.0).abs() < 1e-10 {
        "-pi/4".into()
    } else {
        format!("{v}")
    }
}

fn emit_qubits(qubits: &[QubitId]) -> String {
    qubits
        .iter()
        .map(|q| format!("q[{}]", q.0))
        .collect::<Vec<_>>()
        .join(", ")
}
