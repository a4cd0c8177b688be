//! Text drawing of circuits.
//!
//! Each qubit gets a wire row, and adjacent wires are separated by a spacer
//! row that multi-qubit boxes and barriers extend through:
//!
//! ```text
//! q_0: ─┤0 Uxyz├───────────
//!       │      │
//! q_1: ─┤1 Uxyz├──┤0 Uxyz├─
//!                 │      │
//! q_2: ───────────┤1 Uxyz├─
//! ```
//!
//! Columns follow the DAG's as-soon-as-possible layers; operations in one
//! layer whose qubit spans overlap are split into consecutive columns.

use crate::circuit::Circuit;
use crate::gate::{Gate, GateKind};
use crate::instruction::{Instruction, InstructionKind};
use crate::parameter::ParameterExpression;

/// Render `circuit` as a multi-line string (no trailing newline).
pub fn draw(circuit: &Circuit) -> String {
    let n = circuit.num_qubits();
    if n == 0 {
        return String::new();
    }

    let labels: Vec<String> = circuit.qubits().iter().map(|q| format!("{q}: ")).collect();
    let label_width = labels.iter().map(|l| width(l)).max().unwrap_or(0);
    let mut rows: Vec<String> = (0..2 * n - 1)
        .map(|r| {
            if r % 2 == 0 {
                pad_left(&labels[r / 2], label_width)
            } else {
                " ".repeat(label_width)
            }
        })
        .collect();

    for column in columns(circuit) {
        let col_width = column.iter().map(|inst| cell_width(inst)).max().unwrap_or(0);
        let mut cells: Vec<Option<String>> = vec![None; rows.len()];
        for inst in column {
            render(inst, col_width, &mut cells);
        }
        for (r, cell) in cells.into_iter().enumerate() {
            let filler = if r % 2 == 0 { '─' } else { ' ' };
            rows[r].push_str(&cell.unwrap_or_else(|| filler.to_string().repeat(col_width)));
        }
    }

    rows.iter()
        .map(|row| row.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Group instructions into drawing columns.
fn columns(circuit: &Circuit) -> Vec<Vec<&Instruction>> {
    let dag = circuit.dag();
    let mut out: Vec<Vec<&Instruction>> = vec![];
    for layer in dag.layers() {
        let mut packed: Vec<(Vec<&Instruction>, Vec<(u32, u32)>)> = vec![];
        for inst in layer.into_iter().filter_map(|node| dag.get_instruction(node)) {
            let Some((lo, hi)) = inst.qubit_span() else {
                continue;
            };
            let span = (lo.0, hi.0);
            let slot = packed
                .iter_mut()
                .find(|(_, spans)| spans.iter().all(|&(a, b)| span.1 < a || b < span.0));
            match slot {
                Some((insts, spans)) => {
                    insts.push(inst);
                    spans.push(span);
                }
                None => packed.push((vec![inst], vec![span])),
            }
        }
        out.extend(packed.into_iter().map(|(insts, _)| insts));
    }
    out
}

fn cell_width(inst: &Instruction) -> usize {
    match &inst.kind {
        InstructionKind::Barrier => 3,
        InstructionKind::Gate(gate) => {
            let inner = if inst.qubits.len() == 1 {
                width(&gate_text(gate))
            } else {
                width(&box_label(gate)) + 2
            };
            inner + 4
        }
    }
}

/// Write the cells covered by `inst` into `cells` (indexed by row).
fn render(inst: &Instruction, col_width: usize, cells: &mut [Option<String>]) {
    let Some((lo, hi)) = inst.qubit_span() else {
        return;
    };
    let (top, bottom) = (2 * lo.index(), 2 * hi.index());

    match &inst.kind {
        InstructionKind::Barrier => {
            for r in top..=bottom {
                let on_wire = r % 2 == 0;
                if on_wire && !inst.qubits.iter().any(|q| 2 * q.index() == r) {
                    continue;
                }
                let filler = if on_wire { '─' } else { ' ' };
                cells[r] = Some(center("░", col_width, filler));
            }
        }
        InstructionKind::Gate(gate) => {
            let inner_width = col_width - 4;
            if inst.qubits.len() == 1 {
                cells[top] = Some(format!("─┤{}├─", center(&gate_text(gate), inner_width, ' ')));
                return;
            }
            let label = box_label(gate);
            for r in top..=bottom {
                let cell = if r % 2 == 1 {
                    format!(" │{}│ ", " ".repeat(inner_width))
                } else {
                    let text = inst
                        .qubits
                        .iter()
                        .position(|q| 2 * q.index() == r)
                        .map(|k| format!("{k} {label}"))
                        .unwrap_or_default();
                    format!("─┤{}├─", pad_right(&text, inner_width))
                };
                cells[r] = Some(cell);
            }
        }
    }
}

/// Label inside a multi-qubit box.
fn box_label(gate: &Gate) -> String {
    match &gate.kind {
        GateKind::Propagator(_) => gate
            .label
            .clone()
            .unwrap_or_else(|| capitalize(gate.name())),
        GateKind::Standard(_) => gate_text(gate),
    }
}

/// Name plus parameter list, e.g. `Rz(1.5)`.
fn gate_text(gate: &Gate) -> String {
    let name = gate.label.clone().unwrap_or_else(|| capitalize(gate.name()));
    let params = gate.parameters();
    if params.is_empty() {
        return name;
    }
    let params: Vec<String> = params.into_iter().map(format_param).collect();
    format!("{name}({})", params.join(","))
}

fn format_param(param: &ParameterExpression) -> String {
    match param.as_f64() {
        Some(v) => {
            let s = format!("{v:.4}");
            let s = s.trim_end_matches('0').trim_end_matches('.');
            if s == "-0" { "0".to_string() } else { s.to_string() }
        }
        None => param.to_string(),
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn center(s: &str, total: usize, filler: char) -> String {
    let len = width(s);
    let left = total.saturating_sub(len) / 2;
    let right = total.saturating_sub(len + left);
    format!(
        "{}{s}{}",
        filler.to_string().repeat(left),
        filler.to_string().repeat(right)
    )
}

fn pad_left(s: &str, total: usize) -> String {
    format!("{}{s}", " ".repeat(total.saturating_sub(width(s))))
}

fn pad_right(s: &str, total: usize) -> String {
    format!("{s}{}", " ".repeat(total.saturating_sub(width(s))))
}
