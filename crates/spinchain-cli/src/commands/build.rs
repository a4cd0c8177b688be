//! Build command implementation.

use anyhow::{Context, Result};
use tracing::info;

use spinchain_evolution::XyzEvolution;
use spinchain_ir::Circuit;
use spinchain_qasm3::emit;

use super::common::{OutputFormat, SpecArgs, write_output};

/// Execute the build command.
pub fn execute(
    args: &SpecArgs,
    format: OutputFormat,
    decompose: bool,
    output: Option<&str>,
) -> Result<()> {
    let spec = args.resolve()?;
    info!(
        num_qubits = spec.num_qubits(),
        trotter_num = spec.trotter_num(),
        bound = spec.is_bound(),
        "building evolution circuit"
    );

    let evolution = XyzEvolution::new(spec).context("Failed to build evolution circuit")?;
    info!(
        axes = %evolution.active_axes(),
        propagator = %evolution.propagator(),
        blocks = evolution.num_blocks(),
        time_delta = evolution.time_delta(),
        "evolution circuit built"
    );

    let mut circuit = evolution.into_circuit();
    if decompose {
        circuit = circuit.decompose_propagators()?;
    }

    let content = render(&circuit, format)?;
    write_output(&content, output)
}

/// Serialize a circuit in the requested format.
fn render(circuit: &Circuit, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => format!("{}\n", circuit.draw()),
        OutputFormat::Json => format!("{}\n", circuit.to_json()?),
        OutputFormat::Qasm => emit(circuit).map_err(|e| anyhow::anyhow!("Emit error: {e}"))?,
    })
}
