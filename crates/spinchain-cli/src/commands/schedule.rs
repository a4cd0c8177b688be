//! Schedule command implementation.

use anyhow::{Context, Result};
use console::style;

use spinchain_evolution::TrotterSchedule;

use super::common::SpecArgs;

/// Execute the schedule command.
pub fn execute(args: &SpecArgs, json: bool) -> Result<()> {
    let spec = args.resolve()?;
    let propagator = spec
        .validate()
        .context("Invalid evolution specification")?;
    let schedule = TrotterSchedule::new(spec.num_qubits(), spec.trotter_num(), spec.has_field());

    if json {
        println!("{}", serde_json::to_string_pretty(&schedule)?);
        return Ok(());
    }

    println!(
        "{} Trotter schedule: {} qubits, {} steps, {} layers, {} {} blocks",
        style("→").cyan().bold(),
        schedule.num_qubits(),
        spec.trotter_num(),
        schedule.num_layers(),
        schedule.num_blocks(),
        style(propagator).yellow()
    );
    println!(
        "  axes {}, time step {}",
        style(spec.active_axes()).green(),
        spec.time_delta()
    );

    for layer in schedule.layers() {
        let marker = if layer.field { "rz" } else { "" };
        let pairs = layer
            .pairs
            .iter()
            .map(|(a, b)| format!("({},{})", a.0, b.0))
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "  layer {:>3}  {}  {}",
            layer.index,
            style(format!("{marker:<2}")).yellow(),
            pairs
        );
    }

    Ok(())
}
