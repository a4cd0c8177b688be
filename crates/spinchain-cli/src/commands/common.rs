//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use console::style;

use spinchain_evolution::EvolutionSpec;

/// Evolution parameters, from flags and/or a config file. Flags override
/// values from the file.
#[derive(Args, Debug, Clone, Default)]
pub struct SpecArgs {
    /// YAML or JSON file with the evolution parameters
    #[arg(short, long)]
    pub config: Option<String>,

    /// Number of qubits in the chain
    #[arg(short = 'n', long)]
    pub num_qubits: Option<u32>,

    /// Coupling constants as Jx,Jy,Jz (omit for a fully symbolic circuit)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub coupling: Option<Vec<f64>>,

    /// Uniform Z field strength
    #[arg(long, allow_hyphen_values = true)]
    pub field: Option<f64>,

    /// Total evolution time
    #[arg(short, long, allow_hyphen_values = true)]
    pub time: Option<f64>,

    /// Number of Trotter steps
    #[arg(short, long)]
    pub steps: Option<u32>,

    /// Keep block angles symbolic even when a coupling is given
    #[arg(long)]
    pub unbound: bool,

    /// Do not fence field layers with barriers
    #[arg(long)]
    pub no_barriers: bool,
}

impl SpecArgs {
    /// Merge the config file (if any) with the flags.
    pub fn resolve(&self) -> Result<EvolutionSpec> {
        let base = self.config.as_deref().map(load_spec).transpose()?;
        let num_qubits = self
            .num_qubits
            .or_else(|| base.as_ref().map(EvolutionSpec::num_qubits))
            .context("Either --num-qubits or --config is required")?;
        let base = base.unwrap_or_else(|| EvolutionSpec::new(num_qubits));

        let coupling = match &self.coupling {
            Some(values) => Some(parse_coupling(values)?),
            None => base.coupling(),
        };

        let mut spec = EvolutionSpec::new(num_qubits)
            .with_magnetic_field(self.field.unwrap_or(base.magnetic_field()))
            .with_final_time(self.time.unwrap_or(base.final_time()))
            .with_trotter_num(self.steps.unwrap_or(base.trotter_num()))
            .with_bound(base.bound() && !self.unbound)
            .with_barriers(base.barriers() && !self.no_barriers);
        if let Some(coupling) = coupling {
            spec = spec.with_coupling(coupling);
        }
        Ok(spec)
    }
}

fn parse_coupling(values: &[f64]) -> Result<[f64; 3]> {
    <[f64; 3]>::try_from(values).map_err(|_| {
        anyhow::anyhow!(
            "--coupling takes exactly three values Jx,Jy,Jz, got {}",
            values.len()
        )
    })
}

/// Output format for built circuits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Text drawing
    Text,
    /// JSON instruction list
    Json,
    /// OpenQASM 3 source
    Qasm,
}

/// Load an evolution specification from a YAML or JSON file.
pub fn load_spec(path: &str) -> Result<EvolutionSpec> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;

    let ext = path_obj.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext.to_lowercase().as_str() {
        "json" => serde_json::from_str(&source)
            .with_context(|| format!("Invalid JSON specification: {path}")),
        "yaml" | "yml" => serde_yaml_ng::from_str(&source)
            .with_context(|| format!("Invalid YAML specification: {path}")),
        other => anyhow::bail!(
            "Unsupported config format '{other}' for {path} (expected .yaml, .yml or .json)"
        ),
    }
}

/// Write `content` to `output`, or to stdout when no path is given.
pub fn write_output(content: &str, output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write file: {path}"))?;
            println!("{} Wrote {}", style("✓").green().bold(), style(path).green());
        }
        None => print!("{content}"),
    }
    Ok(())
}
