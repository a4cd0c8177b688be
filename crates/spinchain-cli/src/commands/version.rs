//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - Trotter circuits for XYZ Heisenberg spin chains",
        style("Spinchain").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  spinchain-ir         Circuit intermediate representation");
    println!("  spinchain-evolution  Brick-wall Trotter construction");
    println!("  spinchain-qasm3      OpenQASM 3 emitter");
    println!("  spinchain-cli        Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
