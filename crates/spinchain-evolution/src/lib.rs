//! `spinchain-evolution`: Trotter circuits for the XYZ Heisenberg chain.
//!
//! Builds a `spinchain_ir::Circuit` approximating time evolution under
//!
//!   H = Σ_i (Jx X_i X_{i+1} + Jy Y_i Y_{i+1} + Jz Z_i Z_{i+1}) + h Σ_i Z_i
//!
//! as a brick wall of two-site propagator blocks interleaved with `Rz` field
//! layers. Blocks carry either numeric angles (`Δt·J`) or fresh symbolic
//! placeholders `θk[i]` for variational use.
//!
//! # Quick start
//!
//! ```rust
//! use spinchain_evolution::{EvolutionSpec, XyzEvolution};
//!
//! let spec = EvolutionSpec::new(3)
//!     .with_coupling([1.0, 0.0, 1.0])
//!     .with_magnetic_field(1.0)
//!     .with_final_time(3.0)
//!     .with_trotter_num(2);
//!
//! let evolution = XyzEvolution::new(spec).unwrap();
//! assert_eq!(evolution.active_axes().label(), "XZ");
//! assert_eq!(evolution.time_delta(), 1.5);
//! assert_eq!(evolution.circuit().count_ops()["uxz"], 4);
//! ```

pub mod axes;
pub mod error;
pub mod evolution;
pub mod params;
pub mod schedule;
pub mod spec;

pub use axes::{ActiveAxes, Axis, Propagator};
pub use error::{EvolutionError, EvolutionResult, SpecError};
pub use evolution::XyzEvolution;
pub use params::ParameterSource;
pub use schedule::{Layer, TrotterSchedule};
pub use spec::EvolutionSpec;
