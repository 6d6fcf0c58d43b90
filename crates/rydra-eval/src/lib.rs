//! Rydra Fidelity Model
//!
//! A pure arithmetic model of neutral-atom execution: given the parallel
//! slots produced by the compiler, the movement plan produced by the
//! inter-stage router, and the physical parameters of the machine, it
//! estimates total runtime, idle time, and fidelity.
//!
//! Nothing here touches the compiler's internals: the evaluator sees slot
//! counts, movement geometry, and two integers (qubit and gate counts).
//!
//! # Example
//!
//! ```rust
//! use rydra_eval::{evaluate, FidelityParams};
//! use rydra_ir::gates_from_pairs;
//!
//! let slots = vec![gates_from_pairs(&[(0, 1)]).unwrap()];
//! let report = evaluate(&slots, &[], 2, 1, &FidelityParams::default()).unwrap();
//!
//! assert!(report.total_fidelity > 0.99);
//! ```

pub mod error;
pub mod fidelity;
pub mod movement;
pub mod params;

pub use error::{EvalError, EvalResult};
pub use fidelity::{evaluate, FidelityReport};
pub use movement::{Move, MoveStage, MoveStep};
pub use params::FidelityParams;
