//! Rydra Gate-List Intermediate Representation
//!
//! This crate provides the core data structures shared by the Rydra
//! compilation stack: qubits, two-qubit gates, physical grid positions, and
//! dependency layering of gate lists.
//!
//! # Overview
//!
//! Rydra targets neutral-atom hardware whose native entangling operation is
//! the CZ gate. Circuits reach the compiler as ordered lists of two-qubit
//! gates; everything a downstream stage needs (dependency structure,
//! interaction topology, qubit population) is derived from that list.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] for addressing logical qubits
//! - **Gates**: [`Gate`], an unordered pair of distinct qubits
//! - **Positions**: [`Position`], an `(x, y)` site on the physical atom grid
//! - **Layering**: [`layers`], ASAP partitioning of a gate list into
//!   dependency timesteps
//!
//! # Example
//!
//! ```rust
//! use rydra_ir::{layers, Gate, QubitId};
//!
//! let gates = vec![
//!     Gate::new(QubitId(0), QubitId(1)).unwrap(),
//!     Gate::new(QubitId(2), QubitId(3)).unwrap(),
//!     Gate::new(QubitId(1), QubitId(2)).unwrap(),
//! ];
//!
//! let layered = layers(&gates);
//! // The first two gates touch disjoint qubits and share a timestep;
//! // the third depends on both and lands in the next one.
//! assert_eq!(layered.len(), 2);
//! assert_eq!(layered[0].len(), 2);
//! ```

pub mod error;
pub mod gate;
pub mod layer;
pub mod position;
pub mod qubit;

pub use error::{IrError, IrResult};
pub use gate::{gates_from_pairs, num_qubits, Gate};
pub use layer::layers;
pub use position::Position;
pub use qubit::QubitId;
