//! Rydra Neutral-Atom Transpilation Core
//!
//! This crate turns an ordered list of two-qubit gates into an execution
//! plan for a neutral-atom quantum computer: a square grid of atoms with
//! long-range Rydberg interactions, where any two atoms within the
//! interaction radius `Rb` can perform a CZ, and atoms are physically
//! shuttled between stages.
//!
//! # Pipeline
//!
//! ```text
//! gate list
//!     │  ASAP layering (rydra-ir)
//!     ▼
//! layers ──► greedy partitioner ──► stages, each subgraph-embeddable
//!     │          (VF2 oracle per connected component)
//!     ▼
//! inertial placer ──► one embedding per stage, biased to minimize
//!     │               weighted movement from the previous stage
//!     ▼
//! placement completer ──► total bijection qubit → grid site per stage
//!     │
//!     ▼
//! parallel scheduler ──► blockade-safe slots of simultaneous gates
//! ```
//!
//! The inter-stage atom router and the fidelity model consume this crate's
//! outputs through narrow interfaces: the router reads consecutive
//! embeddings, the evaluator (in `rydra-eval`) reads slot counts and the
//! router's movement plan.
//!
//! # Example
//!
//! ```rust
//! use rydra_compile::{Config, Transpiler};
//! use rydra_ir::gates_from_pairs;
//!
//! let gates = gates_from_pairs(&[(0, 1), (1, 2), (2, 0)]).unwrap();
//! let transpiler = Transpiler::new(Config::default()).unwrap();
//! let program = transpiler.run(&gates).unwrap();
//!
//! assert_eq!(program.gate_count(), 3);
//! // Every gate of every stage sits on a coupling edge of its embedding.
//! ```
//!
//! # Determinism
//!
//! Identical inputs and configuration produce byte-identical outputs: site
//! and vertex iteration orders are fixed, VF2 enumerates mappings in a
//! documented order, cost ties break to the first candidate seen, and the
//! completer's fallback PRNG is seeded from the configuration.

pub mod complete;
pub mod config;
pub mod coupling;
pub mod error;
pub mod interaction;
pub mod iso;
pub mod partition;
pub mod persist;
pub mod pipeline;
pub mod place;
pub mod schedule;

pub use config::Config;
pub use coupling::CouplingGraph;
pub use error::{CompileError, CompileResult};
pub use interaction::InteractionGraph;
pub use partition::partition_layers;
pub use persist::{load_placement, save_placement};
pub use pipeline::{CompiledProgram, Transpiler};
pub use place::{place_partitions, PlacementOutcome};
pub use schedule::parallel_slots;
