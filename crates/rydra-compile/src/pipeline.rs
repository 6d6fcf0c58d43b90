//! The end-to-end transpilation driver.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use rydra_ir::{layers, num_qubits, Gate, Position};

use crate::complete::complete_embeddings;
use crate::config::Config;
use crate::coupling::CouplingGraph;
use crate::error::{CompileError, CompileResult};
use crate::partition::partition_layers;
use crate::place::place_partitions;
use crate::schedule::parallel_slots;

/// Everything the pipeline produces for one gate list.
///
/// `partitions`, `embeddings`, and `slots` are index-aligned: partition `i`
/// executes under `embeddings[i]`, grouped into `slots[i]`. Embeddings are
/// complete bijections of all `num_qubits` qubits onto distinct grid sites.
/// The inter-stage movement plan is produced elsewhere, from consecutive
/// embedding pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompiledProgram {
    /// Gate lists, one per stage, covering the input in layer order.
    pub partitions: Vec<Vec<Gate>>,
    /// Completed placements, one per stage.
    pub embeddings: Vec<Vec<Position>>,
    /// Stage indices at which the grid was enlarged.
    pub extended_at: Vec<usize>,
    /// Parallel slots, one list per stage.
    pub slots: Vec<Vec<Vec<Gate>>>,
    /// Number of logical qubits.
    pub num_qubits: usize,
    /// Side length of the grid in effect at the end of the run.
    pub grid_side: u32,
}

impl CompiledProgram {
    /// Total number of gates across all stages.
    pub fn gate_count(&self) -> usize {
        self.partitions.iter().map(Vec::len).sum()
    }

    /// Total number of parallel slots across all stages.
    pub fn total_slot_count(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }

    /// All slots of all stages, flattened in execution order.
    pub fn all_slots(&self) -> Vec<Vec<Gate>> {
        self.slots.concat()
    }
}

/// The transpilation pipeline: layering, partitioning, placement,
/// completion, and scheduling, under one validated configuration.
pub struct Transpiler {
    config: Config,
}

impl Transpiler {
    /// Create a transpiler, validating the configuration up front.
    pub fn new(config: Config) -> CompileResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this transpiler runs with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compile a gate list into partitions, placements, and parallel slots.
    #[instrument(skip(self, gates), fields(gates = gates.len()))]
    pub fn run(&self, gates: &[Gate]) -> CompileResult<CompiledProgram> {
        if gates.is_empty() {
            return Ok(CompiledProgram::default());
        }

        let n = num_qubits(gates);
        let side = self
            .config
            .grid_side
            .unwrap_or_else(|| (n as f64).sqrt().ceil() as u32);
        let graph = CouplingGraph::new(side, self.config.interaction_radius);

        if let Some(initial) = &self.config.initial_mapping {
            validate_initial_mapping(initial, n, &graph)?;
        }

        let layered = layers(gates);
        let partitions = partition_layers(&layered, &graph);
        info!(
            qubits = n,
            layers = layered.len(),
            partitions = partitions.len(),
            side,
            "gate list partitioned"
        );

        let outcome = place_partitions(&partitions, graph, n, &self.config)?;
        let mut embeddings = outcome.embeddings;
        let completion_start = usize::from(self.config.initial_mapping.is_some());
        complete_embeddings(&mut embeddings, &outcome.graph, completion_start, self.config.seed)?;

        let embeddings: Vec<Vec<Position>> = embeddings
            .into_iter()
            .map(|embedding| {
                embedding
                    .into_iter()
                    .map(|p| p.expect("completer assigns every qubit"))
                    .collect()
            })
            .collect();

        let blockade_radius = self.config.blockade_radius();
        let slots: Vec<Vec<Vec<Gate>>> = partitions
            .iter()
            .zip(&embeddings)
            .map(|(partition, embedding)| parallel_slots(partition, embedding, blockade_radius))
            .collect();

        let program = CompiledProgram {
            partitions,
            embeddings,
            extended_at: outcome.extended_at,
            slots,
            num_qubits: n,
            grid_side: outcome.graph.side(),
        };
        info!(
            stages = program.partitions.len(),
            slots = program.total_slot_count(),
            extensions = program.extended_at.len(),
            "compilation complete"
        );
        Ok(program)
    }
}

fn validate_initial_mapping(
    initial: &[Position],
    num_qubits: usize,
    graph: &CouplingGraph,
) -> CompileResult<()> {
    let out_of_range = || CompileError::ConfigOutOfRange {
        name: "initial_mapping",
        value: format!("{} sites", initial.len()),
        expected: "one distinct on-grid site per qubit",
    };

    if initial.len() != num_qubits {
        return Err(out_of_range());
    }
    let mut distinct: Vec<Position> = initial.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    if distinct.len() != initial.len() {
        return Err(out_of_range());
    }
    if initial.iter().any(|&p| graph.site_index(p).is_none()) {
        return Err(out_of_range());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rydra_ir::gates_from_pairs;

    #[test]
    fn test_empty_input() {
        let transpiler = Transpiler::new(Config::default()).unwrap();
        let program = transpiler.run(&[]).unwrap();
        assert!(program.partitions.is_empty());
        assert!(program.slots.is_empty());
        assert_eq!(program.num_qubits, 0);
    }

    #[test]
    fn test_invalid_config_rejected_up_front() {
        let config = Config {
            idle_weight: -0.1,
            ..Config::default()
        };
        assert!(Transpiler::new(config).is_err());
    }

    #[test]
    fn test_single_gate() {
        let gates = gates_from_pairs(&[(0, 1)]).unwrap();
        let transpiler = Transpiler::new(Config::default()).unwrap();
        let program = transpiler.run(&gates).unwrap();

        assert_eq!(program.partitions, vec![gates.clone()]);
        assert_eq!(program.slots, vec![vec![gates.clone()]]);
        assert_eq!(program.num_qubits, 2);

        let e = &program.embeddings[0];
        assert_eq!(e.len(), 2);
        assert_ne!(e[0], e[1]);
    }

    #[test]
    fn test_initial_mapping_must_cover_all_qubits() {
        let gates = gates_from_pairs(&[(0, 1), (1, 2)]).unwrap();
        let config = Config {
            initial_mapping: Some(vec![Position::new(0, 0), Position::new(0, 1)]),
            ..Config::default()
        };
        let transpiler = Transpiler::new(config).unwrap();
        let err = transpiler.run(&gates).unwrap_err();
        assert!(matches!(
            err,
            CompileError::ConfigOutOfRange {
                name: "initial_mapping",
                ..
            }
        ));
    }
}
