//! End-to-end pipeline scenarios on small grids.

use rustc_hash::FxHashSet;

use rydra_compile::persist::{parse_placement, placement_to_string};
use rydra_compile::schedule::compatible;
use rydra_compile::{
    partition_layers, place_partitions, CompileError, CompiledProgram, Config, CouplingGraph,
    Transpiler,
};
use rydra_ir::{gates_from_pairs, layers, Gate, Position, QubitId};

fn compile(pairs: &[(u32, u32)], config: Config) -> CompiledProgram {
    let gates = gates_from_pairs(pairs).unwrap();
    Transpiler::new(config).unwrap().run(&gates).unwrap()
}

fn config_3x3_rb2() -> Config {
    Config {
        grid_side: Some(3),
        ..Config::default()
    }
}

/// Every stage's gates must sit on coupling edges, on distinct sites.
fn assert_program_valid(program: &CompiledProgram, radius: f64) {
    let graph = CouplingGraph::new(program.grid_side, radius);
    for (partition, embedding) in program.partitions.iter().zip(&program.embeddings) {
        assert_eq!(embedding.len(), program.num_qubits);

        let distinct: FxHashSet<Position> = embedding.iter().copied().collect();
        assert_eq!(distinct.len(), embedding.len(), "embedding not injective");

        for gate in partition {
            let a = embedding[gate.a.index()];
            let b = embedding[gate.b.index()];
            assert!(graph.is_edge(a, b), "gate {gate} not on a coupling edge");
        }
    }
}

#[test]
fn triangle_compiles_to_one_stage_of_serial_slots() {
    let program = compile(&[(0, 1), (1, 2), (2, 0)], config_3x3_rb2());

    assert_eq!(program.partitions.len(), 1);
    assert_eq!(program.partitions[0].len(), 3);
    assert_program_valid(&program, 2.0);

    // All atoms sit within r_re = 4 of each other on a 3x3 grid, and the
    // gates share qubits pairwise: three slots of one gate each.
    assert_eq!(program.slots[0].len(), 3);
    for slot in &program.slots[0] {
        assert_eq!(slot.len(), 1);
    }
}

#[test]
fn disjoint_pairs_share_stage_but_not_slot() {
    let program = compile(&[(0, 1), (2, 3)], config_3x3_rb2());

    assert_eq!(program.partitions.len(), 1);
    assert_program_valid(&program, 2.0);

    // The two gates are independent, but no 3x3 placement separates them by
    // more than the blockade radius.
    assert_eq!(program.slots[0].len(), 2);
}

#[test]
fn independent_edge_joins_triangle_stage() {
    let program = compile(&[(0, 1), (1, 2), (0, 2), (3, 4)], config_3x3_rb2());

    assert_eq!(program.partitions.len(), 1);
    assert_eq!(program.partitions[0].len(), 4);
    assert_program_valid(&program, 2.0);
}

#[test]
fn star_splits_when_grid_degree_runs_out() {
    let config = Config {
        grid_side: Some(3),
        interaction_radius: 1.0,
        ..Config::default()
    };
    let program = compile(&[(0, 1), (0, 2), (0, 3), (0, 4), (0, 5)], config);

    assert_eq!(program.partitions.len(), 2);
    assert_eq!(program.partitions[0].len(), 4);
    assert_eq!(program.partitions[1].len(), 1);
    assert!(program.extended_at.is_empty());
    assert_program_valid(&program, 1.0);
}

#[test]
fn oversized_layer_extends_grid() {
    let config = Config {
        grid_side: Some(2),
        interaction_radius: 1.0,
        ..Config::default()
    };
    let program = compile(&[(0, 1), (2, 3), (4, 5)], config);

    assert_eq!(program.partitions.len(), 1);
    assert_eq!(program.extended_at, vec![0]);
    assert_eq!(program.grid_side, 3);
    assert_program_valid(&program, 1.0);
}

#[test]
fn embedding_exhausted_when_extension_is_not_enough() {
    let config = Config {
        grid_side: Some(1),
        interaction_radius: 1.0,
        ..Config::default()
    };
    let gates = gates_from_pairs(&[(0, 1), (2, 3), (4, 5), (6, 7)]).unwrap();
    let err = Transpiler::new(config).unwrap().run(&gates).unwrap_err();
    assert!(matches!(
        err,
        CompileError::EmbeddingExhausted { partition: 0 }
    ));
}

#[test]
fn placement_infeasible_when_idle_qubits_overflow_grid() {
    // One gate over ten qubits: the pair embeds on a 3x3 grid, but ten atoms
    // cannot occupy nine sites.
    let gates = gates_from_pairs(&[(0, 9)]).unwrap();
    let err = Transpiler::new(config_3x3_rb2())
        .unwrap()
        .run(&gates)
        .unwrap_err();
    assert!(matches!(
        err,
        CompileError::PlacementInfeasible { partition: 0 }
    ));
}

#[test]
fn identical_runs_are_byte_identical() {
    let pairs = [(0, 1), (1, 2), (3, 4), (0, 2), (2, 3), (4, 5), (0, 5)];
    let a = compile(&pairs, Config::default());
    let b = compile(&pairs, Config::default());

    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn inertial_selection_never_moves_more_than_first_mapping() {
    let pairs = [(0, 1), (0, 2), (0, 3), (0, 4), (0, 5)];
    let gates = gates_from_pairs(&pairs).unwrap();
    let graph = || CouplingGraph::new(3, 1.0);
    let partitions = partition_layers(&layers(&gates), &graph());
    assert!(partitions.len() > 1);

    let weighted_cost = |config: &Config| {
        let outcome = place_partitions(&partitions, graph(), 6, config).unwrap();
        let mut total = 0.0;
        for i in 1..outcome.embeddings.len() {
            let active: FxHashSet<QubitId> =
                partitions[i].iter().flat_map(|g| g.qubits()).collect();
            let pairs: Vec<(QubitId, Position)> = outcome.embeddings[i]
                .iter()
                .enumerate()
                .filter_map(|(q, p)| p.map(|p| (QubitId::from(q), p)))
                .collect();
            total += rydra_compile::place::movement_cost(
                &pairs,
                &outcome.embeddings[i - 1],
                &active,
                config.idle_weight,
            );
        }
        total
    };

    let optimized = Config {
        interaction_radius: 1.0,
        ..Config::default()
    };
    let first_only = Config {
        interaction_radius: 1.0,
        optimize_movement: false,
        ..Config::default()
    };
    assert!(weighted_cost(&optimized) <= weighted_cost(&first_only) + 1e-12);
}

#[test]
fn compiled_placement_round_trips_through_legacy_format() {
    let program = compile(&[(0, 1), (1, 2), (2, 0)], config_3x3_rb2());
    let text = placement_to_string(&program.embeddings[0]);
    let reparsed = parse_placement(&text).unwrap();
    assert_eq!(reparsed, program.embeddings[0]);
    assert_eq!(placement_to_string(&reparsed), text);
}

#[test]
fn slots_respect_blockade_everywhere() {
    let pairs = [(0, 1), (2, 3), (4, 5), (1, 2), (3, 4), (0, 5), (0, 3)];
    let program = compile(&pairs, Config::default());
    assert_program_valid(&program, 2.0);

    let blockade = 4.0;
    for (embedding, stage_slots) in program.embeddings.iter().zip(&program.slots) {
        for slot in stage_slots {
            for (i, g1) in slot.iter().enumerate() {
                for g2 in &slot[i + 1..] {
                    assert!(
                        compatible(g1, g2, embedding, blockade),
                        "slot pairs {g1} and {g2} violate the blockade"
                    );
                }
            }
        }
    }
}

#[test]
fn empty_circuit_evaluates_to_perfect_fidelity() {
    let program = compile(&[], Config::default());
    let report = rydra_eval::evaluate(
        &program.all_slots(),
        &[],
        program.num_qubits,
        program.gate_count(),
        &rydra_eval::FidelityParams::default(),
    )
    .unwrap();
    assert_eq!(report.total_fidelity, 1.0);
    assert_eq!(report.total_runtime, 0.0);
}

#[test]
fn compiled_triangle_evaluates_without_movement() {
    let params = rydra_eval::FidelityParams::default();
    let program = compile(&[(0, 1), (1, 2), (2, 0)], config_3x3_rb2());
    let report = rydra_eval::evaluate(
        &program.all_slots(),
        &[],
        program.num_qubits,
        program.gate_count(),
        &params,
    )
    .unwrap();

    // Three serial slots of t_cz each; idle = 3 qubits * runtime - 3 gates.
    let runtime = 3.0 * params.t_cz;
    assert!((report.total_runtime - runtime).abs() < 1e-12);
    assert!((report.idle_time - (3.0 * runtime - 3.0 * params.t_cz)).abs() < 1e-12);
    let expected =
        (-report.idle_time / params.t_eff).exp() * params.f_cz.powi(3);
    assert!((report.total_fidelity - expected).abs() < 1e-12);
}

#[test]
fn stage_gates_cover_the_layered_input() {
    let pairs = [(0, 1), (1, 2), (0, 2), (3, 4), (2, 4), (0, 4), (1, 3)];
    let gates = gates_from_pairs(&pairs).unwrap();
    let program = compile(&pairs, Config::default());

    let flat: Vec<Gate> = program.partitions.concat();
    let expected: Vec<Gate> = layers(&gates).concat();
    assert_eq!(flat, expected);
}
