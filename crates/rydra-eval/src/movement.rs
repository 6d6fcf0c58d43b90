//! The movement-plan input contract.
//!
//! The inter-stage router turns two consecutive embeddings into a plan of
//! pick/move/drop operations. The evaluator only needs the plan's shape and
//! geometry, captured by the types here: a [`MoveStage`] per pair of
//! consecutive stages, each a sequence of [`MoveStep`]s executed one after
//! another, each step a set of [`Move`]s executed in parallel.

use serde::{Deserialize, Serialize};

use rydra_ir::{Position, QubitId};

/// One atom relocated from one grid site to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// The logical qubit riding the atom.
    pub qubit: QubitId,
    /// Source site.
    pub from: Position,
    /// Destination site.
    pub to: Position,
}

/// Moves executed simultaneously: one pick, one parallel flight, one drop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStep {
    /// The parallel moves of this step.
    pub moves: Vec<Move>,
}

/// The ordered movement steps between two consecutive stages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStage {
    /// Steps executed in order.
    pub steps: Vec<MoveStep>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_round_trip() {
        let stage = MoveStage {
            steps: vec![MoveStep {
                moves: vec![Move {
                    qubit: QubitId(3),
                    from: Position::new(0, 0),
                    to: Position::new(2, 1),
                }],
            }],
        };
        let json = serde_json::to_string(&stage).unwrap();
        let back: MoveStage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stage);
    }
}
