//! Persistence of placements and run artifacts.
//!
//! Placements use a legacy two-line-per-qubit text format that downstream
//! tooling already parses; it must round-trip byte-for-byte. Everything else
//! is JSON lines, one document per line.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use rydra_ir::Position;

use crate::error::{CompileError, CompileResult};

/// Render a complete placement in the legacy format: for each qubit, a
/// register descriptor line followed by a `(x, y)` site line.
pub fn placement_to_string(placement: &[Position]) -> String {
    let n = placement.len();
    let mut out = String::new();
    for (i, site) in placement.iter().enumerate() {
        // Infallible for String.
        let _ = writeln!(out, "Qubit(QuantumRegister({n}, 'q'), {i})\n{site}");
    }
    out
}

fn malformed(line: usize, reason: impl Into<String>) -> CompileError {
    CompileError::MalformedPlacement {
        line,
        reason: reason.into(),
    }
}

/// Parse a placement rendered by [`placement_to_string`].
pub fn parse_placement(text: &str) -> CompileResult<Vec<Position>> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() % 2 != 0 {
        return Err(malformed(
            lines.len(),
            "expected an even number of lines (descriptor/site pairs)",
        ));
    }

    let mut placement: Vec<Option<Position>> = Vec::new();
    for pair in 0..lines.len() / 2 {
        let descriptor_line = 2 * pair + 1;
        let descriptor = lines[2 * pair];
        let site_line = lines[2 * pair + 1];

        let rest = descriptor
            .strip_prefix("Qubit(QuantumRegister(")
            .ok_or_else(|| malformed(descriptor_line, "missing qubit descriptor prefix"))?;
        let (n_str, rest) = rest
            .split_once(", 'q'), ")
            .ok_or_else(|| malformed(descriptor_line, "missing register separator"))?;
        let index_str = rest
            .strip_suffix(')')
            .ok_or_else(|| malformed(descriptor_line, "missing closing parenthesis"))?;
        let n: usize = n_str
            .parse()
            .map_err(|_| malformed(descriptor_line, "register size is not an integer"))?;
        let index: usize = index_str
            .parse()
            .map_err(|_| malformed(descriptor_line, "qubit index is not an integer"))?;

        if placement.is_empty() {
            placement.resize(n, None);
        }
        if n != placement.len() {
            return Err(malformed(descriptor_line, "inconsistent register size"));
        }
        if index >= n {
            return Err(malformed(descriptor_line, "qubit index out of range"));
        }

        let site = site_line
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .and_then(|s| s.split_once(", "))
            .ok_or_else(|| malformed(descriptor_line + 1, "site is not of the form (x, y)"))?;
        let x: u32 = site
            .0
            .parse()
            .map_err(|_| malformed(descriptor_line + 1, "x coordinate is not an integer"))?;
        let y: u32 = site
            .1
            .parse()
            .map_err(|_| malformed(descriptor_line + 1, "y coordinate is not an integer"))?;

        placement[index] = Some(Position::new(x, y));
    }

    placement
        .into_iter()
        .enumerate()
        .map(|(i, p)| p.ok_or_else(|| malformed(0, format!("no site recorded for qubit {i}"))))
        .collect()
}

/// Write a placement file in the legacy format.
pub fn save_placement(path: impl AsRef<Path>, placement: &[Position]) -> CompileResult<()> {
    fs::write(path, placement_to_string(placement))?;
    Ok(())
}

/// Load a placement file written by [`save_placement`].
pub fn load_placement(path: impl AsRef<Path>) -> CompileResult<Vec<Position>> {
    parse_placement(&fs::read_to_string(path)?)
}

/// Persist a sequence of records as JSON lines.
pub fn save_json_lines<T: Serialize>(path: impl AsRef<Path>, records: &[T]) -> CompileResult<()> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    fs::write(path, out)?;
    Ok(())
}

/// Load a sequence of records written by [`save_json_lines`].
pub fn load_json_lines<T: DeserializeOwned>(path: impl AsRef<Path>) -> CompileResult<Vec<T>> {
    let text = fs::read_to_string(path)?;
    text.lines()
        .map(|line| serde_json::from_str(line).map_err(CompileError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Position> {
        vec![Position::new(0, 0), Position::new(2, 1), Position::new(1, 2)]
    }

    #[test]
    fn test_placement_round_trips_bytes() {
        let text = placement_to_string(&sample());
        let parsed = parse_placement(&text).unwrap();
        assert_eq!(parsed, sample());
        assert_eq!(placement_to_string(&parsed), text);
    }

    #[test]
    fn test_placement_format_shape() {
        let text = placement_to_string(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Qubit(QuantumRegister(3, 'q'), 0)");
        assert_eq!(lines[1], "(0, 0)");
        assert_eq!(lines[4], "Qubit(QuantumRegister(3, 'q'), 2)");
        assert_eq!(lines[5], "(1, 2)");
    }

    #[test]
    fn test_parse_rejects_odd_line_count() {
        let err = parse_placement("Qubit(QuantumRegister(1, 'q'), 0)\n").unwrap_err();
        assert!(matches!(err, CompileError::MalformedPlacement { .. }));
    }

    #[test]
    fn test_parse_rejects_bad_site() {
        let text = "Qubit(QuantumRegister(1, 'q'), 0)\n(0; 0)\n";
        assert!(parse_placement(text).is_err());
    }

    #[test]
    fn test_placement_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("placement.txt");
        save_placement(&path, &sample()).unwrap();

        let loaded = load_placement(&path).unwrap();
        save_placement(&path, &loaded).unwrap();
        assert_eq!(load_placement(&path).unwrap(), sample());
    }

    #[test]
    fn test_json_lines_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partitions.jsonl");
        let records: Vec<Vec<u32>> = vec![vec![1, 2], vec![], vec![3]];
        save_json_lines(&path, &records).unwrap();
        let loaded: Vec<Vec<u32>> = load_json_lines(&path).unwrap();
        assert_eq!(loaded, records);
    }
}
