use std::io::BufRead;

use thiserror::Error;

use crate::dihedral::{Batch, Dihedral};
use crate::scoring::ANGLE_DOMAIN;

/// Fatal input-format errors. The oracle produces either a complete report
/// or none at all, so there is no recoverable class.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing sequence count line")]
    MissingSequenceCount,
    #[error("invalid sequence count {0:?} (expected a positive integer)")]
    InvalidSequenceCount(String),
    #[error("expected {expected} sequence lengths, found {found}")]
    LengthCardinality { expected: usize, found: usize },
    #[error("invalid sequence length {0:?}")]
    InvalidLength(String),
    #[error("invalid angle value {0:?}")]
    InvalidAngle(String),
    #[error("angle value {0} outside [0, {ANGLE_DOMAIN})")]
    AngleOutOfRange(i64),
    #[error("expected {expected} angle values, found {found}")]
    TokenCount { expected: usize, found: usize },
}

fn parse_angle(field: &str) -> Result<u16, InputError> {
    let value: i64 = field
        .parse()
        .map_err(|_| InputError::InvalidAngle(field.to_string()))?;
    if !(0..ANGLE_DOMAIN).contains(&value) {
        return Err(InputError::AngleOutOfRange(value));
    }
    Ok(value as u16)
}

/// Read a batch in the textual protocol: the sequence count on line 1, the
/// per-sequence lengths on line 2, then the flat stream of whitespace
/// separated angle values, two per token.
pub fn read_batch<R: BufRead>(mut reader: R) -> Result<Batch, InputError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(InputError::MissingSequenceCount);
    }
    let count_field = line.trim();
    let num_seqs = count_field
        .parse::<usize>()
        .ok()
        .filter(|&n| n >= 1)
        .ok_or_else(|| InputError::InvalidSequenceCount(count_field.to_string()))?;

    line.clear();
    reader.read_line(&mut line)?;
    let mut lengths = Vec::with_capacity(num_seqs);
    for field in line.split_whitespace() {
        let len = field
            .parse::<usize>()
            .map_err(|_| InputError::InvalidLength(field.to_string()))?;
        lengths.push(len);
    }
    if lengths.len() != num_seqs {
        return Err(InputError::LengthCardinality {
            expected: num_seqs,
            found: lengths.len(),
        });
    }

    let total_tokens: usize = lengths.iter().sum();
    let expected_values = total_tokens * 2;

    let mut rest = String::new();
    reader.read_to_string(&mut rest)?;
    let mut values = Vec::with_capacity(expected_values);
    for field in rest.split_whitespace() {
        values.push(parse_angle(field)?);
    }
    if values.len() != expected_values {
        return Err(InputError::TokenCount {
            expected: expected_values,
            found: values.len(),
        });
    }

    let tokens = values
        .chunks_exact(2)
        .map(|pair| Dihedral::new(pair[0], pair[1]))
        .collect();
    Ok(Batch::new(tokens, lengths))
}
