use rand::Rng;
use std::io::{self, Write};

use crate::dihedral::{Batch, Dihedral};

/// Bounds used when generating random test batches, matching the ranges the
/// hardware harness is exercised with.
pub const MIN_SEQUENCES: usize = 2;
pub const MAX_SEQUENCES: usize = 1000;
pub const MAX_SEQ_LEN: usize = 512;

/// Generate a random batch: 2..=1000 sequences of length 0..512 with
/// uniformly random angle pairs.
pub fn random_batch<R: Rng>(rng: &mut R) -> Batch {
    let num_seqs = rng.gen_range(MIN_SEQUENCES..=MAX_SEQUENCES);
    let lengths: Vec<usize> = (0..num_seqs).map(|_| rng.gen_range(0..MAX_SEQ_LEN)).collect();
    let total: usize = lengths.iter().sum();
    let tokens = (0..total)
        .map(|_| Dihedral::new(rng.gen(), rng.gen()))
        .collect();
    Batch::new(tokens, lengths)
}

/// Emit a batch in the textual input protocol: sequence count, lengths line,
/// then one line of angle pairs per sequence.
pub fn write_batch<W: Write>(batch: &Batch, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", batch.len())?;

    let lengths: Vec<String> = batch.lengths().iter().map(usize::to_string).collect();
    writeln!(out, "{}", lengths.join(" "))?;

    for i in 0..batch.len() {
        let tokens: Vec<String> = batch
            .sequence(i)
            .iter()
            .map(|d| format!("{} {}", d.phi, d.psi))
            .collect();
        writeln!(out, "{}", tokens.join("  "))?;
    }

    Ok(())
}
