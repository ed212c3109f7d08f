/// One sequence token: a pair of discretized backbone dihedral angles.
/// Each component lives on a circular domain of `ANGLE_DOMAIN` fixed-point
/// units, so 0 and 65536 denote the same angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dihedral {
    pub phi: u16,
    pub psi: u16,
}

impl Dihedral {
    #[inline]
    pub fn new(phi: u16, psi: u16) -> Self {
        Dihedral { phi, psi }
    }
}

/// A batch of sequences stored as a single flat token stream plus the
/// per-sequence lengths. A sequence is identified by its position in the
/// batch and materialized as a contiguous slice of the stream.
#[derive(Debug, Clone)]
pub struct Batch {
    tokens: Vec<Dihedral>,
    lengths: Vec<usize>,
    // offsets[i] = start of sequence i in `tokens`
    offsets: Vec<usize>,
}

impl Batch {
    /// Assemble a batch from a flat token stream and the declared lengths.
    /// The stream must contain exactly `lengths.iter().sum()` tokens;
    /// callers are expected to have validated this already.
    pub fn new(tokens: Vec<Dihedral>, lengths: Vec<usize>) -> Self {
        debug_assert_eq!(tokens.len(), lengths.iter().sum::<usize>());
        let mut offsets = Vec::with_capacity(lengths.len());
        let mut offset = 0;
        for &len in &lengths {
            offsets.push(offset);
            offset += len;
        }
        Batch {
            tokens,
            lengths,
            offsets,
        }
    }

    /// Number of sequences in the batch.
    #[inline]
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// The declared per-sequence lengths, in batch order.
    #[inline]
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Total number of tokens across all sequences.
    #[inline]
    pub fn total_tokens(&self) -> usize {
        self.tokens.len()
    }

    /// The i-th sequence as a read-only slice of the token stream.
    #[inline]
    pub fn sequence(&self, i: usize) -> &[Dihedral] {
        let start = self.offsets[i];
        &self.tokens[start..start + self.lengths[i]]
    }
}
