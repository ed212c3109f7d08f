use clap::Parser;
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::time::Instant;

use crate::align::smith_waterman;
use crate::dihedral::Batch;
use crate::input::{read_batch, InputError};
use crate::scoring::ScoringParams;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "dihedralign",
    version,
    about = "Sequential Smith-Waterman reference scorer for dihedral-angle sequences"
)]
pub struct Args {
    /// Input batch file (reads stdin when omitted)
    pub input: Option<String>,

    /// Shifts the zero-crossing of the similarity score; larger values
    /// reward more dissimilar token pairs with still-positive scores
    #[arg(long, allow_negative_numbers = true)]
    pub scoring_offset: i64,

    /// Cost added per unit of unaligned sequence; must be <= 0 to act as
    /// a penalty
    #[arg(long, allow_negative_numbers = true)]
    pub gap_penalty: i64,

    /// Number of worker threads for pair-level parallelism (the matrix
    /// fill itself always stays sequential)
    #[arg(short, long, default_value_t = 1)]
    pub threads: usize,

    /// Print timing and cell-count statistics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Work accounting for one report, mirroring the counters the hardware
/// driver prints alongside its results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStats {
    /// Number of sequence pairs aligned.
    pub pairs: u64,
    /// Total matrix cells filled across all pairs (boundary cells excluded).
    pub cells: u64,
}

/// Write the triangular score report for every unordered sequence pair.
///
/// Rows are grouped by the outer index `i`; within a row the scores for all
/// `j > i` may be computed in parallel, but they are collected in `j` order
/// and each matrix is filled sequentially, so the emitted bytes are
/// identical for any thread count. A trailing blank line terminates the
/// report even when no pairs exist.
pub fn write_report<W: Write>(
    batch: &Batch,
    params: &ScoringParams,
    gap_penalty: i64,
    out: &mut W,
) -> io::Result<ReportStats> {
    let n = batch.len();
    let mut stats = ReportStats::default();

    for i in 0..n.saturating_sub(1) {
        let ver = batch.sequence(i);
        let scores: Vec<i64> = (i + 1..n)
            .into_par_iter()
            .map(|j| smith_waterman(ver, batch.sequence(j), gap_penalty, params))
            .collect();

        stats.pairs += scores.len() as u64;
        for j in i + 1..n {
            stats.cells += ver.len() as u64 * batch.sequence(j).len() as u64;
        }

        let rendered: Vec<String> = scores.iter().map(i64::to_string).collect();
        writeln!(out, "#{}.\t{}", i, rendered.join(" "))?;
    }
    writeln!(out)?;

    Ok(stats)
}

pub fn run(args: Args) -> Result<(), InputError> {
    // Only initialize the thread pool if not already initialized
    let _ = rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build_global();

    let batch = match &args.input {
        Some(path) => read_batch(BufReader::new(File::open(path)?))?,
        None => read_batch(io::stdin().lock())?,
    };

    if args.verbose {
        eprintln!(
            "Loaded {} sequences ({} tokens)",
            batch.len(),
            batch.total_tokens()
        );
    }

    let params = ScoringParams::new(args.scoring_offset);
    let started = Instant::now();

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let stats = write_report(&batch, &params, args.gap_penalty, &mut out)?;
    out.flush()?;

    if args.verbose {
        eprintln!(
            "Elapsed time: {:.6} seconds\nNumber of cells: {}",
            started.elapsed().as_secs_f64(),
            stats.cells
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dihedral::Dihedral;

    fn report(text: &str, scoring_offset: i64, gap_penalty: i64) -> String {
        let batch = read_batch(text.as_bytes()).unwrap();
        let params = ScoringParams::new(scoring_offset);
        let mut out = Vec::new();
        write_report(&batch, &params, gap_penalty, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_identical_single_token_pair() {
        // identical tokens, zero distance: score equals the offset
        let out = report("2\n1 1\n0 0\n0 0\n", 100, -5);
        assert_eq!(out, "#0.\t100\n\n");
    }

    #[test]
    fn test_three_sequences_all_floored_to_zero() {
        // the mismatch pair floors at 0, the identical pairs score the
        // offset, which is also 0
        let out = report("3\n1 1 1\n0 0\n32768 0\n0 0\n", 0, -10);
        assert_eq!(out, "#0.\t0 0\n#1.\t0\n\n");
    }

    #[test]
    fn test_single_sequence_emits_only_blank_line() {
        let out = report("1\n3\n1 2 3 4 5 6\n", 10, -1);
        assert_eq!(out, "\n");
    }

    #[test]
    fn test_empty_sequence_pairs_score_zero() {
        let out = report("2\n0 2\n7 8 9 10\n", 100, -5);
        assert_eq!(out, "#0.\t0\n\n");
    }

    #[test]
    fn test_row_grouping_and_order() {
        let out = report(
            "4\n1 1 1 1\n0 0\n0 0\n1 0\n0 1\n",
            100,
            -5,
        );
        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines.len(), 5); // three rows, blank line, trailing ""
        assert!(lines[0].starts_with("#0.\t"));
        assert!(lines[1].starts_with("#1.\t"));
        assert!(lines[2].starts_with("#2.\t"));
        assert_eq!(lines[3], "");
        // row 0 compares against j = 1, 2, 3
        assert_eq!(lines[0], "#0.\t100 99 99");
    }

    #[test]
    fn test_report_is_deterministic() {
        let text = "3\n2 1 2\n5 6 7 8\n9 10\n11 12 13 14\n";
        let first = report(text, 500, -50);
        let second = report(text, 500, -50);
        assert_eq!(first, second);
    }

    #[test]
    fn test_stats_count_pairs_and_cells() {
        let batch = Batch::new(
            vec![Dihedral::new(0, 0); 6],
            vec![3, 2, 1],
        );
        let params = ScoringParams::new(0);
        let mut out = Vec::new();
        let stats = write_report(&batch, &params, -1, &mut out).unwrap();
        assert_eq!(stats.pairs, 3);
        // 3*2 + 3*1 + 2*1
        assert_eq!(stats.cells, 11);
    }
}
