use dihedralign::generate::{random_batch, write_batch};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufWriter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // optional seed argument for reproducible batches
    let seed = std::env::args()
        .nth(1)
        .map(|s| s.parse::<u64>())
        .transpose()?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let batch = random_batch(&mut rng);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_batch(&batch, &mut out)?;

    Ok(())
}
