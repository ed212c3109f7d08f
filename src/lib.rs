pub mod align;
pub mod batch;
pub mod dihedral;
pub mod generate;
pub mod input;
pub mod scoring;

pub use batch::{run, Args};
pub use dihedral::{Batch, Dihedral};
