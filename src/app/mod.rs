pub mod seed;

pub use seed::{apply_seed, SeedReport};
