//! Database layer (in-memory document store).

pub mod memory;
pub mod seed;

pub use memory::MemoryDb;
pub use seed::{apply_seed, load_seed_file, SeedData, SeedError, SeedSummary};
