// Command pipelines: loading resources, comparing inputs and per-file stats.

pub mod compare;
pub mod resources;
pub mod stats;

pub use compare::{
    compare_matrix, compare_pair, compare_terms, load_inputs, LoadedInput, PairResult,
    TermPairResult,
};
pub use resources::Resources;
pub use stats::{file_stats, FileStats};
