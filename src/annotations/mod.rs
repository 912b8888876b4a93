// Protein → GO term annotations and the term frequencies derived from them.

pub mod associations;
pub mod counts;

pub use associations::{AssociationParser, Associations};
pub use counts::TermCounts;
