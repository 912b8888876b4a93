// Gene Ontology graph: OBO parsing, term model and DAG traversal.

pub mod dag;
pub mod obo;
pub mod term;

pub use dag::{AncestorIndex, GoDag, Relations, Resolution};
pub use obo::OboParser;
pub use term::{GoId, GoTerm, Namespace};
