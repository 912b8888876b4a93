// Mega-GO: relevance semantic similarity between sets of GO terms
//
// This is the library root. Each module corresponds to one stage of the
// comparison: ontology and annotations are loaded once, inputs are resolved
// to term sets, and the similarity module scores them.

pub mod annotations;
pub mod config;
#[cfg(feature = "download")]
pub mod download;
pub mod error;
pub mod input;
pub mod ontology;
pub mod output;
pub mod pipeline;
pub mod similarity;
pub mod status;

#[cfg(feature = "web")]
pub mod web;
