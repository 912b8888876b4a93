pub mod compare;
pub mod stats;
pub mod status;
pub mod term;
