// Input files: GO-term lists, accession lists and FASTA files.
//
// Every input is reduced to a ParsedInput (raw GO ids plus raw accessions),
// then resolved against the ontology and the association table into a
// TermSet.

pub mod fasta;
pub mod golist;
pub mod termset;

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ParseResult;
use crate::ontology::GoId;

pub use termset::TermSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// GO ids separated by whitespace, commas or semicolons.
    GoList,
    /// One protein accession per line.
    Accessions,
    /// FASTA; accessions are taken from the headers.
    Fasta,
}

impl InputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::GoList => "go-list",
            InputFormat::Accessions => "accessions",
            InputFormat::Fasta => "fasta",
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An input file before resolution against the ontology.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInput {
    pub format: InputFormat,
    pub go_ids: Vec<GoId>,
    pub accessions: Vec<String>,
    /// Tokens in a GO list that are not valid GO ids.
    pub invalid_tokens: Vec<String>,
    /// Lines for lists, sequences for FASTA.
    pub records: usize,
    /// Total sequence length (FASTA only).
    pub residues: usize,
}

impl ParsedInput {
    pub(crate) fn empty(format: InputFormat) -> Self {
        Self {
            format,
            go_ids: Vec::new(),
            accessions: Vec::new(),
            invalid_tokens: Vec::new(),
            records: 0,
            residues: 0,
        }
    }
}

/// Guess the format of an input from its content.
///
/// A leading `>` means FASTA. Otherwise the file is a GO list if every token
/// is a GO id, and an accession list if not.
pub fn detect_format(text: &str) -> InputFormat {
    let first = golist::content_lines(text).next();
    match first {
        Some(line) if line.starts_with('>') => InputFormat::Fasta,
        Some(_) if golist::looks_like_go_list(text) => InputFormat::GoList,
        Some(_) => InputFormat::Accessions,
        None => InputFormat::GoList,
    }
}

/// Parse input text, detecting the format unless one is forced.
pub fn parse_input(text: &str, format: Option<InputFormat>) -> ParseResult<ParsedInput> {
    let format = format.unwrap_or_else(|| detect_format(text));
    match format {
        InputFormat::GoList => Ok(golist::parse_go_list(text)),
        InputFormat::Accessions => Ok(golist::parse_accessions(text)),
        InputFormat::Fasta => fasta::parse_fasta_input(text),
    }
}

pub fn read_input(path: &Path, format: Option<InputFormat>) -> Result<ParsedInput> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))?;
    let parsed = parse_input(&text, format)
        .with_context(|| format!("Failed to parse input file {}", path.display()))?;
    debug!(
        path = %path.display(),
        format = %parsed.format,
        go_ids = parsed.go_ids.len(),
        accessions = parsed.accessions.len(),
        "Read input file"
    );
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_fasta() {
        let text = "\n>sp|P12345|ABC_HUMAN Something\nMKV\n";
        assert_eq!(detect_format(text), InputFormat::Fasta);
    }

    #[test]
    fn test_detects_go_list() {
        let text = "# my terms\nGO:0008150, GO:0005575\nGO:0003674\n";
        assert_eq!(detect_format(text), InputFormat::GoList);
    }

    #[test]
    fn test_detects_accessions() {
        let text = "P12345\nQ8N158\n";
        assert_eq!(detect_format(text), InputFormat::Accessions);
    }

    #[test]
    fn test_forced_format_wins() {
        let parsed = parse_input("GO:0008150\n", Some(InputFormat::Accessions)).unwrap();
        assert_eq!(parsed.format, InputFormat::Accessions);
        assert_eq!(parsed.accessions, vec!["GO:0008150".to_string()]);
    }
}
