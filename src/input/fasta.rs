// FASTA reader. Only the headers matter for similarity: each header names a
// protein whose GO terms come from the association table.

use std::sync::OnceLock;

use regex_lite::Regex;

use super::{InputFormat, ParsedInput};
use crate::error::{ParseError, ParseResult};

fn uniprot_header() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:sp|tr)\|([^|\s]+)\|").expect("valid UniProt header pattern")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub accession: String,
    /// Header text after `>`.
    pub header: String,
    pub length: usize,
}

/// Accession named by a FASTA header (text after `>`).
///
/// UniProt headers (`sp|P12345|NAME_HUMAN ...`) yield the middle field;
/// anything else yields the first word.
pub fn header_accession(header: &str) -> String {
    let header = header.trim();
    if let Some(caps) = uniprot_header().captures(header) {
        return caps[1].to_string();
    }
    header
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}

pub fn parse_fasta(text: &str) -> ParseResult<Vec<FastaRecord>> {
    let mut records: Vec<FastaRecord> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            let accession = header_accession(header);
            if accession.is_empty() {
                return Err(ParseError::malformed(
                    idx + 1,
                    "FASTA header has no identifier",
                ));
            }
            records.push(FastaRecord {
                accession,
                header: header.trim().to_string(),
                length: 0,
            });
            continue;
        }

        match records.last_mut() {
            Some(record) => {
                record.length += line.chars().filter(|c| !c.is_whitespace()).count();
            }
            None => {
                return Err(ParseError::malformed(
                    idx + 1,
                    "sequence data before the first FASTA header",
                ));
            }
        }
    }

    Ok(records)
}

pub(crate) fn parse_fasta_input(text: &str) -> ParseResult<ParsedInput> {
    let records = parse_fasta(text)?;
    let mut parsed = ParsedInput::empty(InputFormat::Fasta);
    parsed.records = records.len();
    parsed.residues = records.iter().map(|r| r.length).sum();
    parsed.accessions = records.into_iter().map(|r| r.accession).collect();
    Ok(parsed)
}
