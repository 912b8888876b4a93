// Plain-text lists: GO ids or protein accessions.

use super::{InputFormat, ParsedInput};
use crate::ontology::GoId;

/// Non-empty lines with `#` comments removed.
pub fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(|line| line.split_once('#').map_or(line, |(before, _)| before).trim())
        .filter(|line| !line.is_empty())
}

fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|t| !t.is_empty())
}

/// True when the text has at least one token and every token is a GO id.
pub fn looks_like_go_list(text: &str) -> bool {
    let mut any = false;
    for token in content_lines(text).flat_map(|line| tokens(line)) {
        if token.parse::<GoId>().is_err() {
            return false;
        }
        any = true;
    }
    any
}

pub fn parse_go_list(text: &str) -> ParsedInput {
    let mut parsed = ParsedInput::empty(InputFormat::GoList);
    for line in content_lines(text) {
        parsed.records += 1;
        for token in tokens(line) {
            match token.parse::<GoId>() {
                Ok(id) => parsed.go_ids.push(id),
                Err(_) => parsed.invalid_tokens.push(token.to_string()),
            }
        }
    }
    parsed
}

/// One accession per line; anything after the first token is ignored.
pub fn parse_accessions(text: &str) -> ParsedInput {
    let mut parsed = ParsedInput::empty(InputFormat::Accessions);
    for line in content_lines(text) {
        parsed.records += 1;
        if let Some(accession) = tokens(line).next() {
            parsed.accessions.push(accession.to_string());
        }
    }
    parsed
}
