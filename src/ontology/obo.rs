// OBO 1.2 flat-file parser for the Gene Ontology.
//
// Only `[Term]` stanzas are read. The header and `[Typedef]` stanzas are
// skipped. Of the `relationship:` tags only `part_of` is kept, because that is
// the only non-is_a edge the similarity code can follow.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use super::term::{GoId, GoTerm, Namespace};
use crate::error::{ParseError, ParseResult};

/// Stateless parser for `go-basic.obo` style files.
#[derive(Debug, Default, Clone, Copy)]
pub struct OboParser;

impl OboParser {
    pub fn parse_file(path: &Path) -> ParseResult<Vec<GoTerm>> {
        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }

    pub fn parse_str(text: &str) -> ParseResult<Vec<GoTerm>> {
        Self::parse(text.as_bytes())
    }

    pub fn parse<R: BufRead>(reader: R) -> ParseResult<Vec<GoTerm>> {
        let mut terms = Vec::new();
        let mut current: Option<StanzaBuilder> = None;

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('!') {
                continue;
            }

            if line.starts_with('[') {
                if let Some(builder) = current.take() {
                    terms.push(builder.finish()?);
                }
                if line == "[Term]" {
                    current = Some(StanzaBuilder::new(line_no));
                }
                continue;
            }

            let Some(builder) = current.as_mut() else {
                continue;
            };

            let Some((tag, value)) = line.split_once(':') else {
                return Err(ParseError::malformed(
                    line_no,
                    format!("expected `tag: value`, got {line:?}"),
                ));
            };
            builder.apply(tag.trim(), value.trim(), line_no)?;
        }

        if let Some(builder) = current.take() {
            terms.push(builder.finish()?);
        }

        debug!(terms = terms.len(), "Parsed OBO term stanzas");
        Ok(terms)
    }
}

/// The first whitespace-separated token of a tag value. Drops trailing
/// qualifier blocks (`{...}`) and `! comment` text.
fn leading_token(value: &str) -> &str {
    value.split_whitespace().next().unwrap_or("")
}

fn parse_id(value: &str, line_no: usize) -> ParseResult<GoId> {
    let token = leading_token(value);
    token
        .parse()
        .map_err(|_| ParseError::malformed(line_no, format!("invalid GO id {token:?}")))
}

struct StanzaBuilder {
    start_line: usize,
    id: Option<GoId>,
    name: String,
    namespace: Option<Namespace>,
    is_a: Vec<GoId>,
    part_of: Vec<GoId>,
    alt_ids: Vec<GoId>,
    is_obsolete: bool,
    replaced_by: Vec<GoId>,
    consider: Vec<GoId>,
}

impl StanzaBuilder {
    fn new(start_line: usize) -> Self {
        Self {
            start_line,
            id: None,
            name: String::new(),
            namespace: None,
            is_a: Vec::new(),
            part_of: Vec::new(),
            alt_ids: Vec::new(),
            is_obsolete: false,
            replaced_by: Vec::new(),
            consider: Vec::new(),
        }
    }

    fn apply(&mut self, tag: &str, value: &str, line_no: usize) -> ParseResult<()> {
        match tag {
            "id" => self.id = Some(parse_id(value, line_no)?),
            "name" => self.name = value.to_string(),
            "namespace" => {
                let namespace = Namespace::from_obo(value).ok_or_else(|| {
                    ParseError::malformed(line_no, format!("unknown namespace {value:?}"))
                })?;
                self.namespace = Some(namespace);
            }
            "is_a" => self.is_a.push(parse_id(value, line_no)?),
            "alt_id" => self.alt_ids.push(parse_id(value, line_no)?),
            "replaced_by" => self.replaced_by.push(parse_id(value, line_no)?),
            "consider" => self.consider.push(parse_id(value, line_no)?),
            "is_obsolete" => self.is_obsolete = leading_token(value) == "true",
            "relationship" => {
                let mut parts = value.split_whitespace();
                if parts.next() == Some("part_of") {
                    let target = parts.next().unwrap_or("");
                    self.part_of.push(parse_id(target, line_no)?);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn finish(self) -> ParseResult<GoTerm> {
        let id = self
            .id
            .ok_or_else(|| ParseError::malformed(self.start_line, "[Term] stanza has no id"))?;
        let namespace = self.namespace.ok_or_else(|| {
            ParseError::malformed(self.start_line, format!("{id} has no namespace"))
        })?;

        Ok(GoTerm {
            id,
            name: self.name,
            namespace,
            is_a: self.is_a,
            part_of: self.part_of,
            alt_ids: self.alt_ids,
            is_obsolete: self.is_obsolete,
            replaced_by: self.replaced_by,
            consider: self.consider,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
format-version: 1.2
ontology: go

[Term]
id: GO:0008150
name: biological_process
namespace: biological_process

[Term]
id: GO:0009987
name: cellular process
namespace: biological_process
alt_id: GO:0008151
is_a: GO:0008150 ! biological_process
relationship: part_of GO:0008150 ! biological_process
relationship: regulates GO:0008150 ! biological_process

[Term]
id: GO:0000004
name: obsolete biological process unknown
namespace: biological_process
is_obsolete: true
replaced_by: GO:0008150

[Typedef]
id: part_of
name: part of
";

    #[test]
    fn test_parses_terms_and_skips_typedefs() {
        let terms = OboParser::parse_str(SAMPLE).unwrap();
        assert_eq!(terms.len(), 3);
        assert_eq!(terms[0].name, "biological_process");
    }

    #[test]
    fn test_comments_and_relationships() {
        let terms = OboParser::parse_str(SAMPLE).unwrap();
        let cellular = &terms[1];
        let root: GoId = "GO:0008150".parse().unwrap();
        assert_eq!(cellular.is_a, vec![root]);
        // regulates is dropped, part_of kept
        assert_eq!(cellular.part_of, vec![root]);
        assert_eq!(cellular.alt_ids.len(), 1);
    }

    #[test]
    fn test_obsolete_flags() {
        let terms = OboParser::parse_str(SAMPLE).unwrap();
        let obsolete = &terms[2];
        assert!(obsolete.is_obsolete);
        assert_eq!(obsolete.replaced_by[0].to_string(), "GO:0008150");
    }

    #[test]
    fn test_qualifier_block_is_ignored() {
        let text = "[Term]\nid: GO:0000001\nname: x\nnamespace: biological_process\nis_a: GO:0008150 {source=\"x\"} ! bp\n";
        let terms = OboParser::parse_str(text).unwrap();
        assert_eq!(terms[0].is_a[0].to_string(), "GO:0008150");
    }

    #[test]
    fn test_missing_id_reports_stanza_line() {
        let text = "[Term]\nname: nameless\nnamespace: biological_process\n";
        match OboParser::parse_str(text) {
            Err(ParseError::Malformed { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_namespace_is_an_error() {
        let text = "[Term]\nid: GO:0000001\nnamespace: external\n";
        assert!(OboParser::parse_str(text).is_err());
    }
}
