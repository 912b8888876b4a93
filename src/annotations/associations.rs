// Association table parser.
//
// Two layouts are accepted, detected line by line:
//
//   tab table:  P12345<TAB>GO:0005737; GO:0016787
//   GAF 2.x:    DB<TAB>P12345<TAB>SYMBOL<TAB>QUALIFIER<TAB>GO:0005737<TAB>... (15+ columns)
//
// The bundled uniprot-sp table uses the first layout. GAF rows with a NOT
// qualifier are negative annotations and are dropped.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{ParseError, ParseResult};
use crate::ontology::GoId;

/// Minimum column count of a GAF 2.x row.
const GAF_COLUMNS: usize = 15;

/// Protein accession → annotated GO ids.
#[derive(Debug, Default, Clone)]
pub struct Associations {
    by_accession: HashMap<String, BTreeSet<GoId>>,
    /// Uppercased accession → accession as stored, for case-insensitive lookup.
    folded: HashMap<String, String>,
    /// GO ids in the file that did not parse.
    pub skipped_terms: usize,
    /// GAF rows dropped for a NOT qualifier.
    pub negated: usize,
}

impl Associations {
    pub fn insert(&mut self, accession: &str, term: GoId) {
        if !self.by_accession.contains_key(accession) {
            self.folded
                .insert(accession.to_uppercase(), accession.to_string());
        }
        self.by_accession
            .entry(accession.to_string())
            .or_default()
            .insert(term);
    }

    /// Look up an accession. Tries an exact match, then a case-insensitive
    /// one, then the accession with a single isoform suffix (`P12345-2`)
    /// removed.
    pub fn lookup(&self, accession: &str) -> Option<&BTreeSet<GoId>> {
        let accession = accession.trim();
        if let Some(terms) = self.lookup_exact(accession) {
            return Some(terms);
        }
        match accession.rsplit_once('-') {
            Some((base, isoform))
                if !base.is_empty()
                    && !isoform.is_empty()
                    && isoform.chars().all(|c| c.is_ascii_digit()) =>
            {
                self.lookup_exact(base)
            }
            _ => None,
        }
    }

    fn lookup_exact(&self, accession: &str) -> Option<&BTreeSet<GoId>> {
        if let Some(terms) = self.by_accession.get(accession) {
            return Some(terms);
        }
        let stored = self.folded.get(&accession.to_uppercase())?;
        self.by_accession.get(stored)
    }

    /// Number of annotated proteins.
    pub fn len(&self) -> usize {
        self.by_accession.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_accession.is_empty()
    }

    /// Total number of (protein, term) pairs.
    pub fn annotation_count(&self) -> usize {
        self.by_accession.values().map(BTreeSet::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<GoId>)> {
        self.by_accession.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Stateless parser for association files.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssociationParser;

impl AssociationParser {
    pub fn parse_file(path: &Path) -> ParseResult<Associations> {
        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }

    pub fn parse_str(text: &str) -> ParseResult<Associations> {
        Self::parse(text.as_bytes())
    }

    pub fn parse<R: BufRead>(reader: R) -> ParseResult<Associations> {
        let mut associations = Associations::default();

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line?;
            let line = line.trim_end_matches(['\r', '\n']);

            if line.trim().is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let columns: Vec<&str> = line.split('\t').collect();
            if columns.len() >= GAF_COLUMNS {
                parse_gaf_row(&columns, &mut associations);
            } else if columns.len() == 2 {
                parse_table_row(&columns, &mut associations);
            } else {
                return Err(ParseError::malformed(
                    line_no,
                    format!(
                        "expected 2 (table) or at least {GAF_COLUMNS} (GAF) tab-separated columns, found {}",
                        columns.len()
                    ),
                ));
            }
        }

        if associations.skipped_terms > 0 {
            warn!(
                skipped = associations.skipped_terms,
                "Skipped malformed GO ids in association file"
            );
        }
        debug!(
            proteins = associations.len(),
            annotations = associations.annotation_count(),
            negated = associations.negated,
            "Parsed associations"
        );
        Ok(associations)
    }
}

fn parse_table_row(columns: &[&str], associations: &mut Associations) {
    let accession = columns[0].trim();
    if accession.is_empty() {
        return;
    }
    for token in columns[1].split(';').map(str::trim).filter(|t| !t.is_empty()) {
        match token.parse::<GoId>() {
            Ok(id) => associations.insert(accession, id),
            Err(_) => associations.skipped_terms += 1,
        }
    }
}

fn parse_gaf_row(columns: &[&str], associations: &mut Associations) {
    let accession = columns[1].trim();
    let qualifier = columns[3];
    if qualifier.split('|').any(|q| q.trim() == "NOT") {
        associations.negated += 1;
        return;
    }
    match columns[4].parse::<GoId>() {
        Ok(id) if !accession.is_empty() => associations.insert(accession, id),
        Ok(_) => {}
        Err(_) => associations.skipped_terms += 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> GoId {
        s.parse().unwrap()
    }

    #[test]
    fn test_table_layout() {
        let text = "# header\nP12345\tGO:0005737; GO:0016787\nQ99999\tGO:0008150\n";
        let assoc = AssociationParser::parse_str(text).unwrap();
        assert_eq!(assoc.len(), 2);
        assert_eq!(assoc.annotation_count(), 3);
        assert!(assoc.lookup("P12345").unwrap().contains(&id("GO:0016787")));
    }

    #[test]
    fn test_gaf_layout_drops_not_qualifier() {
        let row = |qualifier: &str, go: &str| {
            format!(
                "UniProtKB\tP12345\tABC1\t{qualifier}\t{go}\tPMID:1\tIDA\t\tC\tname\t\tprotein\ttaxon:9606\t20200101\tUniProt"
            )
        };
        let text = format!(
            "!gaf-version: 2.2\n{}\n{}\n",
            row("located_in", "GO:0005737"),
            row("NOT|enables", "GO:0016787")
        );
        let assoc = AssociationParser::parse_str(&text).unwrap();
        assert_eq!(assoc.annotation_count(), 1);
        assert_eq!(assoc.negated, 1);
    }

    #[test]
    fn test_bad_go_ids_are_counted_not_fatal() {
        let text = "P1\tGO:0005737;GO:12;not-a-term\n";
        let assoc = AssociationParser::parse_str(text).unwrap();
        assert_eq!(assoc.annotation_count(), 1);
        assert_eq!(assoc.skipped_terms, 2);
    }

    #[test]
    fn test_wrong_column_count_is_an_error() {
        let text = "P1\tGO:0005737\n\nP2\tA\tB\n";
        match AssociationParser::parse_str(text) {
            Err(ParseError::Malformed { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[test]
    fn test_lookup_fallbacks() {
        let assoc = AssociationParser::parse_str("P12345\tGO:0005737\n").unwrap();
        assert!(assoc.lookup("p12345").is_some());
        assert!(assoc.lookup("P12345-2").is_some());
        assert!(assoc.lookup("P12345-X").is_none());
        assert!(assoc.lookup("O00000").is_none());
    }

    #[test]
    fn test_isoform_suffix_must_be_one_numeric_level() {
        let assoc = AssociationParser::parse_str("P12345\tGO:0005737\n").unwrap();
        assert!(assoc.lookup("P12345-").is_none());
        assert!(assoc.lookup("P12345-2-3").is_none());
        assert!(assoc.lookup("p12345-2").is_some());
    }
}
