// GO identifiers, namespaces and term records.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

fn go_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^GO:(\d{7})$").expect("valid GO id pattern"))
}

/// A Gene Ontology identifier such as `GO:0008150`.
///
/// Stored as the numeric accession so it is `Copy` and orders the same way
/// as the zero-padded string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GoId(u32);

impl GoId {
    pub const fn from_number(number: u32) -> Self {
        GoId(number)
    }

    pub fn number(self) -> u32 {
        self.0
    }
}

impl FromStr for GoId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = go_id_pattern()
            .captures(s.trim())
            .ok_or_else(|| ParseError::InvalidGoId(s.to_string()))?;
        caps[1]
            .parse::<u32>()
            .map(GoId)
            .map_err(|_| ParseError::InvalidGoId(s.to_string()))
    }
}

impl TryFrom<String> for GoId {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GoId> for String {
    fn from(id: GoId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for GoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GO:{:07}", self.0)
    }
}

/// The three GO sub-ontologies.
///
/// Declaration order is the order scores are reported in (BPO, CCO, MFO).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    BiologicalProcess,
    CellularComponent,
    MolecularFunction,
}

impl Namespace {
    pub const ALL: [Namespace; 3] = [
        Namespace::BiologicalProcess,
        Namespace::CellularComponent,
        Namespace::MolecularFunction,
    ];

    /// Parse the value of an OBO `namespace:` tag.
    pub fn from_obo(value: &str) -> Option<Self> {
        match value.trim() {
            "biological_process" => Some(Namespace::BiologicalProcess),
            "cellular_component" => Some(Namespace::CellularComponent),
            "molecular_function" => Some(Namespace::MolecularFunction),
            _ => None,
        }
    }

    pub fn as_obo_str(&self) -> &'static str {
        match self {
            Namespace::BiologicalProcess => "biological_process",
            Namespace::CellularComponent => "cellular_component",
            Namespace::MolecularFunction => "molecular_function",
        }
    }

    /// Three-letter label used in reports.
    pub fn short_label(&self) -> &'static str {
        match self {
            Namespace::BiologicalProcess => "BPO",
            Namespace::CellularComponent => "CCO",
            Namespace::MolecularFunction => "MFO",
        }
    }

    /// The top-level term of this namespace.
    pub fn root(&self) -> GoId {
        match self {
            Namespace::BiologicalProcess => GoId(8150),
            Namespace::CellularComponent => GoId(5575),
            Namespace::MolecularFunction => GoId(3674),
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_label())
    }
}

/// One `[Term]` stanza from an OBO file.
#[derive(Debug, Clone, PartialEq)]
pub struct GoTerm {
    pub id: GoId,
    pub name: String,
    pub namespace: Namespace,
    pub is_a: Vec<GoId>,
    pub part_of: Vec<GoId>,
    pub alt_ids: Vec<GoId>,
    pub is_obsolete: bool,
    pub replaced_by: Vec<GoId>,
    pub consider: Vec<GoId>,
}

impl GoTerm {
    pub fn new(id: GoId, name: impl Into<String>, namespace: Namespace) -> Self {
        Self {
            id,
            name: name.into(),
            namespace,
            is_a: Vec::new(),
            part_of: Vec::new(),
            alt_ids: Vec::new(),
            is_obsolete: false,
            replaced_by: Vec::new(),
            consider: Vec::new(),
        }
    }
}
