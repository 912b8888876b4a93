// Loading the ontology and the association table.
//
// Everything downstream borrows from a single Resources value: parse the OBO
// file, index ancestors, parse associations, then count annotations. The
// go-basic.obo file is ~45k terms, so this is the slow part of every run.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use crate::annotations::{AssociationParser, Associations, TermCounts};
use crate::ontology::{AncestorIndex, GoDag, GoTerm, OboParser, Relations};
use crate::similarity::SemanticContext;

pub struct Resources {
    pub dag: GoDag,
    pub ancestors: AncestorIndex,
    pub associations: Associations,
    pub counts: TermCounts,
}

impl Resources {
    pub fn load(obo_path: &Path, associations_path: &Path, relations: Relations) -> Result<Self> {
        let started = Instant::now();

        let terms = OboParser::parse_file(obo_path)
            .with_context(|| format!("Failed to parse ontology {}", obo_path.display()))?;
        if terms.is_empty() {
            anyhow::bail!("Ontology {} contains no [Term] stanzas", obo_path.display());
        }
        info!(terms = terms.len(), path = %obo_path.display(), "Loaded ontology");

        let associations = AssociationParser::parse_file(associations_path).with_context(|| {
            format!(
                "Failed to parse association file {}",
                associations_path.display()
            )
        })?;
        info!(
            proteins = associations.len(),
            path = %associations_path.display(),
            "Loaded associations"
        );

        let resources = Self::from_parts(terms, associations, relations);
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Resources ready"
        );
        Ok(resources)
    }

    /// Build resources from already-parsed parts.
    pub fn from_parts(terms: Vec<GoTerm>, associations: Associations, relations: Relations) -> Self {
        let dag = GoDag::from_terms(terms);
        let ancestors = dag.ancestor_index(relations);
        let counts = TermCounts::new(&dag, &ancestors, &associations);
        Self {
            dag,
            ancestors,
            associations,
            counts,
        }
    }

    pub fn relations(&self) -> Relations {
        self.ancestors.relations()
    }

    pub fn context(&self) -> SemanticContext<'_> {
        SemanticContext::new(&self.dag, &self.ancestors, &self.counts)
    }
}
