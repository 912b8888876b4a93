// Per-file statistics: what an input contains once it is resolved against
// the ontology, and how informative and coherent its terms are.

use serde::Serialize;

use super::compare::LoadedInput;
use super::resources::Resources;
use crate::input::InputFormat;
use crate::ontology::Namespace;
use crate::similarity::SetComparer;

#[derive(Debug, Clone, Serialize)]
pub struct NamespaceStats {
    pub namespace: Namespace,
    pub terms: usize,
    /// Mean information content of the terms.
    pub mean_ic: Option<f64>,
    /// Mean longest is_a path to the namespace root.
    pub mean_depth: Option<f64>,
    /// Mean pairwise similarity between distinct terms.
    pub coherence: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileStats {
    pub label: String,
    pub format: InputFormat,
    /// Lines for lists, sequences for FASTA.
    pub records: usize,
    pub residues: usize,
    pub go_ids: usize,
    pub invalid_tokens: usize,
    pub accessions: usize,
    pub mapped_accessions: usize,
    pub unmapped_accessions: usize,
    pub unknown_terms: usize,
    pub obsolete_terms: usize,
    pub remapped_terms: usize,
    pub replaced_terms: usize,
    pub total_terms: usize,
    pub namespaces: Vec<NamespaceStats>,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

pub fn file_stats(
    resources: &Resources,
    comparer: &mut SetComparer<'_>,
    input: &LoadedInput,
) -> FileStats {
    let ctx = resources.context();
    let set = &input.terms;

    let namespaces = Namespace::ALL
        .iter()
        .map(|&namespace| {
            let terms = set.namespace_terms(namespace);
            NamespaceStats {
                namespace,
                terms: terms.len(),
                mean_ic: mean(terms.iter().map(|t| ctx.information_content(*t))),
                mean_depth: mean(
                    terms
                        .iter()
                        .filter_map(|t| resources.dag.depth(*t))
                        .map(|d| d as f64),
                ),
                coherence: comparer.mean_pairwise(&terms),
            }
        })
        .collect();

    FileStats {
        label: input.label.clone(),
        format: input.parsed.format,
        records: input.parsed.records,
        residues: input.parsed.residues,
        go_ids: input.parsed.go_ids.len(),
        invalid_tokens: input.parsed.invalid_tokens.len(),
        accessions: input.parsed.accessions.len(),
        mapped_accessions: set.mapped_accessions,
        unmapped_accessions: set.unmapped_accessions.len(),
        unknown_terms: set.unknown.len(),
        obsolete_terms: set.obsolete.len(),
        remapped_terms: set.remapped.len(),
        replaced_terms: set.replaced.len(),
        total_terms: set.len(),
        namespaces,
    }
}
