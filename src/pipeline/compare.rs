// Comparison pipeline: term pairs, file pairs and all-pairs matrices.

use std::path::{Path, PathBuf};

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::resources::Resources;
use crate::input::{self, InputFormat, ParsedInput, TermSet};
use crate::ontology::{GoId, Namespace, Resolution};
use crate::similarity::{Measure, SetComparer, SetSimilarity};

/// An input file read and resolved against the loaded resources.
#[derive(Debug, Clone)]
pub struct LoadedInput {
    pub path: PathBuf,
    pub label: String,
    pub parsed: ParsedInput,
    pub terms: TermSet,
}

impl LoadedInput {
    pub fn new(path: &Path, parsed: ParsedInput, resources: &Resources) -> Self {
        let terms = TermSet::build(&parsed, &resources.dag, &resources.associations);
        Self {
            path: path.to_path_buf(),
            label: path.display().to_string(),
            parsed,
            terms,
        }
    }
}

/// Read and resolve every input path. Fails on the first unreadable file.
pub fn load_inputs(
    resources: &Resources,
    paths: &[PathBuf],
    format: Option<InputFormat>,
) -> Result<Vec<LoadedInput>> {
    let mut inputs = Vec::with_capacity(paths.len());
    for path in paths {
        let parsed = input::read_input(path, format)?;
        let loaded = LoadedInput::new(path, parsed, resources);
        if loaded.terms.is_empty() {
            warn!(path = %path.display(), "Input has no usable GO terms");
        }
        inputs.push(loaded);
    }
    Ok(inputs)
}

/// Similarity of two inputs.
#[derive(Debug, Clone, Serialize)]
pub struct PairResult {
    pub left: String,
    pub right: String,
    pub similarity: SetSimilarity,
}

pub fn compare_pair(
    comparer: &mut SetComparer<'_>,
    left: &LoadedInput,
    right: &LoadedInput,
) -> PairResult {
    let similarity = comparer.compare(&left.terms, &right.terms);
    debug!(left = %left.label, right = %right.label, ?similarity, "Compared inputs");
    PairResult {
        left: left.label.clone(),
        right: right.label.clone(),
        similarity,
    }
}

/// Compare every unordered pair of inputs, in input order.
pub fn compare_matrix(
    comparer: &mut SetComparer<'_>,
    inputs: &[LoadedInput],
    show_progress: bool,
) -> Vec<PairResult> {
    let total = inputs.len() * inputs.len().saturating_sub(1) / 2;

    let pb = if show_progress {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Comparing [{bar:30}] {pos}/{len} ({eta})")
                .expect("valid template"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut results = Vec::with_capacity(total);
    for (i, left) in inputs.iter().enumerate() {
        for right in &inputs[i + 1..] {
            results.push(compare_pair(comparer, left, right));
            pb.inc(1);
        }
    }
    pb.finish_and_clear();

    let (pairs, hits) = comparer.cache_stats();
    info!(
        comparisons = results.len(),
        term_pairs = pairs,
        cache_hits = hits,
        "Matrix complete"
    );
    results
}

/// One GO term as reported in a term comparison.
#[derive(Debug, Clone, Serialize)]
pub struct TermInfo {
    pub requested: GoId,
    pub id: GoId,
    pub name: String,
    pub namespace: Namespace,
    pub information_content: f64,
    pub frequency: f64,
}

/// Detailed similarity of two GO terms.
#[derive(Debug, Clone, Serialize)]
pub struct TermPairResult {
    pub measure: Measure,
    pub a: TermInfo,
    pub b: TermInfo,
    pub mica: Option<TermInfo>,
    pub score: Option<f64>,
}

fn term_info(resources: &Resources, requested: GoId) -> Result<TermInfo> {
    let id = match resources.dag.resolve(requested) {
        Resolution::Unknown(_) => anyhow::bail!("{requested} is not in the ontology"),
        Resolution::Obsolete(_) => {
            anyhow::bail!("{requested} is obsolete and has no replacement")
        }
        resolution => resolution.term().unwrap_or(requested),
    };
    if id != requested {
        info!(%requested, resolved = %id, "Using primary term");
    }

    let ctx = resources.context();
    let (name, namespace) = match resources.dag.get(id) {
        Some(term) => (term.name.clone(), term.namespace),
        None => anyhow::bail!("{id} is not in the ontology"),
    };
    Ok(TermInfo {
        requested,
        id,
        name,
        namespace,
        information_content: ctx.information_content(id),
        frequency: ctx.frequency(id),
    })
}

/// Similarity of two single GO terms with the IC details behind it.
pub fn compare_terms(
    resources: &Resources,
    measure: Measure,
    a: GoId,
    b: GoId,
) -> Result<TermPairResult> {
    let a = term_info(resources, a)?;
    let b = term_info(resources, b)?;
    let ctx = resources.context();

    if a.namespace != b.namespace {
        warn!(
            a = %a.id,
            b = %b.id,
            "Terms belong to different namespaces, similarity is undefined"
        );
    }

    let mica = match ctx.mica(a.id, b.id) {
        Some(id) => Some(term_info(resources, id)?),
        None => None,
    };
    let score = measure.build().similarity(&ctx, a.id, b.id);

    Ok(TermPairResult {
        measure,
        a,
        b,
        mica,
        score,
    })
}
