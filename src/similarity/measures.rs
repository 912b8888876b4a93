// IC-based term similarity measures.
//
//   Resnik(a, b) = IC(mica)
//   Lin(a, b)    = 2 IC(mica) / (IC(a) + IC(b))
//   simRel(a, b) = Lin(a, b) * (1 - p(mica))
//
// The (1 - p(mica)) factor of simRel penalises pairs whose shared ancestor is
// a very general term. Lin and simRel are 0 when IC(a) + IC(b) is 0.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::context::{SemanticContext, SharedInformation};
use super::traits::SimilarityMeasure;
use crate::ontology::GoId;

fn lin_from(shared: &SharedInformation) -> f64 {
    let denominator = shared.ic_a + shared.ic_b;
    if denominator <= 0.0 {
        0.0
    } else {
        2.0 * shared.ic_mica / denominator
    }
}

/// Relevance similarity (Schlicker et al., 2006).
#[derive(Debug, Default, Clone, Copy)]
pub struct SimRel;

impl SimilarityMeasure for SimRel {
    fn name(&self) -> &'static str {
        "rel"
    }

    fn similarity(&self, ctx: &SemanticContext<'_>, a: GoId, b: GoId) -> Option<f64> {
        let shared = ctx.shared_information(a, b)?;
        Some(lin_from(&shared) * (1.0 - shared.frequency_mica))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Lin;

impl SimilarityMeasure for Lin {
    fn name(&self) -> &'static str {
        "lin"
    }

    fn similarity(&self, ctx: &SemanticContext<'_>, a: GoId, b: GoId) -> Option<f64> {
        ctx.shared_information(a, b).map(|s| lin_from(&s))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Resnik;

impl SimilarityMeasure for Resnik {
    fn name(&self) -> &'static str {
        "resnik"
    }

    fn similarity(&self, ctx: &SemanticContext<'_>, a: GoId, b: GoId) -> Option<f64> {
        ctx.shared_information(a, b).map(|s| s.ic_mica)
    }
}

/// Measure selector for the CLI and config.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    #[default]
    Rel,
    Lin,
    Resnik,
}

impl Measure {
    pub fn build(&self) -> Box<dyn SimilarityMeasure> {
        match self {
            Measure::Rel => Box::new(SimRel),
            Measure::Lin => Box::new(Lin),
            Measure::Resnik => Box::new(Resnik),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Measure::Rel => "rel",
            Measure::Lin => "lin",
            Measure::Resnik => "resnik",
        }
    }

    /// Whether scores are bounded to `[0, 1]`. Resnik is unbounded.
    pub fn is_normalized(&self) -> bool {
        !matches!(self, Measure::Resnik)
    }
}

impl FromStr for Measure {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rel" | "simrel" | "sim_rel" => Ok(Measure::Rel),
            "lin" => Ok(Measure::Lin),
            "resnik" => Ok(Measure::Resnik),
            other => {
                anyhow::bail!("Unknown similarity measure {other:?} (expected rel, lin or resnik)")
            }
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
