//! Benchmark comparatif de designs existants

use crate::design::{DesignId, ScoredDesign};
use crate::error::{Result, RnaiError};
use crate::math::{clamp01, max, mean, variance};
use crate::noise::NoiseSource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Seuil de succès rapporté (jamais utilisé comme filtre)
pub const SUCCESS_THRESHOLD: f64 = 0.7;

/// Axe de comparaison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenchmarkAxis {
    Efficiency,
    Specificity,
    Safety,
}

impl BenchmarkAxis {
    pub fn as_str(self) -> &'static str {
        match self {
            BenchmarkAxis::Efficiency => "efficiency",
            BenchmarkAxis::Specificity => "specificity",
            BenchmarkAxis::Safety => "safety",
        }
    }
}

impl fmt::Display for BenchmarkAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BenchmarkAxis {
    type Err = RnaiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "efficiency" => Ok(BenchmarkAxis::Efficiency),
            "specificity" => Ok(BenchmarkAxis::Specificity),
            "safety" => Ok(BenchmarkAxis::Safety),
            other => Err(RnaiError::InvalidArgument(format!(
                "Axe de benchmark non supporté: {}",
                other
            ))),
        }
    }
}

/// Classement d'un design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRanking {
    /// Rang 1-based
    pub rank: usize,
    pub design_id: DesignId,
    pub composite_score: f64,
    pub specificity_score: f64,
    pub efficacy_prediction: f64,
}

/// Métriques agrégées sur les scores composites
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub mean_score: f64,
    pub variance: f64,
    pub max_score: f64,
    pub success_threshold: f64,
    /// Part des designs au-dessus du seuil
    pub success_rate: f64,
}

/// Comparaison par paires (forme de sortie réservée)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairwiseComparison {
    pub design_a: DesignId,
    pub design_b: DesignId,
    pub score_difference: f64,
    pub p_value: f64,
}

/// Analyse comparative: présente dans la sortie, jamais remplie
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparativeAnalysis {
    pub pairwise_comparisons: Vec<PairwiseComparison>,
    pub effect_sizes: BTreeMap<String, f64>,
}

/// Résultat d'un benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub axis: BenchmarkAxis,
    pub rankings: Vec<DesignRanking>,
    pub aggregate: AggregateMetrics,
    pub comparisons: ComparativeAnalysis,
}

/// Fraction d'off-targets prédits, rapportée à 10 et bornée à 1
pub fn off_target_fraction(design: &ScoredDesign) -> f64 {
    (design.off_target.total_predicted_targets as f64 / 10.0).min(1.0)
}

/// Score composite d'un design sur un axe
pub fn composite_score(design: &ScoredDesign, axis: BenchmarkAxis, noise: &mut dyn NoiseSource) -> f64 {
    let score = match axis {
        BenchmarkAxis::Efficiency => mean(&[
            design.efficacy_prediction,
            design.thermodynamics.asymmetry_score,
        ]),
        BenchmarkAxis::Specificity => mean(&[
            design.specificity_score,
            1.0 - off_target_fraction(design),
        ]),
        BenchmarkAxis::Safety => {
            let cytotoxicity = clamp01(1.0 - (1.0 - design.specificity_score) * 0.5 + noise.jitter(0.05));
            let immune = clamp01(0.85 + noise.jitter(0.1));
            mean(&[design.specificity_score, cytotoxicity, immune])
        }
    };
    clamp01(score)
}

/// Classe les designs sur un axe (rang 1-based, décroissant, stable en cas d'égalité)
pub fn benchmark(designs: &[ScoredDesign], axis: BenchmarkAxis, noise: &mut dyn NoiseSource) -> BenchmarkResult {
    let mut scored: Vec<(&ScoredDesign, f64)> = designs
        .iter()
        .map(|d| (d, composite_score(d, axis, noise)))
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    let rankings: Vec<DesignRanking> = scored
        .iter()
        .enumerate()
        .map(|(i, (design, composite))| DesignRanking {
            rank: i + 1,
            design_id: design.id,
            composite_score: *composite,
            specificity_score: design.specificity_score,
            efficacy_prediction: design.efficacy_prediction,
        })
        .collect();

    let scores: Vec<f64> = rankings.iter().map(|r| r.composite_score).collect();
    let success_rate = if scores.is_empty() {
        0.0
    } else {
        scores.iter().filter(|&&s| s >= SUCCESS_THRESHOLD).count() as f64 / scores.len() as f64
    };

    BenchmarkResult {
        axis,
        aggregate: AggregateMetrics {
            mean_score: mean(&scores),
            variance: variance(&scores),
            max_score: max(&scores),
            success_threshold: SUCCESS_THRESHOLD,
            success_rate,
        },
        rankings,
        comparisons: ComparativeAnalysis::default(),
    }
}
