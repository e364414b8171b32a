//! Métriques d'expérience: efficacité, sécurité, statistiques

use crate::experiment::{ExperimentParameters, ExperimentType};
use rnai_core::math;
use rnai_core::DesignId;
use serde::{Deserialize, Serialize};

/// Point de la courbe dose-réponse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DosePoint {
    pub concentration: f64,
    /// Knockdown dans [0, 1]
    pub knockdown: f64,
    /// Viabilité (%)
    pub viability: f64,
}

/// Point du suivi temporel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub hours: u32,
    /// Expression ARNm résiduelle (%)
    pub mrna_expression: f64,
    /// Expression protéique résiduelle (%)
    pub protein_expression: f64,
    pub viability: f64,
}

/// Métriques d'efficacité
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyMetrics {
    pub knockdown_efficiency: f64,
    pub max_knockdown: f64,
    /// Première concentration atteignant la moitié du knockdown maximal
    pub ic50_estimate: f64,
    pub optimal_timepoint_hours: u32,
    pub dose_response: Vec<DosePoint>,
    pub time_course: Vec<TimePoint>,
}

/// Pertinence d'un off-target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relevance {
    High,
    Medium,
    Low,
}

/// Off-target simulé
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffTargetEffect {
    pub gene: String,
    pub fold_change: f64,
    pub p_value: f64,
    pub relevance: Relevance,
}

/// Profil de sécurité
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyProfile {
    /// Perte de viabilité attendue (%)
    pub viability_impact: f64,
    pub immune_response_risk: f64,
    pub off_target_effects: Vec<OffTargetEffect>,
}

/// Statistiques synthétiques (approximation, pas de vraies données wet-lab)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentStatistics {
    pub sample_size: u32,
    pub statistical_power: f64,
    pub confidence_interval: [f64; 2],
    pub p_value: f64,
    pub effect_size: f64,
    pub variance_explained: f64,
}

/// Résultat complet d'une expérience simulée
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    pub design_id: DesignId,
    pub experiment_type: ExperimentType,
    pub parameters: ExperimentParameters,
    pub efficiency_metrics: EfficiencyMetrics,
    pub safety_profile: SafetyProfile,
    pub statistics: ExperimentStatistics,
    pub recommendations: Vec<String>,
}

impl ExperimentResult {
    /// Formate les métriques en tableau
    pub fn format_table(&self) -> String {
        format!(
            "┌────────────────────────────────────┐\n\
             │ Expérience simulée ({:<10})     │\n\
             ├────────────────────────────────────┤\n\
             │ Knockdown        : {:>6.1}%         │\n\
             │ Knockdown max    : {:>6.1}%         │\n\
             │ IC50 estimée     : {:>6.1}          │\n\
             │ Temps optimal    : {:>6} h         │\n\
             │ Impact viabilité : {:>6.1}%         │\n\
             │ Off-targets      : {:>6}           │\n\
             │ Puissance        : {:>6.2}          │\n\
             │ p-value          : {:>6.3}          │\n\
             └────────────────────────────────────┘",
            self.experiment_type.as_str(),
            100.0 * self.efficiency_metrics.knockdown_efficiency,
            100.0 * self.efficiency_metrics.max_knockdown,
            self.efficiency_metrics.ic50_estimate,
            self.efficiency_metrics.optimal_timepoint_hours,
            self.safety_profile.viability_impact,
            self.safety_profile.off_target_effects.len(),
            self.statistics.statistical_power,
            self.statistics.p_value
        )
    }
}

/// Collecteur de résultats pour plusieurs simulations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsCollector {
    results: Vec<ExperimentResult>,
}

impl MetricsCollector {
    /// Crée un nouveau collecteur
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute un résultat
    pub fn add(&mut self, result: ExperimentResult) {
        self.results.push(result);
    }

    fn knockdowns(&self) -> Vec<f64> {
        self.results
            .iter()
            .map(|r| r.efficiency_metrics.knockdown_efficiency)
            .collect()
    }

    /// Knockdown moyen
    pub fn mean_knockdown(&self) -> f64 {
        math::mean(&self.knockdowns())
    }

    /// Écart type du knockdown
    pub fn knockdown_std_dev(&self) -> f64 {
        math::std_dev(&self.knockdowns())
    }

    /// Knockdown minimal et maximal
    pub fn knockdown_range(&self) -> Option<(f64, f64)> {
        let values = self.knockdowns();
        if values.is_empty() {
            return None;
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }

    /// Impact moyen sur la viabilité
    pub fn mean_viability_impact(&self) -> f64 {
        let values: Vec<f64> = self
            .results
            .iter()
            .map(|r| r.safety_profile.viability_impact)
            .collect();
        math::mean(&values)
    }

    /// Nombre de simulations
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Vérifie si vide
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Vide le collecteur
    pub fn clear(&mut self) {
        self.results.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::ExperimentSimulator;
    use rnai_core::generator::assemble;
    use rnai_core::scoring::score;
    use rnai_core::{ConstructType, FixedNoise};

    fn sample_design() -> rnai_core::ScoredDesign {
        let target = "GGCATGCTACGTAGCATGCATGCCTTAGGACCGT";
        let candidate = assemble(&target[2..23], 2, ConstructType::Sirna);
        score(candidate, ConstructType::Sirna, target, &mut FixedNoise(0.5))
    }

    #[test]
    fn test_metrics_collector() {
        let design = sample_design();
        let mut sim = ExperimentSimulator::new(42);
        let mut collector = MetricsCollector::new();
        assert!(collector.is_empty());
        assert_eq!(collector.knockdown_range(), None);

        for result in sim.run_iterations(&design, ExperimentType::InVitro, &ExperimentParameters::default(), 20) {
            collector.add(result);
        }

        assert_eq!(collector.len(), 20);
        let (min, max) = collector.knockdown_range().unwrap();
        let mean = collector.mean_knockdown();
        assert!(min <= mean && mean <= max);
        assert!(collector.knockdown_std_dev() >= 0.0);
        assert!(collector.mean_viability_impact() >= 0.0);

        collector.clear();
        assert!(collector.is_empty());
    }

    #[test]
    fn test_result_serialization() {
        let design = sample_design();
        let result = ExperimentSimulator::new(1).run(&design, ExperimentType::InSilico, &ExperimentParameters::default());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["experiment_type"], "in_silico");
        assert_eq!(json["efficiency_metrics"]["dose_response"].as_array().unwrap().len(), 8);

        let table = result.format_table();
        assert!(table.contains("in_silico"));
        assert!(table.contains("Knockdown"));
    }
}
