//! Simulateur d'expériences de knockdown
//!
//! Modèle bruité construit à partir des propriétés prédites d'un design. Les
//! statistiques produites sont des placeholders heuristiques.

use crate::experiment::{ExperimentParameters, ExperimentType};
use crate::metrics::{
    DosePoint, EfficiencyMetrics, ExperimentResult, ExperimentStatistics, OffTargetEffect,
    Relevance, SafetyProfile, TimePoint,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rnai_core::math::clamp01;
use rnai_core::{NoiseSource, ScoredDesign};
use std::f64::consts::PI;
use tracing::debug;

/// Concentrations de la courbe dose-réponse
pub const DOSE_POINTS: [f64; 8] = [0.1, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 200.0];

/// Concentration de demi-effet maximal
pub const HALF_MAX_CONCENTRATION: f64 = 25.0;

/// Temps de prélèvement (heures)
pub const TIMEPOINTS: [u32; 6] = [6, 12, 24, 48, 72, 96];

/// Amortissement du knockdown protéique par rapport à l'ARNm
pub const PROTEIN_DAMPING: f64 = 0.8;

/// Plancher de viabilité de la courbe dose-réponse (%)
pub const VIABILITY_FLOOR: f64 = 70.0;

/// Simule une expérience pour un design
pub fn simulate(
    design: &ScoredDesign,
    experiment_type: ExperimentType,
    parameters: &ExperimentParameters,
    noise: &mut dyn NoiseSource,
) -> ExperimentResult {
    let base = base_efficiency(design, experiment_type, parameters, noise);

    let dose_response = dose_response(base, noise);
    let time_course = time_course(base);
    let max_knockdown = dose_response.iter().map(|p| p.knockdown).fold(0.0, f64::max);

    let efficiency_metrics = EfficiencyMetrics {
        knockdown_efficiency: base,
        max_knockdown,
        ic50_estimate: ic50_estimate(&dose_response, max_knockdown),
        optimal_timepoint_hours: optimal_timepoint(&time_course),
        dose_response,
        time_course,
    };

    let safety_profile = safety_profile(design.specificity_score, noise);
    let statistics = statistics(base, experiment_type, parameters, noise);
    let recommendations = recommendations(design, &safety_profile, &statistics);

    debug!(
        "Expérience {} sur {}: knockdown {:.2}, {} off-targets",
        experiment_type,
        design.id,
        base,
        safety_profile.off_target_effects.len()
    );

    ExperimentResult {
        design_id: design.id,
        experiment_type,
        parameters: parameters.clone(),
        efficiency_metrics,
        safety_profile,
        statistics,
        recommendations,
    }
}

/// Efficacité de base: bande de concentration in silico, ±20% de variance biologique sinon
fn base_efficiency(
    design: &ScoredDesign,
    experiment_type: ExperimentType,
    parameters: &ExperimentParameters,
    noise: &mut dyn NoiseSource,
) -> f64 {
    let efficacy = design.efficacy_prediction;
    if experiment_type.is_wet_lab() {
        clamp01(efficacy * (1.0 + noise.jitter(0.2)))
    } else {
        clamp01(efficacy * parameters.concentration_multiplier())
    }
}

/// Courbe de saturation (demi-max à 25 unités) avec bruit indépendant par point
fn dose_response(base: f64, noise: &mut dyn NoiseSource) -> Vec<DosePoint> {
    DOSE_POINTS
        .iter()
        .map(|&c| {
            let saturation = c / (c + HALF_MAX_CONCENTRATION);
            let knockdown = clamp01(base * saturation * (1.0 + noise.jitter(0.05)));
            let viability = ((100.0 - 0.15 * c).max(VIABILITY_FLOOR) + noise.jitter(2.0)).clamp(0.0, 100.0);
            DosePoint {
                concentration: c,
                knockdown,
                viability,
            }
        })
        .collect()
}

/// Profondeur de knockdown sinusoïdale, maximale à 60 h
pub fn knockdown_depth(base: f64, hours: u32) -> f64 {
    clamp01(base * (PI * hours as f64 / 120.0).sin())
}

fn time_course(base: f64) -> Vec<TimePoint> {
    TIMEPOINTS
        .iter()
        .map(|&hours| {
            let depth = knockdown_depth(base, hours);
            TimePoint {
                hours,
                mrna_expression: 100.0 * (1.0 - depth),
                protein_expression: 100.0 * (1.0 - PROTEIN_DAMPING * depth),
                viability: 100.0 - 0.05 * hours as f64,
            }
        })
        .collect()
}

fn ic50_estimate(dose_response: &[DosePoint], max_knockdown: f64) -> f64 {
    dose_response
        .iter()
        .find(|p| p.knockdown >= max_knockdown / 2.0)
        .map(|p| p.concentration)
        .unwrap_or(0.0)
}

fn optimal_timepoint(time_course: &[TimePoint]) -> u32 {
    let mut best: Option<&TimePoint> = None;
    for point in time_course {
        match best {
            Some(b) if b.mrna_expression <= point.mrna_expression => {}
            _ => best = Some(point),
        }
    }
    best.map(|p| p.hours).unwrap_or(0)
}

fn safety_profile(specificity: f64, noise: &mut dyn NoiseSource) -> SafetyProfile {
    let viability_impact = ((1.0 - specificity) * 50.0 + noise.jitter(5.0)).max(0.0);
    let immune_response_risk = clamp01((1.0 - specificity) * 0.5 + noise.jitter(0.05));

    let count = ((1.0 - specificity) * 10.0).round().max(0.0) as usize;
    let off_target_effects = (0..count)
        .map(|i| {
            let fold_change = noise.range(0.3, 0.9);
            let p_value = noise.range(0.001, 0.05);
            let tier = noise.uniform();
            let relevance = if tier < 0.3 {
                Relevance::High
            } else if tier < 0.6 {
                Relevance::Medium
            } else {
                Relevance::Low
            };
            OffTargetEffect {
                gene: format!("OT-{:03}", i + 1),
                fold_change,
                p_value,
                relevance,
            }
        })
        .collect();

    SafetyProfile {
        viability_impact,
        immune_response_risk,
        off_target_effects,
    }
}

fn statistics(
    base: f64,
    experiment_type: ExperimentType,
    parameters: &ExperimentParameters,
    noise: &mut dyn NoiseSource,
) -> ExperimentStatistics {
    let half_width = 0.1 + noise.range(0.0, 0.05);
    let p_value = match experiment_type {
        ExperimentType::InSilico => noise.range(0.001, 0.049),
        ExperimentType::InVitro | ExperimentType::InVivo => noise.range(0.001, 0.1),
    };

    ExperimentStatistics {
        sample_size: parameters.replicates.saturating_mul(3),
        statistical_power: (0.6 + 0.3 * base + noise.jitter(0.05)).clamp(0.0, 0.99),
        confidence_interval: [clamp01(base - half_width), clamp01(base + half_width)],
        p_value,
        effect_size: (base * 2.0 + noise.jitter(0.1)).max(0.0),
        variance_explained: clamp01(base * 0.8 + noise.jitter(0.05)),
    }
}

fn recommendations(
    design: &ScoredDesign,
    safety: &SafetyProfile,
    statistics: &ExperimentStatistics,
) -> Vec<String> {
    let mut out = Vec::new();
    let efficacy = design.efficacy_prediction;

    if efficacy < 0.5 {
        out.push("Efficacité prédite faible: tester des designs alternatifs".to_string());
    }
    if safety.viability_impact > 30.0 {
        out.push("Impact élevé sur la viabilité: réduire la concentration".to_string());
    }
    if safety.off_target_effects.len() > 5 {
        out.push("Nombreux off-targets prédits: confirmer par RNA-seq".to_string());
    }
    if statistics.statistical_power < 0.8 {
        out.push("Puissance statistique insuffisante: augmenter le nombre de réplicats".to_string());
    }
    if efficacy > 0.7 && safety.viability_impact < 15.0 {
        out.push("Profil efficacité/sécurité favorable: passer à la validation expérimentale".to_string());
    }

    out
}

/// Simulateur avec générateur interne reproductible
pub struct ExperimentSimulator {
    seed: u64,
    rng: ChaCha8Rng,
}

impl ExperimentSimulator {
    /// Crée un nouveau simulateur
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Simule une expérience
    pub fn run(
        &mut self,
        design: &ScoredDesign,
        experiment_type: ExperimentType,
        parameters: &ExperimentParameters,
    ) -> ExperimentResult {
        simulate(design, experiment_type, parameters, &mut self.rng)
    }

    /// Simule plusieurs itérations
    pub fn run_iterations(
        &mut self,
        design: &ScoredDesign,
        experiment_type: ExperimentType,
        parameters: &ExperimentParameters,
        n: usize,
    ) -> Vec<ExperimentResult> {
        (0..n).map(|_| self.run(design, experiment_type, parameters)).collect()
    }

    /// Réinitialise le RNG
    pub fn reset_rng(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rnai_core::generator::assemble;
    use rnai_core::scoring::score;
    use rnai_core::{ConstructType, FixedNoise};

    const TARGET: &str = "GGCATGCTACGTAGCATGCATGCCTTAGGACCGT";

    fn design(specificity: f64, efficacy: f64) -> ScoredDesign {
        let candidate = assemble(&TARGET[3..24], 3, ConstructType::Sirna);
        let mut d = score(candidate, ConstructType::Sirna, TARGET, &mut FixedNoise(0.5));
        d.specificity_score = specificity;
        d.efficacy_prediction = efficacy;
        d
    }

    #[test]
    fn test_in_silico_concentration_bands() {
        let d = design(0.9, 0.8);
        let mut noise = FixedNoise(0.5);

        let low = ExperimentParameters { concentration: 1.0, ..Default::default() };
        let mid = ExperimentParameters::default();
        let high = ExperimentParameters { concentration: 150.0, ..Default::default() };

        let kd = |p: &ExperimentParameters, n: &mut FixedNoise| {
            simulate(&d, ExperimentType::InSilico, p, n).efficiency_metrics.knockdown_efficiency
        };
        assert!((kd(&low, &mut noise) - 0.48).abs() < 1e-9);
        assert!((kd(&mid, &mut noise) - 0.8).abs() < 1e-9);
        assert!((kd(&high, &mut noise) - 0.64).abs() < 1e-9);
    }

    #[test]
    fn test_wet_lab_variance_is_bounded() {
        let d = design(0.9, 0.5);
        let mut sim = ExperimentSimulator::new(7);
        for result in sim.run_iterations(&d, ExperimentType::InVitro, &ExperimentParameters::default(), 50) {
            let kd = result.efficiency_metrics.knockdown_efficiency;
            assert!((0.4..=0.6).contains(&kd), "knockdown {} hors de ±20%", kd);
        }
    }

    #[test]
    fn test_dose_response_shape() {
        let d = design(0.9, 0.8);
        let result = simulate(&d, ExperimentType::InSilico, &ExperimentParameters::default(), &mut FixedNoise(0.5));
        let curve = &result.efficiency_metrics.dose_response;

        assert_eq!(curve.len(), 8);
        for pair in curve.windows(2) {
            assert!(pair[0].knockdown <= pair[1].knockdown);
            assert!(pair[0].viability >= pair[1].viability);
        }
        assert!(curve.iter().all(|p| p.viability >= VIABILITY_FLOOR));
        // Au demi-max: 0.8 · 0.5
        assert!((curve[4].knockdown - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_time_course_peaks_between_48_and_72h() {
        let d = design(0.9, 0.8);
        let result = simulate(&d, ExperimentType::InSilico, &ExperimentParameters::default(), &mut FixedNoise(0.5));
        let metrics = &result.efficiency_metrics;

        assert_eq!(metrics.time_course.len(), 6);
        assert!((48..=72).contains(&metrics.optimal_timepoint_hours));
        for point in &metrics.time_course {
            // La protéine suit l'ARNm avec un amortissement
            assert!(point.protein_expression >= point.mrna_expression);
        }
        assert!(metrics.time_course[5].viability < metrics.time_course[0].viability);
    }

    #[test]
    fn test_off_target_list_tracks_specificity() {
        let mut noise = FixedNoise(0.5);
        let specific = simulate(&design(0.9, 0.8), ExperimentType::InSilico, &ExperimentParameters::default(), &mut noise);
        let promiscuous = simulate(&design(0.3, 0.4), ExperimentType::InSilico, &ExperimentParameters::default(), &mut noise);

        assert_eq!(specific.safety_profile.off_target_effects.len(), 1);
        assert_eq!(promiscuous.safety_profile.off_target_effects.len(), 7);
        assert!(promiscuous.safety_profile.viability_impact > specific.safety_profile.viability_impact);
        assert!(promiscuous.recommendations.iter().any(|r| r.contains("off-targets")));
        assert!(promiscuous.recommendations.iter().any(|r| r.contains("viabilité")));
    }

    #[test]
    fn test_in_silico_is_always_significant() {
        let d = design(0.5, 0.3);
        let mut sim = ExperimentSimulator::new(11);
        for result in sim.run_iterations(&d, ExperimentType::InSilico, &ExperimentParameters::default(), 100) {
            assert!(result.statistics.p_value < 0.05);
            let [low, high] = result.statistics.confidence_interval;
            assert!(low <= high);
        }
    }

    #[test]
    fn test_favourable_profile_recommendation() {
        let result = simulate(&design(0.95, 0.85), ExperimentType::InSilico, &ExperimentParameters::default(), &mut FixedNoise(0.5));
        assert!(result.recommendations.iter().any(|r| r.contains("favorable")));
    }

    #[test]
    fn test_sample_size_saturates() {
        let d = design(0.8, 0.7);
        let params = ExperimentParameters { replicates: u32::MAX, ..Default::default() };
        assert!(params.is_valid());

        let result = simulate(&d, ExperimentType::InVitro, &params, &mut FixedNoise(0.5));
        assert_eq!(result.statistics.sample_size, u32::MAX);

        let result = simulate(&d, ExperimentType::InVitro, &ExperimentParameters::default(), &mut FixedNoise(0.5));
        assert_eq!(result.statistics.sample_size, 9);
    }

    #[test]
    fn test_reset_rng() {
        let d = design(0.7, 0.6);
        let params = ExperimentParameters::default();
        let mut sim = ExperimentSimulator::new(3);
        let first = sim.run(&d, ExperimentType::InVivo, &params);
        sim.reset_rng();
        let again = sim.run(&d, ExperimentType::InVivo, &params);
        assert_eq!(first, again);
    }
}
