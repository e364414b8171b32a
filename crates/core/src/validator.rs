//! Validation d'un couple guide/cible fourni par l'utilisateur
//!
//! Les entrées mal formées (alphabet, longueur) sont signalées comme problèmes
//! non bloquants dans le résultat, jamais comme erreurs.

use crate::design::{
    Candidate, ConstructType, DesignParameters, OffTargetSummary, ThermodynamicProperties,
};
use crate::math::clamp01;
use crate::noise::NoiseSource;
use crate::scoring;
use crate::sequence;
use serde::{Deserialize, Serialize};

/// Demi-largeur de l'intervalle de confiance sur l'efficacité
pub const CONFIDENCE_HALF_WIDTH: f64 = 0.15;

/// Instantané de l'analyse de spécificité
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificityAnalysis {
    pub specificity_score: f64,
    pub efficacy_prediction: f64,
    /// [efficacité - 0.15, efficacité + 0.15], borné dans [0, 1]
    pub confidence_interval: [f64; 2],
    pub gc_content: f64,
    pub off_target: OffTargetSummary,
}

/// Résultat de validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub specificity_analysis: SpecificityAnalysis,
    pub thermodynamic_analysis: ThermodynamicProperties,
    pub recommendations: Vec<String>,
}

/// Valide un guide contre une cible
pub fn validate(
    guide: &str,
    target: &str,
    construct_type: ConstructType,
    noise: &mut dyn NoiseSource,
) -> ValidationResult {
    let mut issues = Vec::new();

    if let Some(bad) = sequence::first_invalid_base(guide) {
        issues.push(format!(
            "Alphabet invalide: caractère '{}' dans le guide (seules A/T/C/G/U sont acceptées)",
            bad
        ));
    }

    let length = guide.chars().count();
    let allowed = construct_type.allowed_lengths();
    if !allowed.contains(&length) {
        issues.push(format!(
            "Longueur {} non supportée pour {} (attendu: {:?})",
            length, construct_type, allowed
        ));
    }

    let parameters = DesignParameters {
        length,
        ..DesignParameters::for_construct(construct_type)
    };

    let candidate = Candidate {
        position: 0,
        guide: guide.to_string(),
        passenger: Some(sequence::complement(guide)),
        loop_sequence: None,
        full_sequence: guide.to_string(),
    };

    let design = scoring::score(candidate, construct_type, target, noise);
    let efficacy = design.efficacy_prediction;
    let gc_content = sequence::gc_fraction(guide);

    let specificity_analysis = SpecificityAnalysis {
        specificity_score: design.specificity_score,
        efficacy_prediction: efficacy,
        confidence_interval: [
            clamp01(efficacy - CONFIDENCE_HALF_WIDTH),
            clamp01(efficacy + CONFIDENCE_HALF_WIDTH),
        ],
        gc_content,
        off_target: design.off_target.clone(),
    };

    let recommendations = recommendations(
        &specificity_analysis,
        &design.thermodynamics,
        &parameters,
    );

    ValidationResult {
        is_valid: issues.is_empty(),
        issues,
        specificity_analysis,
        thermodynamic_analysis: design.thermodynamics,
        recommendations,
    }
}

fn recommendations(
    analysis: &SpecificityAnalysis,
    thermodynamics: &ThermodynamicProperties,
    parameters: &DesignParameters,
) -> Vec<String> {
    let mut out = Vec::new();

    if analysis.efficacy_prediction < 0.5 {
        out.push(format!(
            "Efficacité prédite faible ({:.2}): envisager un autre site cible",
            analysis.efficacy_prediction
        ));
    }

    if analysis.specificity_score < 0.7 {
        out.push(format!(
            "Spécificité limitée ({:.2}): vérifier les off-targets potentiels",
            analysis.specificity_score
        ));
    }

    if thermodynamics.asymmetry_score < 0.1 {
        out.push(
            "Asymétrie thermodynamique faible: déstabiliser l'extrémité 5' du guide pour favoriser son chargement"
                .to_string(),
        );
    }

    if analysis.gc_content < parameters.gc_min || analysis.gc_content > parameters.gc_max {
        out.push(format!(
            "Contenu GC {:.0}% hors de la plage recommandée {:.0}-{:.0}%",
            analysis.gc_content * 100.0,
            parameters.gc_min * 100.0,
            parameters.gc_max * 100.0
        ));
    }

    if out.is_empty() {
        out.push("Le guide satisfait les critères de design".to_string());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::FixedNoise;
    use proptest::prelude::*;

    const TARGET: &str = "GGCATGCTACGTAGCATGCATGCCTTAGGACCGTAAGCT";

    #[test]
    fn test_valid_guide() {
        let guide = &TARGET[2..23];
        let result = validate(guide, TARGET, ConstructType::Sirna, &mut FixedNoise(0.5));

        assert!(result.is_valid);
        assert!(result.issues.is_empty());
        assert!((result.specificity_analysis.specificity_score - 1.0).abs() < 1e-9);
        let [low, high] = result.specificity_analysis.confidence_interval;
        assert!(low <= result.specificity_analysis.efficacy_prediction);
        assert!(high <= 1.0);
    }

    #[test]
    fn test_bad_alphabet_is_soft_issue() {
        let result = validate("GCATGCTACGXAGCATGCATG", TARGET, ConstructType::Sirna, &mut FixedNoise(0.5));

        assert!(!result.is_valid);
        assert!(result.issues.iter().any(|i| i.contains("Alphabet")));
    }

    #[test]
    fn test_wrong_length_is_soft_issue() {
        let result = validate(&TARGET[0..20], TARGET, ConstructType::Shrna, &mut FixedNoise(0.5));

        assert!(!result.is_valid);
        assert_eq!(result.issues.len(), 1);
        assert!(result.issues[0].contains("20"));
    }

    #[test]
    fn test_poly_a_guide_does_not_crash() {
        let guide = "A".repeat(21);
        let result = validate(&guide, TARGET, ConstructType::Sirna, &mut FixedNoise(0.5));

        assert!(result.is_valid);
        assert_eq!(result.specificity_analysis.gc_content, 0.0);
        assert_eq!(result.thermodynamic_analysis.seed_stability, 1.0);
        assert!(result.recommendations.iter().any(|r| r.contains("GC")));
    }

    #[test]
    fn test_guide_longer_than_target() {
        let result = validate(&"GCAT".repeat(6)[..23], "GCAT", ConstructType::Sirna, &mut FixedNoise(0.5));

        assert!(result.is_valid);
        assert_eq!(result.specificity_analysis.specificity_score, 0.0);
        assert_eq!(result.specificity_analysis.off_target.risk_classification, crate::design::RiskLevel::High);
    }

    #[test]
    fn test_confidence_interval_is_clamped() {
        let result = validate("", TARGET, ConstructType::Sirna, &mut FixedNoise(0.5));
        let [low, high] = result.specificity_analysis.confidence_interval;
        assert!(low >= 0.0 && high <= 1.0);
        assert!(!result.is_valid);
    }

    proptest! {
        #[test]
        fn prop_invalid_alphabet_is_never_valid(prefix in "[ACGT]{0,10}", bad in "[BDEFHIJKLMNOPQRSVWXYZ]", suffix in "[ACGT]{0,10}") {
            let guide = format!("{}{}{}", prefix, bad, suffix);
            let result = validate(&guide, TARGET, ConstructType::Sirna, &mut FixedNoise(0.3));
            prop_assert!(!result.is_valid);
            prop_assert!(result.issues.iter().any(|i| i.contains("Alphabet")));
        }
    }
}
