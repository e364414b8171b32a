//! Moteur de scoring: spécificité, thermodynamique, off-targets et efficacité
//!
//! Modèle heuristique fermé. La thermodynamique n'est pas un calcul
//! nearest-neighbor: les valeurs sont dérivées du seul contenu GC.

use crate::design::{
    Candidate, ConstructType, DesignId, OffTargetSummary, RiskLevel, ScoredDesign,
    ThermodynamicProperties,
};
use crate::math::clamp01;
use crate::noise::{seeded, NoiseSource};
use crate::sequence::{self, SEED_LENGTH, SEED_START};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Poids de l'identité globale dans le score d'alignement
pub const MATCH_WEIGHT: f64 = 0.6;
/// Poids de la région seed dans le score d'alignement
pub const SEED_WEIGHT: f64 = 0.4;

/// Seuil d'alignement au-delà duquel un off-target est jugé de haute confiance
pub const HIGH_CONFIDENCE_ALIGNMENT: f64 = 0.8;

/// Poids des composantes de l'efficacité
pub const EFFICACY_WEIGHTS: EfficacyWeights = EfficacyWeights {
    specificity: 0.4,
    asymmetry: 0.3,
    length: 0.2,
    seed_stability: 0.1,
};

/// Pondération de la prédiction d'efficacité
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficacyWeights {
    pub specificity: f64,
    pub asymmetry: f64,
    pub length: f64,
    pub seed_stability: f64,
}

/// Composantes normalisées de l'efficacité d'un design
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficacyComponents {
    pub specificity: f64,
    pub asymmetry: f64,
    pub length_score: f64,
    /// seed_stability / 5
    pub seed_stability: f64,
}

impl EfficacyComponents {
    pub fn new(specificity: f64, thermodynamics: &ThermodynamicProperties, guide_length: usize) -> Self {
        Self {
            specificity,
            asymmetry: thermodynamics.asymmetry_score,
            length_score: length_score(guide_length),
            seed_stability: thermodynamics.seed_stability / 5.0,
        }
    }

    /// Combinaison pondérée, bornée dans [0, 1]
    pub fn efficacy(&self) -> f64 {
        let w = EFFICACY_WEIGHTS;
        clamp01(
            w.specificity * self.specificity
                + w.asymmetry * self.asymmetry
                + w.length * self.length_score
                + w.seed_stability * self.seed_stability,
        )
    }
}

/// Alignement du guide sur une fenêtre de la cible
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowAlignment {
    pub position: usize,
    pub matches: usize,
    pub seed_matches: usize,
    pub score: f64,
}

impl WindowAlignment {
    fn is_exact(&self, guide_len: usize) -> bool {
        self.matches == guide_len
    }
}

/// Aligne le guide sur chaque fenêtre de même longueur de la cible (casse ignorée)
///
/// Score d'une fenêtre: 0.6 · identité + 0.4 · (matches seed / 7). Un guide de
/// moins de 8 bases a un score seed nul.
pub fn align_windows(guide: &str, target: &str) -> Vec<WindowAlignment> {
    let guide: Vec<u8> = guide.bytes().map(|b| b.to_ascii_uppercase()).collect();
    let target: Vec<u8> = target.bytes().map(|b| b.to_ascii_uppercase()).collect();
    let len = guide.len();

    if len == 0 || len > target.len() {
        return Vec::new();
    }

    let has_seed = len >= SEED_START + SEED_LENGTH;

    target
        .windows(len)
        .enumerate()
        .map(|(position, window)| {
            let matches = guide.iter().zip(window).filter(|(a, b)| a == b).count();
            let seed_matches = if has_seed {
                (SEED_START..SEED_START + SEED_LENGTH)
                    .filter(|&i| guide[i] == window[i])
                    .count()
            } else {
                0
            };
            let score = MATCH_WEIGHT * (matches as f64 / len as f64)
                + SEED_WEIGHT * (seed_matches as f64 / SEED_LENGTH as f64);

            WindowAlignment {
                position,
                matches,
                seed_matches,
                score: clamp01(score),
            }
        })
        .collect()
}

/// Score de spécificité: meilleur alignement sur toutes les fenêtres, dans [0, 1]
///
/// Vaut 1.0 quand le guide (>= 8 bases) est une sous-chaîne exacte de la cible,
/// 0.0 pour un guide vide ou plus long que la cible.
pub fn specificity_score(guide: &str, target: &str) -> f64 {
    best_alignment(&align_windows(guide, target))
}

fn best_alignment(alignments: &[WindowAlignment]) -> f64 {
    alignments.iter().map(|a| a.score).fold(0.0, f64::max)
}

/// Température de fusion heuristique (°C), 0.0 pour un guide vide
pub fn melting_temperature(guide: &str) -> f64 {
    if guide.is_empty() {
        return 0.0;
    }
    64.9 + 41.0 * sequence::gc_fraction(guide) - 675.0 / guide.len() as f64
}

/// Stabilité d'un brin: GC · 5 + 2
pub fn strand_stability(gc: f64) -> f64 {
    gc * 5.0 + 2.0
}

/// Stabilité de la région seed: GC(2-8) · 4 + 1, 0.0 si le guide est trop court
pub fn seed_stability(guide: &str) -> f64 {
    match sequence::seed_region(guide) {
        Some(seed) => sequence::gc_fraction(seed) * 4.0 + 1.0,
        None => 0.0,
    }
}

/// Profil d'énergie libre: une petite valeur négative par position
pub fn free_energy_profile(guide: &str) -> Vec<f64> {
    guide
        .chars()
        .enumerate()
        .map(|(i, base)| {
            let base_term = if sequence::is_gc(base) { -0.3 } else { -0.1 };
            if sequence::in_seed(i) {
                base_term - 0.05
            } else {
                base_term
            }
        })
        .collect()
}

/// Propriétés thermodynamiques d'un candidat
pub fn thermodynamics(candidate: &Candidate) -> ThermodynamicProperties {
    let guide = &candidate.guide;
    let guide_stability = strand_stability(sequence::gc_fraction(guide));
    let passenger_gc = candidate
        .passenger
        .as_deref()
        .map(sequence::gc_fraction)
        .unwrap_or(0.5);
    let passenger_stability = strand_stability(passenger_gc);
    let asymmetry_score = (guide_stability - passenger_stability).abs()
        / guide_stability.max(passenger_stability);

    ThermodynamicProperties {
        melting_temperature: melting_temperature(guide),
        guide_stability,
        passenger_stability,
        asymmetry_score,
        internal_stability: (guide_stability + passenger_stability) / 2.0,
        seed_stability: seed_stability(guide),
        free_energy_profile: free_energy_profile(guide),
    }
}

/// Score de longueur: 1.0 entre 19 et 23 bases, 0.8 sinon
pub fn length_score(length: usize) -> f64 {
    if (19..=23).contains(&length) {
        1.0
    } else {
        0.8
    }
}

/// Résumé off-target
///
/// Le nombre total est tiré autour de (1 - spécificité) · 10 via la source de
/// bruit; les comptes haute confiance et seed viennent de l'alignement.
pub fn off_target_summary(
    guide_len: usize,
    alignments: &[WindowAlignment],
    specificity: f64,
    noise: &mut dyn NoiseSource,
) -> OffTargetSummary {
    let expected = (1.0 - specificity) * 10.0;
    let total_predicted_targets = (expected * noise.range(0.5, 1.5)).round().max(0.0) as usize;

    let off_target_windows = alignments.iter().filter(|a| !a.is_exact(guide_len));
    let high_confidence_targets = off_target_windows
        .clone()
        .filter(|a| a.score >= HIGH_CONFIDENCE_ALIGNMENT)
        .count();
    let seed_matches = off_target_windows
        .filter(|a| a.seed_matches == SEED_LENGTH)
        .count();

    OffTargetSummary {
        total_predicted_targets,
        high_confidence_targets,
        seed_matches,
        risk_classification: RiskLevel::from_specificity(specificity),
    }
}

/// Score un candidat contre sa cible
///
/// Effets de bord: un tirage de bruit pour le nombre d'off-targets, puis une
/// graine pour l'identifiant du design.
pub fn score(
    candidate: Candidate,
    construct_type: ConstructType,
    target: &str,
    noise: &mut dyn NoiseSource,
) -> ScoredDesign {
    let alignments = align_windows(&candidate.guide, target);
    let specificity_score = best_alignment(&alignments);
    let thermodynamics = thermodynamics(&candidate);
    let off_target = off_target_summary(candidate.guide.len(), &alignments, specificity_score, noise);
    let efficacy_prediction =
        EfficacyComponents::new(specificity_score, &thermodynamics, candidate.guide.len()).efficacy();
    let id = DesignId::derive(
        noise.next_seed(),
        format!("{}:{}", candidate.position, candidate.guide).as_bytes(),
    );

    ScoredDesign {
        id,
        construct_type,
        candidate,
        specificity_score,
        efficacy_prediction,
        thermodynamics,
        off_target,
    }
}

/// Score un lot de candidats, éventuellement en parallèle
///
/// Une graine par candidat est tirée séquentiellement depuis `noise`; chaque
/// worker score avec son propre générateur. Le résultat est donc déterministe
/// et conserve l'ordre d'entrée quel que soit l'ordonnancement.
pub fn score_all(
    candidates: Vec<Candidate>,
    construct_type: ConstructType,
    target: &str,
    noise: &mut dyn NoiseSource,
    parallel: bool,
) -> Vec<ScoredDesign> {
    let seeded_candidates: Vec<(u64, Candidate)> = candidates
        .into_iter()
        .map(|c| (noise.next_seed(), c))
        .collect();

    let score_one = |(seed, candidate): (u64, Candidate)| {
        let mut rng = seeded(seed);
        score(candidate, construct_type, target, &mut rng)
    };

    if parallel {
        seeded_candidates.into_par_iter().map(score_one).collect()
    } else {
        seeded_candidates.into_iter().map(score_one).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::assemble;
    use crate::noise::FixedNoise;
    use proptest::prelude::*;

    const TARGET: &str = "GGCATGCTACGTAGCATGCATGCCTTAGGACCGT";

    #[test]
    fn test_exact_substring_scores_one() {
        let guide = &TARGET[3..24];
        assert!((specificity_score(guide, TARGET) - 1.0).abs() < 1e-9);
        assert!((specificity_score(&guide.to_lowercase(), TARGET) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_guide_has_no_seed_score() {
        // 7 bases présentes dans la cible: identité seule
        let score = specificity_score("GCATGCT", TARGET);
        assert!((score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_near_copies_counted_as_off_targets() {
        let guide = "AGGTCAATGCCTAGTTCGAGA";
        // Site exact, copie avec 2 mésappariements hors seed, copie avec un
        // mésappariement dans la seed
        let target = format!(
            "{}TTTTT{}TTTTT{}",
            guide, "AGGTCAATGCCTAGTACGCGA", "AGGACAATGCCTAGTACGAGA"
        );

        let alignments = align_windows(guide, &target);
        let near: Vec<_> = alignments.iter().filter(|a| a.score >= HIGH_CONFIDENCE_ALIGNMENT).collect();
        assert_eq!(near.len(), 3);
        assert_eq!((near[1].position, near[1].matches, near[1].seed_matches), (26, 19, 7));
        assert_eq!((near[2].position, near[2].matches, near[2].seed_matches), (52, 19, 6));

        let summary = off_target_summary(guide.len(), &alignments, 1.0, &mut FixedNoise(0.5));
        assert_eq!(summary.high_confidence_targets, 2);
        assert_eq!(summary.seed_matches, 1);
        assert_eq!(summary.total_predicted_targets, 0);

        let design = score(assemble(guide, 0, ConstructType::Sirna), ConstructType::Sirna, &target, &mut FixedNoise(0.5));
        assert_eq!(design.off_target, summary);
    }

    #[test]
    fn test_degenerate_specificity() {
        assert_eq!(specificity_score("", TARGET), 0.0);
        assert_eq!(specificity_score(TARGET, "ACGT"), 0.0);
        assert_eq!(specificity_score("ACGT", ""), 0.0);
    }

    #[test]
    fn test_melting_temperature() {
        let guide = "GCGCGCGCGCATATATATATA"; // 21 bases, GC 10/21
        let expected = 64.9 + 41.0 * (10.0 / 21.0) - 675.0 / 21.0;
        assert!((melting_temperature(guide) - expected).abs() < 1e-9);
        assert_eq!(melting_temperature(""), 0.0);
    }

    #[test]
    fn test_sirna_thermodynamics_are_symmetric() {
        let c = assemble("GCATGCTACGTAGCATGCATG", 0, ConstructType::Sirna);
        let thermo = thermodynamics(&c);

        assert_eq!(thermo.guide_stability, thermo.passenger_stability);
        assert_eq!(thermo.asymmetry_score, 0.0);
        assert_eq!(thermo.free_energy_profile.len(), 21);
        assert!(thermo.free_energy_profile.iter().all(|&v| v < 0.0));
    }

    #[test]
    fn test_missing_passenger_defaults_to_half_gc() {
        let c = assemble("GGGGGGGGGGCCCCCCCCCCGG", 0, ConstructType::Antagomir);
        let thermo = thermodynamics(&c);

        assert_eq!(thermo.guide_stability, 7.0);
        assert_eq!(thermo.passenger_stability, 4.5);
        assert!((thermo.asymmetry_score - 2.5 / 7.0).abs() < 1e-9);
        assert_eq!(thermo.internal_stability, 5.75);
        assert_eq!(thermo.seed_stability, 5.0);
    }

    #[test]
    fn test_seed_stability_short_guide() {
        assert_eq!(seed_stability("GCGC"), 0.0);
        assert_eq!(seed_stability("AAAAAAAA"), 1.0);
    }

    #[test]
    fn test_efficacy_formula() {
        let guide = &TARGET[3..24];
        let c = assemble(guide, 3, ConstructType::Sirna);
        let design = score(c, ConstructType::Sirna, TARGET, &mut FixedNoise(0.5));

        let seed = seed_stability(guide);
        let expected = 0.4 * 1.0 + 0.3 * 0.0 + 0.2 * 1.0 + 0.1 * (seed / 5.0);
        assert!((design.efficacy_prediction - expected).abs() < 1e-9);
        assert_eq!(design.off_target.risk_classification, RiskLevel::Low);
        // Spécificité parfaite: aucun off-target attendu
        assert_eq!(design.off_target.total_predicted_targets, 0);
    }

    #[test]
    fn test_off_target_count_uses_noise() {
        let alignments = align_windows("GCATGCTACG", TARGET);
        let low = off_target_summary(10, &alignments, 0.5, &mut FixedNoise(0.0));
        let high = off_target_summary(10, &alignments, 0.5, &mut FixedNoise(0.99));

        // 5 · 0.5 = 2.5 -> 3, 5 · 1.49 = 7.45 -> 7
        assert_eq!(low.total_predicted_targets, 3);
        assert_eq!(high.total_predicted_targets, 7);
        assert_eq!(low.risk_classification, RiskLevel::High);
    }

    #[test]
    fn test_score_all_preserves_order_and_is_deterministic() {
        let candidates: Vec<Candidate> = (0..8)
            .map(|i| assemble(&TARGET[i..i + 21], i, ConstructType::Sirna))
            .collect();

        let parallel = score_all(candidates.clone(), ConstructType::Sirna, TARGET, &mut seeded(3), true);
        let serial = score_all(candidates, ConstructType::Sirna, TARGET, &mut seeded(3), false);

        let positions: Vec<usize> = parallel.iter().map(|d| d.candidate.position).collect();
        assert_eq!(positions, (0..8).collect::<Vec<_>>());
        for (p, s) in parallel.iter().zip(&serial) {
            assert_eq!(p.off_target, s.off_target);
            assert_eq!(p.efficacy_prediction, s.efficacy_prediction);
        }
    }

    proptest! {
        #[test]
        fn prop_specificity_in_unit_range(guide in "[ACGTU]{0,30}", target in "[ACGT]{0,80}") {
            let s = specificity_score(&guide, &target);
            prop_assert!((0.0..=1.0).contains(&s));
        }

        #[test]
        fn prop_embedded_guide_scores_one(prefix in "[ACGT]{0,20}", guide in "[ACGT]{8,25}", suffix in "[ACGT]{0,20}") {
            let target = format!("{}{}{}", prefix, guide, suffix);
            prop_assert!((specificity_score(&guide, &target) - 1.0).abs() < 1e-9);
        }

        #[test]
        fn prop_scores_are_clamped(window in "[ACGT]{19,23}", target in "[ACGT]{20,60}", draw in 0.0f64..1.0) {
            for construct in ConstructType::ALL {
                let design = score(assemble(&window, 0, construct), construct, &target, &mut FixedNoise(draw));
                prop_assert!((0.0..=1.0).contains(&design.specificity_score));
                prop_assert!((0.0..=1.0).contains(&design.efficacy_prediction));
                prop_assert!(design.thermodynamics.asymmetry_score >= 0.0);
            }
        }
    }
}
