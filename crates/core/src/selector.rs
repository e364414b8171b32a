//! Sélection des meilleurs designs

use crate::design::{DesignId, ScoredDesign};
use crate::math::mean;
use serde::{Deserialize, Serialize};

/// Nombre de designs retenus par défaut
pub const DEFAULT_MAX_DESIGNS: usize = 10;

/// Spécificité minimale pour qu'un candidat compte comme "passant les filtres"
pub const PASSING_SPECIFICITY: f64 = 0.7;

/// Statistiques d'un run de sélection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSummary {
    pub total_evaluated: usize,
    /// Calculé sur tous les candidats scorés, pas seulement les retenus
    pub passing_filters: usize,
    pub average_specificity: f64,
    pub recommended_id: Option<DesignId>,
}

/// Résultat de la sélection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub designs: Vec<ScoredDesign>,
    pub summary: SelectionSummary,
}

/// Trie par spécificité décroissante (tri stable) et tronque à `max_designs`
pub fn select(mut scored: Vec<ScoredDesign>, max_designs: usize) -> Selection {
    let total_evaluated = scored.len();
    let passing_filters = scored
        .iter()
        .filter(|d| d.specificity_score >= PASSING_SPECIFICITY)
        .count();
    let specificities: Vec<f64> = scored.iter().map(|d| d.specificity_score).collect();
    let average_specificity = mean(&specificities);

    scored.sort_by(|a, b| b.specificity_score.total_cmp(&a.specificity_score));
    scored.truncate(max_designs);

    let recommended_id = scored.first().map(|d| d.id);

    Selection {
        designs: scored,
        summary: SelectionSummary {
            total_evaluated,
            passing_filters,
            average_specificity,
            recommended_id,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::ConstructType;
    use crate::generator::assemble;
    use crate::noise::FixedNoise;
    use crate::scoring::score;
    use proptest::prelude::*;

    fn design_with(specificity: f64, position: usize) -> ScoredDesign {
        let candidate = assemble("GCATGCTACGTAGCATGCATG", position, ConstructType::Sirna);
        let mut d = score(candidate, ConstructType::Sirna, "", &mut FixedNoise(0.5));
        d.specificity_score = specificity;
        d
    }

    #[test]
    fn test_select_sorts_and_truncates() {
        let input = vec![
            design_with(0.5, 0),
            design_with(0.9, 1),
            design_with(0.7, 2),
            design_with(0.9, 3),
        ];

        let selection = select(input, 3);
        let positions: Vec<usize> = selection.designs.iter().map(|d| d.candidate.position).collect();

        // Égalité à 0.9: ordre d'insertion conservé
        assert_eq!(positions, vec![1, 3, 2]);
        assert_eq!(selection.summary.total_evaluated, 4);
        assert_eq!(selection.summary.passing_filters, 3);
        assert!((selection.summary.average_specificity - 0.75).abs() < 1e-9);
        assert_eq!(selection.summary.recommended_id, Some(selection.designs[0].id));
    }

    #[test]
    fn test_passing_filters_counts_unselected() {
        let input = vec![design_with(0.95, 0), design_with(0.8, 1), design_with(0.75, 2)];
        let selection = select(input, 1);

        assert_eq!(selection.designs.len(), 1);
        assert_eq!(selection.summary.passing_filters, 3);
    }

    #[test]
    fn test_empty_selection() {
        let selection = select(Vec::new(), DEFAULT_MAX_DESIGNS);
        assert!(selection.designs.is_empty());
        assert_eq!(selection.summary.average_specificity, 0.0);
        assert_eq!(selection.summary.recommended_id, None);
    }

    proptest! {
        #[test]
        fn prop_selection_is_sorted_and_bounded(
            scores in proptest::collection::vec(0.0f64..=1.0, 0..30),
            max_designs in 0usize..15,
        ) {
            let input: Vec<ScoredDesign> = scores.iter().enumerate().map(|(i, &s)| design_with(s, i)).collect();
            let selection = select(input, max_designs);

            prop_assert!(selection.designs.len() <= max_designs);
            prop_assert!(selection.designs.len() <= scores.len());
            for pair in selection.designs.windows(2) {
                prop_assert!(pair[0].specificity_score >= pair[1].specificity_score);
            }
        }
    }
}
