//! Prédiction d'efficacité d'un design résolu

use crate::design::{ConstructType, ScoredDesign};
use crate::math::{clamp01, mean};
use crate::scoring::{EfficacyComponents, EFFICACY_WEIGHTS};
use serde::{Deserialize, Serialize};

/// Facteur contribuant à l'efficacité prédite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionFactor {
    pub name: String,
    pub value: f64,
    pub weight: f64,
    /// value · weight
    pub contribution: f64,
}

/// Méthode de délivrance recommandée
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    LipidTransfection,
    LentiviralTransduction,
    ConjugateUptake,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryOptimization {
    pub method: DeliveryMethod,
    pub chemical_modifications: Vec<String>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedConditions {
    /// Concentration (nM)
    pub concentration_nm: f64,
    pub mrna_timepoint_hours: u32,
    pub protein_timepoint_hours: u32,
    pub replicates: u32,
}

/// Prédiction d'efficacité
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyPrediction {
    pub predicted_efficiency: f64,
    pub confidence_score: f64,
    pub prediction_factors: Vec<PredictionFactor>,
    pub delivery_optimization: DeliveryOptimization,
    pub recommended_conditions: RecommendedConditions,
}

/// Prédit l'efficacité d'un design à partir de ses propriétés stockées
pub fn predict_efficiency(design: &ScoredDesign) -> EfficiencyPrediction {
    let components = EfficacyComponents::new(
        design.specificity_score,
        &design.thermodynamics,
        design.candidate.guide.len(),
    );

    let w = EFFICACY_WEIGHTS;
    let prediction_factors = vec![
        factor("specificity", components.specificity, w.specificity),
        factor("thermodynamic_asymmetry", components.asymmetry, w.asymmetry),
        factor("guide_length", components.length_score, w.length),
        factor("seed_stability", components.seed_stability, w.seed_stability),
    ];

    let confidence_score = clamp01(mean(&[
        components.specificity,
        components.seed_stability,
        components.length_score,
    ]));

    EfficiencyPrediction {
        predicted_efficiency: design.efficacy_prediction,
        confidence_score,
        prediction_factors,
        delivery_optimization: delivery_for(design.construct_type),
        recommended_conditions: conditions_for(design.efficacy_prediction),
    }
}

fn factor(name: &str, value: f64, weight: f64) -> PredictionFactor {
    PredictionFactor {
        name: name.to_string(),
        value,
        weight,
        contribution: value * weight,
    }
}

fn delivery_for(construct_type: ConstructType) -> DeliveryOptimization {
    match construct_type {
        ConstructType::Sirna => DeliveryOptimization {
            method: DeliveryMethod::LipidTransfection,
            chemical_modifications: vec![
                "2'-O-méthyl sur le passager".to_string(),
                "phosphorothioate en 3'".to_string(),
            ],
            notes: "Transfection transitoire, effet attendu sur 3 à 5 jours".to_string(),
        },
        ConstructType::Shrna => DeliveryOptimization {
            method: DeliveryMethod::LentiviralTransduction,
            chemical_modifications: Vec::new(),
            notes: "Expression stable depuis un promoteur U6/H1".to_string(),
        },
        ConstructType::MirnaMimic => DeliveryOptimization {
            method: DeliveryMethod::LipidTransfection,
            chemical_modifications: vec!["2'-O-méthyl sur le passager".to_string()],
            notes: "Co-transfecter un contrôle mimique non ciblant".to_string(),
        },
        ConstructType::Antagomir => DeliveryOptimization {
            method: DeliveryMethod::ConjugateUptake,
            chemical_modifications: vec![
                "2'-O-méthyl sur toutes les positions".to_string(),
                "phosphorothioate partiel".to_string(),
                "conjugué cholestérol en 3'".to_string(),
            ],
            notes: "Captation libre sans agent de transfection".to_string(),
        },
    }
}

fn conditions_for(efficacy: f64) -> RecommendedConditions {
    let concentration_nm = if efficacy >= 0.7 {
        10.0
    } else if efficacy >= 0.5 {
        25.0
    } else {
        50.0
    };

    RecommendedConditions {
        concentration_nm,
        mrna_timepoint_hours: 48,
        protein_timepoint_hours: 72,
        replicates: 3,
    }
}
