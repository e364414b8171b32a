//! Orchestration d'un run de design: génération, scoring, sélection

use crate::design::{ConstructType, DesignParameters, DesignParametersPatch};
use crate::error::{Result, RnaiError};
use crate::generator;
use crate::log_operation;
use crate::noise::NoiseSource;
use crate::scoring;
use crate::selector::{self, Selection, DEFAULT_MAX_DESIGNS};
use crate::sequence;
use crate::validator::{self, ValidationResult};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Configuration du moteur
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Nombre maximal de candidats générés par run
    pub max_candidates: usize,
    /// Nombre de designs retenus quand la requête n'en précise pas
    pub default_max_designs: usize,
    /// Seed par défaut de la source de bruit
    pub seed: u64,
    /// Scoring parallèle (rayon)
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_candidates: 200,
            default_max_designs: DEFAULT_MAX_DESIGNS,
            seed: 42,
            parallel: true,
        }
    }
}

/// Requête de design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRequest {
    pub target_sequence: String,
    pub construct_type: ConstructType,
    #[serde(default)]
    pub design_parameters: DesignParametersPatch,
    #[serde(default)]
    pub max_designs: Option<usize>,
}

/// Requête de validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRequest {
    pub guide_sequence: String,
    pub target_sequence: String,
    pub construct_type: ConstructType,
}

/// Résultat d'un run: paramètres effectifs et sélection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRun {
    pub parameters: DesignParameters,
    #[serde(flatten)]
    pub selection: Selection,
}

/// Moteur de design RNAi
#[derive(Debug, Clone, Default)]
pub struct DesignEngine {
    config: EngineConfig,
}

impl DesignEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Exécute un run de design complet (sans persistance)
    pub fn design(&self, request: &DesignRequest, noise: &mut dyn NoiseSource) -> Result<DesignRun> {
        log_operation!("design", {
            if let Some(bad) = sequence::first_invalid_base(&request.target_sequence) {
                return Err(RnaiError::InvalidArgument(format!(
                    "Base invalide '{}' dans la séquence cible",
                    bad
                )));
            }

            let parameters = request
                .design_parameters
                .clone()
                .resolve(request.construct_type);
            parameters.check()?;

            let max_designs = request.max_designs.unwrap_or(self.config.default_max_designs);

            let candidates = generator::generate(
                &request.target_sequence,
                request.construct_type,
                &parameters,
                self.config.max_candidates,
            );

            let scored = scoring::score_all(
                candidates,
                request.construct_type,
                &request.target_sequence,
                noise,
                self.config.parallel,
            );

            let selection = selector::select(scored, max_designs);

            info!(
                "Design {}: {} candidats évalués, {} retenus, spécificité moyenne {:.3}",
                request.construct_type,
                selection.summary.total_evaluated,
                selection.designs.len(),
                selection.summary.average_specificity
            );

            Ok(DesignRun {
                parameters,
                selection,
            })
        })
    }

    /// Valide un guide fourni par l'utilisateur
    pub fn validate(&self, request: &ValidationRequest, noise: &mut dyn NoiseSource) -> ValidationResult {
        validator::validate(
            &request.guide_sequence,
            &request.target_sequence,
            request.construct_type,
            noise,
        )
    }
}
