//! Types et paramètres d'expérience

use rnai_core::{Result, RnaiError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type d'expérience simulée
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentType {
    /// Prédiction pure, sans variance biologique
    InSilico,
    /// Culture cellulaire
    InVitro,
    /// Modèle animal
    InVivo,
}

impl ExperimentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ExperimentType::InSilico => "in_silico",
            ExperimentType::InVitro => "in_vitro",
            ExperimentType::InVivo => "in_vivo",
        }
    }

    /// Les expériences "wet-lab" portent une variance biologique
    pub fn is_wet_lab(self) -> bool {
        match self {
            ExperimentType::InSilico => false,
            ExperimentType::InVitro | ExperimentType::InVivo => true,
        }
    }
}

impl fmt::Display for ExperimentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperimentType {
    type Err = RnaiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "in_silico" => Ok(ExperimentType::InSilico),
            "in_vitro" => Ok(ExperimentType::InVitro),
            "in_vivo" => Ok(ExperimentType::InVivo),
            other => Err(RnaiError::InvalidArgument(format!(
                "Type d'expérience non supporté: {}",
                other
            ))),
        }
    }
}

/// Paramètres d'une expérience
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentParameters {
    /// Concentration (unités abstraites, nM par convention)
    pub concentration: f64,
    /// Nombre de réplicats biologiques
    pub replicates: u32,
    pub cell_line: Option<String>,
}

impl Default for ExperimentParameters {
    fn default() -> Self {
        Self {
            concentration: 25.0,
            replicates: 3,
            cell_line: None,
        }
    }
}

impl ExperimentParameters {
    /// Multiplicateur in silico selon la bande de concentration
    pub fn concentration_multiplier(&self) -> f64 {
        if self.concentration < 5.0 {
            0.6
        } else if self.concentration > 100.0 {
            0.8
        } else {
            1.0
        }
    }

    /// Vérifie si les paramètres sont valides
    pub fn is_valid(&self) -> bool {
        self.concentration.is_finite() && self.concentration >= 0.0 && self.replicates > 0
    }
}
