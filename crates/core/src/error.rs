//! Types d'erreurs pour le moteur de design RNAi

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RnaiError {
    /// Cible ou design référencé absent
    #[error("Introuvable: {0}")]
    NotFound(String),

    /// Type de construction, type d'expérience ou axe non supporté, alphabet invalide
    #[error("Argument invalide: {0}")]
    InvalidArgument(String),

    /// Échec de persistance d'un design sélectionné
    #[error("Erreur interne: {0}")]
    Internal(String),

    #[error("Base invalide dans la séquence: {0}")]
    InvalidBase(char),

    #[error("Erreur IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erreur de sérialisation: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RnaiError {
    /// Indique si l'erreur relève d'une entrée invalide (non réessayable)
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, RnaiError::InvalidArgument(_) | RnaiError::InvalidBase(_))
    }

    /// Indique si l'erreur signale une ressource absente
    pub fn is_not_found(&self) -> bool {
        matches!(self, RnaiError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, RnaiError>;
