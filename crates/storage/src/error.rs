//! Gestion des erreurs pour le module de stockage

use rnai_core::{DesignId, RnaiError, TargetId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Design non trouvé: {0}")]
    DesignNotFound(DesignId),

    #[error("Cible non trouvée: {0}")]
    TargetNotFound(TargetId),

    #[error("Design déjà enregistré: {0}")]
    DuplicateDesign(DesignId),

    #[error("Pool plein ({0} designs)")]
    PoolFull(usize),

    #[error("Erreur IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erreur de sérialisation: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl From<StorageError> for RnaiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DesignNotFound(_) | StorageError::TargetNotFound(_) => {
                RnaiError::NotFound(err.to_string())
            }
            other => RnaiError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_into_engine_error() {
        let missing: RnaiError = StorageError::DesignNotFound(DesignId::generate()).into();
        assert!(missing.is_not_found());

        let full: RnaiError = StorageError::PoolFull(10).into();
        assert!(matches!(full, RnaiError::Internal(_)));
    }
}
