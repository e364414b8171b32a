//! Modèles de données pour l'API web

use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use rand_chacha::ChaCha8Rng;
use rnai_core::{BenchmarkAxis, DesignId, DesignRecord, RnaiError};
use rnai_simulation::{ExperimentParameters, ExperimentType};
use rnai_storage::{DesignPool, DesignService, StorageError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// État global de l'application
pub struct AppState {
    pub service: DesignService<DesignPool>,
    /// Source de bruit partagée, initialisée avec le seed de configuration
    pub rng: tokio::sync::Mutex<ChaCha8Rng>,
    pub config: crate::config::AppConfig,
}

/// Requête de simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateRequest {
    pub experiment_type: ExperimentType,
    #[serde(default)]
    pub parameters: ExperimentParameters,
}

/// Requête de benchmark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkRequest {
    pub design_ids: Vec<DesignId>,
    #[serde(alias = "benchmark_type")]
    pub axis: BenchmarkAxis,
}

/// Liste des designs enregistrés
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignListResponse {
    pub total: usize,
    pub designs: Vec<DesignRecord>,
}

/// Réponse d'erreur standard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: String, code: u16) -> Self {
        Self {
            error,
            details: None,
            code,
        }
    }

    pub fn with_details(error: String, details: String, code: u16) -> Self {
        Self {
            error,
            details: Some(details),
            code,
        }
    }
}

/// Erreur d'API: NotFound → 404, argument invalide → 400, le reste → 500
#[derive(Debug)]
pub struct ApiError(pub RnaiError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<RnaiError> for ApiError {
    fn from(err: RnaiError) -> Self {
        Self(err)
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        Self(err.into())
    }
}

impl From<BlockingError> for ApiError {
    fn from(err: BlockingError) -> Self {
        Self(RnaiError::Internal(err.to_string()))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else if self.0.is_invalid_argument() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let label = match status {
            StatusCode::NOT_FOUND => "Ressource introuvable",
            StatusCode::BAD_REQUEST => "Requête invalide",
            _ => {
                rnai_core::log_error!(&self.0);
                "Erreur interne"
            }
        };
        HttpResponse::build(status).json(ErrorResponse::with_details(
            label.to_string(),
            self.0.to_string(),
            status.as_u16(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let not_found = ApiError(RnaiError::NotFound("design".into()));
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let invalid = ApiError(RnaiError::InvalidBase('X'));
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);

        let internal: ApiError = StorageError::PoolFull(1).into();
        assert_eq!(internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_error_body() {
        let response = ApiError(RnaiError::Internal("disque plein".into())).error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError(RnaiError::NotFound("design".into())).error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
