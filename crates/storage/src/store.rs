//! Interface de persistance des designs

use crate::error::{Result, StorageError};
use rnai_core::{DesignId, DesignRecord, Target, TargetId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Stockage des cibles et des designs sélectionnés
///
/// Les enregistrements sont immuables: un design déjà présent n'est jamais
/// remplacé.
pub trait DesignStore: Send + Sync {
    fn save_target(&self, target: Target) -> Result<TargetId>;

    fn get_target(&self, id: TargetId) -> Result<Target>;

    fn save_design(&self, record: DesignRecord) -> Result<DesignId>;

    fn get_design(&self, id: DesignId) -> Result<DesignRecord>;

    /// Tous les designs, dans l'ordre d'enregistrement
    fn list_designs(&self) -> Result<Vec<DesignRecord>>;
}

/// Échec d'enregistrement d'un design d'un lot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedSave {
    pub design_id: DesignId,
    pub reason: String,
}

/// Bilan d'un enregistrement par lot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSaveReport {
    pub saved: Vec<DesignId>,
    pub failed: Vec<FailedSave>,
}

impl BatchSaveReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Enregistre chaque design indépendamment
///
/// Un échec n'interrompt pas le lot et n'affecte pas les designs déjà
/// enregistrés. Un design identique déjà présent (même run rejoué avec la même
/// graine) compte comme enregistré.
pub fn save_all<S: DesignStore + ?Sized>(store: &S, records: Vec<DesignRecord>) -> BatchSaveReport {
    let mut report = BatchSaveReport::default();

    for record in records {
        let id = record.id();
        let design = record.design.clone();
        match store.save_design(record) {
            Ok(saved) => report.saved.push(saved),
            Err(StorageError::DuplicateDesign(_))
                if store.get_design(id).is_ok_and(|existing| existing.design == design) =>
            {
                debug!("Design {} déjà enregistré", id);
                report.saved.push(id);
            }
            Err(e) => {
                warn!("Échec d'enregistrement du design {}: {}", id, e);
                report.failed.push(FailedSave {
                    design_id: id,
                    reason: e.to_string(),
                });
            }
        }
    }

    report
}
