//! Service de design: moteur + stockage

use crate::store::{save_all, BatchSaveReport, DesignStore};
use rnai_core::{
    benchmark, predict_efficiency, BenchmarkAxis, BenchmarkResult, DesignEngine, DesignId,
    DesignParameters, DesignRecord, DesignRequest, EfficiencyPrediction, NoiseSource, Result,
    RnaiError, ScoredDesign, SelectionSummary, Target, TargetId, ValidationRequest,
    ValidationResult,
};
use rnai_simulation::{simulate, ExperimentParameters, ExperimentResult, ExperimentType};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Résultat d'un run persisté
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignOutcome {
    pub target_id: TargetId,
    pub parameters: DesignParameters,
    pub designs: Vec<ScoredDesign>,
    pub summary: SelectionSummary,
    pub persistence: BatchSaveReport,
}

/// Point d'entrée des opérations de design
pub struct DesignService<S: DesignStore> {
    engine: DesignEngine,
    store: S,
}

impl<S: DesignStore> DesignService<S> {
    pub fn new(engine: DesignEngine, store: S) -> Self {
        Self { engine, store }
    }

    pub fn engine(&self) -> &DesignEngine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Génère, score, sélectionne et persiste les designs d'une cible
    #[instrument(skip_all, fields(construct = %request.construct_type))]
    pub fn design(&self, request: &DesignRequest, noise: &mut dyn NoiseSource) -> Result<DesignOutcome> {
        let run = self.engine.design(request, noise)?;

        let target = Target::new(target_name(&request.target_sequence), &request.target_sequence)?
            .with_target_type(request.construct_type.as_str());
        let target_id = self.store.save_target(target)?;

        let records = run
            .selection
            .designs
            .iter()
            .cloned()
            .map(|d| DesignRecord::new(d, Some(target_id), &request.target_sequence, run.parameters.clone()))
            .collect();
        let persistence = save_all(&self.store, records);

        if persistence.is_complete() {
            info!("{} designs enregistrés pour la cible {}", persistence.saved.len(), target_id);
        } else {
            warn!(
                "{} designs enregistrés, {} échecs pour la cible {}",
                persistence.saved.len(),
                persistence.failed.len(),
                target_id
            );
        }

        Ok(DesignOutcome {
            target_id,
            parameters: run.parameters,
            designs: run.selection.designs,
            summary: run.selection.summary,
            persistence,
        })
    }

    pub fn validate(&self, request: &ValidationRequest, noise: &mut dyn NoiseSource) -> ValidationResult {
        self.engine.validate(request, noise)
    }

    pub fn get(&self, id: DesignId) -> Result<DesignRecord> {
        Ok(self.store.get_design(id)?)
    }

    pub fn list(&self) -> Result<Vec<DesignRecord>> {
        Ok(self.store.list_designs()?)
    }

    /// Prédiction d'efficacité d'un design enregistré
    #[instrument(skip(self))]
    pub fn predict_efficiency(&self, id: DesignId) -> Result<EfficiencyPrediction> {
        let record = self.store.get_design(id)?;
        Ok(predict_efficiency(&record.design))
    }

    /// Simule une expérience sur un design enregistré
    #[instrument(skip(self, parameters, noise))]
    pub fn simulate(
        &self,
        id: DesignId,
        experiment_type: ExperimentType,
        parameters: &ExperimentParameters,
        noise: &mut dyn NoiseSource,
    ) -> Result<ExperimentResult> {
        if !parameters.is_valid() {
            return Err(RnaiError::InvalidArgument(format!(
                "Paramètres d'expérience invalides: concentration {}, {} réplicats",
                parameters.concentration, parameters.replicates
            )));
        }

        let record = self.store.get_design(id)?;
        Ok(simulate(&record.design, experiment_type, parameters, noise))
    }

    /// Compare des designs enregistrés
    ///
    /// Tous les IDs sont résolus avant tout calcul.
    #[instrument(skip(self, ids, noise), fields(count = ids.len()))]
    pub fn benchmark(
        &self,
        ids: &[DesignId],
        axis: BenchmarkAxis,
        noise: &mut dyn NoiseSource,
    ) -> Result<BenchmarkResult> {
        let designs = ids
            .iter()
            .map(|id| self.store.get_design(*id).map(|r| r.design))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(benchmark(&designs, axis, noise))
    }
}

fn target_name(sequence: &str) -> String {
    let checksum = rnai_core::sequence::checksum(sequence);
    format!("target-{}", &checksum[..12])
}
