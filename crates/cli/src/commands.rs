//! Sous-commandes de la CLI

pub mod benchmark;
pub mod design;
pub mod list;
pub mod predict;
pub mod simulate;
pub mod validate;

use anyhow::Result;
use rnai_core::{DesignEngine, EngineConfig};
use rnai_storage::{DesignPool, DesignService, PoolConfig};
use serde::Serialize;
use std::path::PathBuf;

/// Options globales partagées par les sous-commandes
pub struct Context {
    pub store: PathBuf,
    pub seed: u64,
    pub json: bool,
}

impl Context {
    /// Ouvre le service sur le fichier de stockage
    pub fn service(&self, engine: EngineConfig) -> Result<DesignService<DesignPool>> {
        let pool = DesignPool::open(PoolConfig {
            persistence_path: Some(self.store.clone()),
            ..Default::default()
        })?;
        Ok(DesignService::new(DesignEngine::new(engine), pool))
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            seed: self.seed,
            ..EngineConfig::default()
        }
    }
}

/// Affiche une valeur en JSON indenté
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
