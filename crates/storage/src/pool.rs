//! Pool de designs en mémoire avec persistance JSON

use crate::error::{Result, StorageError};
use crate::index::DesignIndex;
use crate::store::DesignStore;
use parking_lot::RwLock;
use rnai_core::{DesignId, DesignRecord, Target, TargetId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration du pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Taille maximale du pool (designs, et cibles distinctes)
    pub max_size: usize,

    /// Fichier de persistance
    pub persistence_path: Option<PathBuf>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_size: 100_000,
            persistence_path: None,
        }
    }
}

/// Contenu sérialisé du pool
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    targets: Vec<Target>,
    designs: Vec<DesignRecord>,
}

#[derive(Debug, Default)]
struct PoolState {
    targets: HashMap<TargetId, Target>,
    designs: HashMap<DesignId, DesignRecord>,
    index: DesignIndex,
}

impl PoolState {
    fn insert_design(&mut self, record: DesignRecord, max_size: usize) -> Result<DesignId> {
        let id = record.id();
        if self.designs.contains_key(&id) {
            return Err(StorageError::DuplicateDesign(id));
        }
        if self.designs.len() >= max_size {
            return Err(StorageError::PoolFull(max_size));
        }

        self.index.insert(id);
        self.designs.insert(id, record);
        Ok(id)
    }

    /// Enregistre une cible, ou retourne celle qui porte déjà la même séquence
    fn insert_target(&mut self, target: Target, max_size: usize) -> Result<TargetId> {
        if let Some(existing) = self.index.target_for(&target) {
            return Ok(existing);
        }
        if self.targets.len() >= max_size {
            return Err(StorageError::PoolFull(max_size));
        }

        let id = target.id;
        self.index.insert_target(&target);
        self.targets.insert(id, target);
        Ok(id)
    }

    fn collect(&self, ids: &[DesignId]) -> Vec<DesignRecord> {
        ids.iter().filter_map(|id| self.designs.get(id).cloned()).collect()
    }
}

/// Pool de designs partagé entre threads
#[derive(Debug)]
pub struct DesignPool {
    state: RwLock<PoolState>,
    config: PoolConfig,
}

impl Default for DesignPool {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

impl DesignPool {
    /// Crée un pool vide
    pub fn new(config: PoolConfig) -> Self {
        Self {
            state: RwLock::new(PoolState::default()),
            config,
        }
    }

    /// Crée un pool et recharge le fichier de persistance s'il existe
    pub fn open(config: PoolConfig) -> Result<Self> {
        let pool = Self::new(config);
        if let Some(path) = pool.config.persistence_path.clone() {
            if path.exists() {
                pool.load(&path)?;
            }
        }
        Ok(pool)
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Nombre de designs
    pub fn len(&self) -> usize {
        self.state.read().designs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().designs.is_empty()
    }

    /// Nombre de cibles distinctes
    pub fn target_count(&self) -> usize {
        self.state.read().targets.len()
    }

    /// Vide le pool
    pub fn clear(&self) {
        *self.state.write() = PoolState::default();
    }

    /// Sauvegarde le pool sur disque
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let snapshot = {
            let state = self.state.read();
            Snapshot {
                targets: state.targets.values().cloned().collect(),
                designs: state.collect(state.index.ordered()),
            }
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(path.as_ref(), json)?;
        info!(
            "Pool sauvegardé: {} designs dans {}",
            snapshot.designs.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Sauvegarde dans le fichier configuré, si présent
    pub fn flush(&self) -> Result<()> {
        match &self.config.persistence_path {
            Some(path) => self.save(path),
            None => Ok(()),
        }
    }

    /// Charge un pool depuis disque (remplace le contenu courant)
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let snapshot: Snapshot = serde_json::from_str(&json)?;

        let mut state = PoolState::default();
        for target in snapshot.targets {
            state.insert_target(target, self.config.max_size)?;
        }
        for record in snapshot.designs {
            state.insert_design(record, self.config.max_size)?;
        }

        debug!(
            "Pool rechargé depuis {}: {} designs",
            path.as_ref().display(),
            state.designs.len()
        );
        *self.state.write() = state;
        Ok(())
    }
}

impl DesignStore for DesignPool {
    fn save_target(&self, target: Target) -> Result<TargetId> {
        self.state.write().insert_target(target, self.config.max_size)
    }

    fn get_target(&self, id: TargetId) -> Result<Target> {
        self.state
            .read()
            .targets
            .get(&id)
            .cloned()
            .ok_or(StorageError::TargetNotFound(id))
    }

    fn save_design(&self, record: DesignRecord) -> Result<DesignId> {
        self.state.write().insert_design(record, self.config.max_size)
    }

    fn get_design(&self, id: DesignId) -> Result<DesignRecord> {
        self.state
            .read()
            .designs
            .get(&id)
            .cloned()
            .ok_or(StorageError::DesignNotFound(id))
    }

    fn list_designs(&self) -> Result<Vec<DesignRecord>> {
        let state = self.state.read();
        Ok(state.collect(state.index.ordered()))
    }
}
