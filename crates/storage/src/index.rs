//! Index du pool: ordre d'insertion des designs et cibles par checksum

use rnai_core::{sequence, DesignId, Target, TargetId};
use std::collections::HashMap;

/// Index secondaire du pool
#[derive(Debug, Default)]
pub struct DesignIndex {
    /// Ordre d'insertion
    order: Vec<DesignId>,

    /// Checksum de séquence -> cible déjà enregistrée
    targets: HashMap<String, TargetId>,
}

impl DesignIndex {
    /// Crée un nouvel index
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute un design en fin d'ordre
    pub fn insert(&mut self, id: DesignId) {
        self.order.push(id);
    }

    /// IDs dans l'ordre d'insertion
    pub fn ordered(&self) -> &[DesignId] {
        &self.order
    }

    /// Cible déjà indexée pour la même séquence
    pub fn target_for(&self, target: &Target) -> Option<TargetId> {
        self.targets.get(&sequence::checksum(&target.sequence)).copied()
    }

    /// Indexe une cible par le checksum de sa séquence
    pub fn insert_target(&mut self, target: &Target) {
        self.targets
            .entry(sequence::checksum(&target.sequence))
            .or_insert(target.id);
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
