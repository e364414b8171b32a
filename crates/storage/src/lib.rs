//! Stockage des cibles et des designs RNAi

pub mod error;
pub mod index;
pub mod pool;
pub mod service;
pub mod store;

pub use error::{Result, StorageError};
pub use index::DesignIndex;
pub use pool::{DesignPool, PoolConfig};
pub use service::{DesignOutcome, DesignService};
pub use store::{save_all, BatchSaveReport, DesignStore, FailedSave};
