//! Simulation d'expériences RNAi
//!
//! Courbes dose-réponse, suivi temporel, profil de sécurité et statistiques
//! synthétiques pour un design scoré.

pub mod experiment;
pub mod metrics;
pub mod simulator;

pub use experiment::{ExperimentParameters, ExperimentType};
pub use metrics::{
    DosePoint, EfficiencyMetrics, ExperimentResult, ExperimentStatistics, MetricsCollector,
    OffTargetEffect, Relevance, SafetyProfile, TimePoint,
};
pub use simulator::{simulate, ExperimentSimulator};
