//! RNAi Core Library
//!
//! Moteur de design de réactifs RNAi: génération de candidats siRNA/shRNA/miRNA
//! et antagomirs, scoring heuristique de spécificité et d'efficacité,
//! sélection, validation et benchmark.

pub mod benchmark;
pub mod design;
pub mod engine;
pub mod error;
pub mod generator;
pub mod logging;
pub mod math;
pub mod noise;
pub mod prediction;
pub mod scoring;
pub mod selector;
pub mod sequence;
pub mod validator;

// Réexportations principales
pub use benchmark::{benchmark, BenchmarkAxis, BenchmarkResult, DesignRanking};
pub use design::{
    Candidate, ConstructType, DesignId, DesignParameters, DesignParametersPatch, DesignRecord,
    OffTargetSummary, RiskLevel, ScoredDesign, Target, TargetId, TargetRegion,
    ThermodynamicProperties,
};
pub use engine::{DesignEngine, DesignRequest, DesignRun, EngineConfig, ValidationRequest};
pub use error::{Result, RnaiError};
pub use logging::{init_logging, init_logging_with};
pub use noise::{seeded, FixedNoise, NoiseSource};
pub use prediction::{predict_efficiency, EfficiencyPrediction};
pub use selector::{select, Selection, SelectionSummary};
pub use validator::{validate, SpecificityAnalysis, ValidationResult};
// Les macros log_operation et log_error sont automatiquement exportées à la racine du crate
