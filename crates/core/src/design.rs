//! Modèle de données: cibles, paramètres de design, candidats et designs scorés

use crate::error::{Result, RnaiError};
use crate::sequence;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifiant unique de design
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DesignId(Uuid);

impl DesignId {
    /// Génère un nouvel ID de design
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Dérive un ID déterministe d'une graine et d'une empreinte de candidat
    ///
    /// Même graine et même empreinte donnent le même ID; l'UUID porte les bits
    /// de version 4.
    pub fn derive(seed: u64, fingerprint: &[u8]) -> Self {
        let digest = Sha256::new()
            .chain_update(seed.to_le_bytes())
            .chain_update(fingerprint)
            .finalize();
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest[..16]);
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    /// Crée un ID depuis un UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Retourne l'UUID sous-jacent
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for DesignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DesignId {
    type Err = RnaiError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| RnaiError::InvalidArgument(format!("ID de design invalide '{}': {}", s, e)))
    }
}

/// Identifiant unique de cible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(Uuid);

impl TargetId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TargetId {
    type Err = RnaiError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| RnaiError::InvalidArgument(format!("ID de cible invalide '{}': {}", s, e)))
    }
}

/// Type de construction RNAi
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstructType {
    /// siRNA duplex avec overhang 3' UU
    #[serde(rename = "siRNA", alias = "sirna")]
    Sirna,
    /// shRNA en épingle à cheveux (guide + boucle + passager inversé)
    #[serde(rename = "shRNA", alias = "shrna")]
    Shrna,
    /// Mimique de miRNA avec mésappariements hors seed
    #[serde(rename = "miRNA_mimic", alias = "mirna_mimic")]
    MirnaMimic,
    /// Antagomir: complément inverse de la fenêtre
    #[serde(rename = "antagomir")]
    Antagomir,
}

impl ConstructType {
    /// Toutes les variantes, dans l'ordre de présentation
    pub const ALL: [ConstructType; 4] = [
        ConstructType::Sirna,
        ConstructType::Shrna,
        ConstructType::MirnaMimic,
        ConstructType::Antagomir,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConstructType::Sirna => "siRNA",
            ConstructType::Shrna => "shRNA",
            ConstructType::MirnaMimic => "miRNA_mimic",
            ConstructType::Antagomir => "antagomir",
        }
    }

    /// Longueur de guide par défaut
    pub fn default_length(self) -> usize {
        match self {
            ConstructType::Sirna => 21,
            ConstructType::Shrna => 19,
            ConstructType::MirnaMimic => 22,
            ConstructType::Antagomir => 22,
        }
    }

    /// Longueurs de guide acceptées par le validateur
    pub fn allowed_lengths(self) -> &'static [usize] {
        match self {
            ConstructType::Sirna => &[19, 21, 23],
            ConstructType::Shrna => &[19, 21],
            ConstructType::MirnaMimic => &[20, 22, 24],
            ConstructType::Antagomir => &[18, 20, 22],
        }
    }
}

impl fmt::Display for ConstructType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConstructType {
    type Err = RnaiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "sirna" => Ok(ConstructType::Sirna),
            "shrna" => Ok(ConstructType::Shrna),
            "mirna_mimic" | "mirna" => Ok(ConstructType::MirnaMimic),
            "antagomir" => Ok(ConstructType::Antagomir),
            other => Err(RnaiError::InvalidArgument(format!(
                "Type de construction non supporté: {}",
                other
            ))),
        }
    }
}

/// Région préférée de la cible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetRegion {
    #[default]
    Any,
    Cds,
    Utr5,
    Utr3,
}

/// Paramètres de design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignParameters {
    /// Longueur du guide (bases)
    pub length: usize,
    /// Fraction GC minimale (0-1)
    pub gc_min: f64,
    /// Fraction GC maximale (0-1)
    pub gc_max: f64,
    pub avoid_seed_complementarity: bool,
    /// Rejette les fenêtres contenant une répétition en tandem
    pub filter_repeats: bool,
    pub filter_snps: bool,
    /// Espacement minimal entre designs (bases)
    pub min_spacing: usize,
    pub target_region: TargetRegion,
    pub thermodynamic_asymmetry: bool,
    pub algorithm_version: String,
}

impl DesignParameters {
    /// Paramètres par défaut pour un type de construction
    pub fn for_construct(construct_type: ConstructType) -> Self {
        Self {
            length: construct_type.default_length(),
            gc_min: 0.3,
            gc_max: 0.7,
            avoid_seed_complementarity: true,
            filter_repeats: true,
            filter_snps: true,
            min_spacing: 0,
            target_region: TargetRegion::Any,
            thermodynamic_asymmetry: true,
            algorithm_version: "1.0".to_string(),
        }
    }

    /// Vérifie la cohérence des paramètres
    pub fn check(&self) -> Result<()> {
        if self.length == 0 {
            return Err(RnaiError::InvalidArgument(
                "La longueur du guide doit être positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.gc_min) || !(0.0..=1.0).contains(&self.gc_max) {
            return Err(RnaiError::InvalidArgument(format!(
                "Plage GC hors de [0, 1]: [{:.2}, {:.2}]",
                self.gc_min, self.gc_max
            )));
        }
        if self.gc_min > self.gc_max {
            return Err(RnaiError::InvalidArgument(format!(
                "Plage GC inversée: {:.2} > {:.2}",
                self.gc_min, self.gc_max
            )));
        }
        Ok(())
    }
}

impl Default for DesignParameters {
    fn default() -> Self {
        Self::for_construct(ConstructType::Sirna)
    }
}

/// Paramètres partiels fournis par une requête, fusionnés sur les défauts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignParametersPatch {
    pub length: Option<usize>,
    pub gc_min: Option<f64>,
    pub gc_max: Option<f64>,
    pub avoid_seed_complementarity: Option<bool>,
    pub filter_repeats: Option<bool>,
    pub filter_snps: Option<bool>,
    pub min_spacing: Option<usize>,
    pub target_region: Option<TargetRegion>,
    pub thermodynamic_asymmetry: Option<bool>,
    pub algorithm_version: Option<String>,
}

impl DesignParametersPatch {
    /// Fusionne les champs renseignés sur `base`
    pub fn merge_onto(self, base: DesignParameters) -> DesignParameters {
        DesignParameters {
            length: self.length.unwrap_or(base.length),
            gc_min: self.gc_min.unwrap_or(base.gc_min),
            gc_max: self.gc_max.unwrap_or(base.gc_max),
            avoid_seed_complementarity: self
                .avoid_seed_complementarity
                .unwrap_or(base.avoid_seed_complementarity),
            filter_repeats: self.filter_repeats.unwrap_or(base.filter_repeats),
            filter_snps: self.filter_snps.unwrap_or(base.filter_snps),
            min_spacing: self.min_spacing.unwrap_or(base.min_spacing),
            target_region: self.target_region.unwrap_or(base.target_region),
            thermodynamic_asymmetry: self
                .thermodynamic_asymmetry
                .unwrap_or(base.thermodynamic_asymmetry),
            algorithm_version: self.algorithm_version.unwrap_or(base.algorithm_version),
        }
    }

    /// Résout les paramètres complets pour un type de construction
    pub fn resolve(self, construct_type: ConstructType) -> DesignParameters {
        self.merge_onto(DesignParameters::for_construct(construct_type))
    }
}

/// Séquence cible de référence (lecture seule pour le moteur)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    pub name: String,
    pub sequence: String,
    pub organism: Option<String>,
    pub target_type: Option<String>,
}

impl Target {
    /// Crée une cible après vérification de l'alphabet
    pub fn new(name: impl Into<String>, sequence: impl Into<String>) -> Result<Self> {
        let sequence: String = sequence.into();
        if let Some(bad) = sequence::first_invalid_base(&sequence) {
            return Err(RnaiError::InvalidBase(bad));
        }

        Ok(Self {
            id: TargetId::generate(),
            name: name.into(),
            sequence: sequence.to_ascii_uppercase(),
            organism: None,
            target_type: None,
        })
    }

    pub fn with_organism(mut self, organism: impl Into<String>) -> Self {
        self.organism = Some(organism.into());
        self
    }

    pub fn with_target_type(mut self, target_type: impl Into<String>) -> Self {
        self.target_type = Some(target_type.into());
        self
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Checksum SHA-256 de la séquence
    pub fn checksum(&self) -> String {
        sequence::checksum(&self.sequence)
    }
}

/// Candidat transitoire produit par le générateur
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Position de la fenêtre dans la cible (0-based)
    pub position: usize,
    pub guide: String,
    pub passenger: Option<String>,
    pub loop_sequence: Option<String>,
    pub full_sequence: String,
}

/// Propriétés thermodynamiques heuristiques d'un guide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermodynamicProperties {
    /// Température de fusion (°C)
    pub melting_temperature: f64,
    pub guide_stability: f64,
    pub passenger_stability: f64,
    /// Différence absolue normalisée des stabilités (>= 0)
    pub asymmetry_score: f64,
    pub internal_stability: f64,
    pub seed_stability: f64,
    /// Une valeur par position du guide (approximation, pas du nearest-neighbor)
    pub free_energy_profile: Vec<f64>,
}

/// Classe de risque off-target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Classe un score de spécificité
    pub fn from_specificity(specificity: f64) -> Self {
        if specificity > 0.8 {
            RiskLevel::Low
        } else if specificity > 0.6 {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        };
        f.write_str(label)
    }
}

/// Résumé des off-targets prédits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffTargetSummary {
    pub total_predicted_targets: usize,
    pub high_confidence_targets: usize,
    pub seed_matches: usize,
    pub risk_classification: RiskLevel,
}

/// Candidat scoré, persisté une fois sélectionné
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDesign {
    pub id: DesignId,
    pub construct_type: ConstructType,
    pub candidate: Candidate,
    /// Spécificité dans [0, 1]
    pub specificity_score: f64,
    /// Efficacité prédite dans [0, 1]
    pub efficacy_prediction: f64,
    pub thermodynamics: ThermodynamicProperties,
    pub off_target: OffTargetSummary,
}

impl ScoredDesign {
    pub fn guide(&self) -> &str {
        &self.candidate.guide
    }
}

/// Design persisté (immuable une fois enregistré)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRecord {
    pub design: ScoredDesign,
    pub target_id: Option<TargetId>,
    pub target_checksum: String,
    pub parameters: DesignParameters,
    pub created_at: DateTime<Utc>,
}

impl DesignRecord {
    pub fn new(
        design: ScoredDesign,
        target_id: Option<TargetId>,
        target_sequence: &str,
        parameters: DesignParameters,
    ) -> Self {
        Self {
            design,
            target_id,
            target_checksum: sequence::checksum(target_sequence),
            parameters,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> DesignId {
        self.design.id
    }
}
