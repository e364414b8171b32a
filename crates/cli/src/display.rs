//! Affichage des résultats

pub mod report;
pub mod tables;
