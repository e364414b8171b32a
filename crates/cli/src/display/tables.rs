//! Tableaux de designs et de classements

use rnai_core::{DesignId, DesignRanking, DesignRecord, ScoredDesign};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct DesignRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Pos")]
    position: usize,
    #[tabled(rename = "Guide")]
    guide: String,
    #[tabled(rename = "Spécificité")]
    specificity: String,
    #[tabled(rename = "Efficacité")]
    efficacy: String,
    #[tabled(rename = "Tm")]
    melting_temperature: String,
    #[tabled(rename = "Off-targets")]
    off_targets: usize,
    #[tabled(rename = "Risque")]
    risk: String,
}

fn short_id(id: DesignId) -> String {
    id.to_string().chars().take(8).collect()
}

/// Tableau des designs sélectionnés, le design recommandé marqué d'une étoile
pub fn design_table(designs: &[ScoredDesign], recommended: Option<DesignId>) -> String {
    let rows: Vec<DesignRow> = designs
        .iter()
        .map(|d| {
            let marker = if Some(d.id) == recommended { "★ " } else { "" };
            DesignRow {
                id: format!("{}{}", marker, short_id(d.id)),
                position: d.candidate.position,
                guide: d.candidate.guide.clone(),
                specificity: format!("{:.3}", d.specificity_score),
                efficacy: format!("{:.3}", d.efficacy_prediction),
                melting_temperature: format!("{:.1}", d.thermodynamics.melting_temperature),
                off_targets: d.off_target.total_predicted_targets,
                risk: d.off_target.risk_classification.to_string(),
            }
        })
        .collect();

    Table::new(rows).to_string()
}

#[derive(Tabled)]
struct RankingRow {
    #[tabled(rename = "Rang")]
    rank: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Spécificité")]
    specificity: String,
    #[tabled(rename = "Efficacité")]
    efficacy: String,
}

pub fn ranking_table(rankings: &[DesignRanking]) -> String {
    let rows: Vec<RankingRow> = rankings
        .iter()
        .map(|r| RankingRow {
            rank: r.rank,
            id: r.design_id.to_string(),
            score: format!("{:.3}", r.composite_score),
            specificity: format!("{:.3}", r.specificity_score),
            efficacy: format!("{:.3}", r.efficacy_prediction),
        })
        .collect();

    Table::new(rows).to_string()
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    construct_type: String,
    #[tabled(rename = "Guide")]
    guide: String,
    #[tabled(rename = "Spécificité")]
    specificity: String,
    #[tabled(rename = "Efficacité")]
    efficacy: String,
    #[tabled(rename = "Créé le")]
    created_at: String,
}

pub fn record_table(records: &[DesignRecord]) -> String {
    let rows: Vec<RecordRow> = records
        .iter()
        .map(|r| RecordRow {
            id: r.id().to_string(),
            construct_type: r.design.construct_type.to_string(),
            guide: r.design.candidate.guide.clone(),
            specificity: format!("{:.3}", r.design.specificity_score),
            efficacy: format!("{:.3}", r.design.efficacy_prediction),
            created_at: r.created_at.format("%Y-%m-%d %H:%M").to_string(),
        })
        .collect();

    Table::new(rows).to_string()
}
