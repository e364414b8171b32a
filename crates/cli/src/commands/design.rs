//! Commande de design

use super::{print_json, Context};
use crate::create_spinner;
use crate::display::tables;
use anyhow::{anyhow, bail, Result};
use console::style;
use rnai_core::{seeded, ConstructType, DesignParametersPatch, DesignRequest, EngineConfig};
use std::path::{Path, PathBuf};

pub struct DesignOptions {
    pub target: Option<String>,
    pub input: Option<PathBuf>,
    pub construct: ConstructType,
    pub length: Option<usize>,
    pub gc_min: Option<f64>,
    pub gc_max: Option<f64>,
    pub filter_repeats: bool,
    pub max_designs: Option<usize>,
    pub max_candidates: usize,
}

pub fn run(ctx: &Context, options: DesignOptions) -> Result<()> {
    let target_sequence = match (&options.target, &options.input) {
        (Some(sequence), _) => sequence.trim().to_string(),
        (None, Some(path)) => read_first_record(path)?,
        (None, None) => bail!("Une cible est requise (--target ou --input)"),
    };

    let request = DesignRequest {
        target_sequence,
        construct_type: options.construct,
        design_parameters: DesignParametersPatch {
            length: options.length,
            gc_min: options.gc_min,
            gc_max: options.gc_max,
            filter_repeats: Some(options.filter_repeats),
            ..Default::default()
        },
        max_designs: options.max_designs,
    };

    let service = ctx.service(EngineConfig {
        max_candidates: options.max_candidates,
        ..ctx.engine_config()
    })?;

    let spinner = (!ctx.json).then(|| {
        create_spinner(&format!(
            "Design {} sur {} bases...",
            options.construct,
            request.target_sequence.len()
        ))
    });

    let outcome = service.design(&request, &mut seeded(ctx.seed));
    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }
    let outcome = outcome?;
    service.store().flush()?;

    if ctx.json {
        return print_json(&outcome);
    }

    println!(
        "🧬 {} designs de {} nt retenus sur {} candidats évalués ({} passent le seuil de spécificité)",
        outcome.designs.len(),
        outcome.parameters.length,
        outcome.summary.total_evaluated,
        outcome.summary.passing_filters
    );

    if outcome.designs.is_empty() {
        println!("{}", style("Aucun candidat ne passe les filtres").yellow());
        return Ok(());
    }

    println!("{}", tables::design_table(&outcome.designs, outcome.summary.recommended_id));
    println!(
        "   Spécificité moyenne: {:.3}",
        outcome.summary.average_specificity
    );

    for failure in &outcome.persistence.failed {
        println!(
            "{} {}: {}",
            style("⚠ Non enregistré").red(),
            failure.design_id,
            failure.reason
        );
    }
    println!(
        "\n✅ {} designs enregistrés dans {}",
        outcome.persistence.saved.len(),
        ctx.store.display()
    );

    Ok(())
}

/// Lit la séquence du premier enregistrement FASTA
fn read_first_record(path: &Path) -> Result<String> {
    let reader = bio::io::fasta::Reader::from_file(path)?;
    let record = reader
        .records()
        .next()
        .ok_or_else(|| anyhow!("Aucune séquence dans {}", path.display()))??;

    Ok(String::from_utf8(record.seq().to_vec())?)
}
