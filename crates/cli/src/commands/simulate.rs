//! Commande de simulation

use super::{print_json, Context};
use crate::create_progress_bar;
use anyhow::Result;
use rnai_core::{seeded, DesignId};
use rnai_simulation::{ExperimentParameters, ExperimentType, MetricsCollector};

pub fn run(
    ctx: &Context,
    id: DesignId,
    experiment: ExperimentType,
    concentration: f64,
    replicates: u32,
    iterations: usize,
) -> Result<()> {
    let service = ctx.service(ctx.engine_config())?;
    let parameters = ExperimentParameters {
        concentration,
        replicates,
        cell_line: None,
    };

    let mut rng = seeded(ctx.seed);
    let iterations = iterations.max(1);

    if iterations == 1 {
        let result = service.simulate(id, experiment, &parameters, &mut rng)?;
        if ctx.json {
            return print_json(&result);
        }
        println!("🧪 Simulation {} du design {}", experiment, id);
        println!("{}", result.format_table());
        for recommendation in &result.recommendations {
            println!("   • {}", recommendation);
        }
        return Ok(());
    }

    let pb = (!ctx.json).then(|| create_progress_bar(iterations as u64, "Simulation en cours..."));
    let mut collector = MetricsCollector::new();
    let mut results = Vec::with_capacity(iterations);

    for _ in 0..iterations {
        let result = service.simulate(id, experiment, &parameters, &mut rng)?;
        collector.add(result.clone());
        results.push(result);
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message(String::from("Simulation terminée"));
    }

    if ctx.json {
        return print_json(&results);
    }

    println!("\n📊 Résultats sur {} itérations ({}):", collector.len(), experiment);
    println!("   Knockdown moyen      : {:.1}%", 100.0 * collector.mean_knockdown());
    println!("   Écart type           : {:.1}%", 100.0 * collector.knockdown_std_dev());
    if let Some((min, max)) = collector.knockdown_range() {
        println!("   Min / Max            : {:.1}% / {:.1}%", 100.0 * min, 100.0 * max);
    }
    println!("   Impact viabilité moy.: {:.1}%", collector.mean_viability_impact());

    Ok(())
}
