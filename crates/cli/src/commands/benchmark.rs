//! Commande de benchmark

use super::{print_json, Context};
use crate::display::tables;
use anyhow::Result;
use rnai_core::{seeded, BenchmarkAxis, DesignId};

pub fn run(ctx: &Context, ids: Vec<DesignId>, axis: BenchmarkAxis) -> Result<()> {
    let service = ctx.service(ctx.engine_config())?;
    let result = service.benchmark(&ids, axis, &mut seeded(ctx.seed))?;

    if ctx.json {
        return print_json(&result);
    }

    println!("🏁 Benchmark {} de {} designs", axis, ids.len());
    println!("{}", tables::ranking_table(&result.rankings));

    let aggregate = &result.aggregate;
    println!("   Score moyen   : {:.3}", aggregate.mean_score);
    println!("   Variance      : {:.4}", aggregate.variance);
    println!("   Score max     : {:.3}", aggregate.max_score);
    println!(
        "   Réussite      : {:.0}% (seuil {:.2})",
        100.0 * aggregate.success_rate,
        aggregate.success_threshold
    );

    Ok(())
}
