//! Commande de validation

use super::{print_json, Context};
use crate::display::report;
use anyhow::Result;
use rnai_core::{seeded, ConstructType, ValidationRequest};

pub fn run(ctx: &Context, guide: String, target: String, construct: ConstructType) -> Result<()> {
    let request = ValidationRequest {
        guide_sequence: guide,
        target_sequence: target,
        construct_type: construct,
    };

    // Pas de stockage nécessaire
    let engine = rnai_core::DesignEngine::new(ctx.engine_config());
    let result = engine.validate(&request, &mut seeded(ctx.seed));

    if ctx.json {
        return print_json(&result);
    }

    report::print_validation(&result);
    Ok(())
}
