//! Commande de prédiction d'efficacité

use super::{print_json, Context};
use crate::display::report;
use anyhow::Result;
use rnai_core::DesignId;

pub fn run(ctx: &Context, id: DesignId) -> Result<()> {
    let service = ctx.service(ctx.engine_config())?;
    let prediction = service.predict_efficiency(id)?;

    if ctx.json {
        return print_json(&prediction);
    }

    report::print_prediction(id, &prediction);
    Ok(())
}
