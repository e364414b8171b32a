//! Commande de liste

use super::{print_json, Context};
use crate::display::tables;
use anyhow::Result;

pub fn run(ctx: &Context) -> Result<()> {
    let service = ctx.service(ctx.engine_config())?;
    let records = service.list()?;

    if ctx.json {
        return print_json(&records);
    }

    if records.is_empty() {
        println!("Aucun design enregistré dans {}", ctx.store.display());
        return Ok(());
    }

    println!("{}", tables::record_table(&records));
    Ok(())
}
