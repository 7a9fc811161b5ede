//! One-shot collection refresh.

use anyhow::{Context, Result};
use tracing::info;

use super::AppContext;
use crate::display::format_visitors;

pub fn run(ctx: &AppContext, json: bool) -> Result<()> {
    let cache = ctx.memory_cache();

    let Some(refresh) = cache.refresh()? else {
        eprintln!(
            "No mercenaries collection available (snapshot: {})",
            ctx.paths.snapshot.display()
        );
        return Ok(());
    };

    // A one-shot run exits right after, so the write has to land first
    refresh
        .pending_write
        .wait()
        .context("Failed to save visitor progress")?;
    info!(
        "Saved visitor progress to {}",
        ctx.paths.preferences.display()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&refresh.info)?);
    } else {
        println!("{}", format_visitors(&refresh.info.visitors));
    }

    Ok(())
}
