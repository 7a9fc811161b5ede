//! Display of the persisted visitor progress.

use anyhow::{Context, Result};
use mercs_core::PreferenceStore;

use super::AppContext;
use crate::display::{format_visitors, summarize};

pub fn run(ctx: &AppContext, json: bool) -> Result<()> {
    let store = ctx.preference_store();
    let prefs = store.get().with_context(|| {
        format!(
            "Failed to read preferences from {}",
            ctx.paths.preferences.display()
        )
    })?;
    let visitors = &prefs.mercenaries_visitors_progress;

    if json {
        println!("{}", serde_json::to_string_pretty(visitors)?);
    } else {
        println!("{}", format_visitors(visitors));
        println!();
        println!("{}", summarize(visitors));
    }

    Ok(())
}
