//! Application log command handlers

use anyhow::{Context, Result};

use crate::context::AppContext;
use crate::output::Output;

pub async fn show(ctx: &AppContext, output: &Output) -> Result<()> {
    let entries = ctx.log.entries().await;
    output.print_logs(&entries);
    Ok(())
}

pub async fn clear(ctx: &AppContext, output: &Output) -> Result<()> {
    ctx.log.clear().await.context("Failed to clear logs")?;
    output.success("Logs cleared");
    Ok(())
}
