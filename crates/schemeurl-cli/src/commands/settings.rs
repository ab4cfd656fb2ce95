//! Preference command handlers

use anyhow::{bail, Context, Result};

use schemeurl_core::Theme;

use crate::context::AppContext;
use crate::output::Output;

/// Show stored preferences
pub async fn show(ctx: &AppContext, output: &Output) -> Result<()> {
    let prefs = ctx.settings.preferences().await;
    let theme = Theme::resolve(prefs.dark_mode, system_prefers_dark());
    output.print_preferences(&prefs, theme);
    Ok(())
}

/// Set dark mode to `on`, `off`, or `system`
pub async fn dark_mode(ctx: &AppContext, value: String, output: &Output) -> Result<()> {
    let saved = match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "dark" => ctx.settings.set_dark_mode(true).await,
        "off" | "false" | "light" => ctx.settings.set_dark_mode(false).await,
        "system" | "auto" => ctx.settings.clear_dark_mode().await,
        _ => bail!("Invalid dark mode '{}'. Use on, off, or system.", value),
    };
    saved.context("Failed to save dark mode preference")?;

    output.success(&format!("Dark mode: {}", value));
    Ok(())
}

/// Flip between light and dark
pub async fn toggle_theme(ctx: &AppContext, output: &Output) -> Result<()> {
    let theme = ctx
        .settings
        .toggle_theme(system_prefers_dark())
        .await
        .context("Failed to save dark mode preference")?;

    output.success(&format!(
        "Theme: {}",
        if theme.is_dark() { "dark" } else { "light" }
    ));
    Ok(())
}

pub async fn accept_eula(ctx: &AppContext, output: &Output) -> Result<()> {
    ctx.settings
        .set_eula_accepted(true)
        .await
        .context("Failed to save agreement")?;
    ctx.note("User agreement accepted").await;
    output.success("User agreement accepted");
    Ok(())
}

/// Guess the terminal background from COLORFGBG ("fg;bg")
fn system_prefers_dark() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .as_deref()
        .and_then(background_is_dark)
        .unwrap_or(false)
}

fn background_is_dark(colorfgbg: &str) -> Option<bool> {
    let bg: u8 = colorfgbg.rsplit(';').next()?.trim().parse().ok()?;
    Some(matches!(bg, 0..=6 | 8))
}
