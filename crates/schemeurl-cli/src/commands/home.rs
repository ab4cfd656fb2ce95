//! Home view: the received link followed by the saved URLs

use anyhow::Result;

use schemeurl_core::{IncomingLink, LinkIngestion};

use crate::context::AppContext;
use crate::output::{Output, OutputFormat};

/// Ingest the launch link, if any, and record it
pub async fn handle_startup(
    ctx: &AppContext,
    ingestion: &LinkIngestion,
) -> Option<IncomingLink> {
    let raw = ingestion.startup_link()?.to_string();
    let link = ingestion.deliver(raw);
    ctx.note(format!("Received {}", link.raw_url)).await;
    Some(link)
}

/// Show the home view
pub async fn show(ctx: &AppContext, ingestion: &LinkIngestion, output: &Output) -> Result<()> {
    let received = handle_startup(ctx, ingestion).await;
    let saved = ctx.saved.list_all().await;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "received": received,
                    "saved": saved
                })
            );
        }
        _ => {
            match received {
                Some(ref link) => output.print_incoming(link),
                None => output.message("No URL received yet."),
            }
            output.message("");
            output.print_saved_urls(&saved);
        }
    }

    Ok(())
}
