//! Listen for incoming links on stdin
//!
//! Each non-empty line is treated as a deep link delivered to the running
//! process. Useful for wiring the binary behind a platform launcher that
//! forwards URLs to an already running instance.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use schemeurl_core::{IncomingLink, LinkIngestion};

use crate::commands::home::handle_startup;
use crate::context::AppContext;
use crate::output::Output;

pub async fn run(ctx: &AppContext, ingestion: &LinkIngestion, output: &Output) -> Result<()> {
    if let Some(link) = handle_startup(ctx, ingestion).await {
        output.print_incoming(&link);
    }

    // Store writes stay on this task; the subscriber only forwards.
    let (tx, mut rx) = mpsc::unbounded_channel::<IncomingLink>();
    let subscription = ingestion.subscribe(move |link| {
        let _ = tx.send(link);
    });

    output.message(&format!(
        "Listening for {}:// links on stdin (Ctrl-D to stop)",
        ctx.config.scheme
    ));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }
        ingestion.deliver(raw);

        while let Ok(link) = rx.try_recv() {
            output.print_incoming(&link);
            ctx.note(format!("Received {}", link.raw_url)).await;
        }
    }

    subscription.remove();
    Ok(())
}
