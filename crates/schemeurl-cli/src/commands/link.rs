//! Saved URL command handlers

use anyhow::{bail, Context, Result};

use schemeurl_core::{validate_new_entry, IncomingLink, SavedUrl, StorageError};

use crate::context::AppContext;
use crate::output::Output;
use crate::prompt::{ask, confirm};

/// Save a new named scheme URL
///
/// Missing fields are asked for interactively when possible.
pub async fn add(
    ctx: &AppContext,
    name: Option<String>,
    url: Option<String>,
    output: &Output,
) -> Result<()> {
    let name = match name {
        Some(name) => name,
        None if output.should_prompt() => ask("Name", "My test URL")?,
        None => String::new(),
    };
    let url = match url {
        Some(url) => url,
        None if output.should_prompt() => {
            ask("Scheme URL", &format!("{}://home/user/123", ctx.config.scheme))?
        }
        None => String::new(),
    };

    validate_new_entry(&name, &url)?;

    let item = match ctx.saved.insert(name.trim(), url.trim()).await {
        Ok(item) => item,
        Err(e) => {
            ctx.note_error(format!("Failed to save {}: {}", url.trim(), e))
                .await;
            let hint = save_failure_hint(&e);
            return Err(anyhow::Error::new(e).context(hint));
        }
    };
    ctx.note(format!("Saved {} ({})", item.name, item.url)).await;

    output.success(&format!("Saved: {}", item.name));
    output.print_saved_url(&item);
    Ok(())
}

/// List saved URLs, newest first
pub async fn list(ctx: &AppContext, output: &Output) -> Result<()> {
    let items = ctx.saved.list_all().await;
    output.print_saved_urls(&items);
    Ok(())
}

/// Show one saved URL
pub async fn show(ctx: &AppContext, id: String, output: &Output) -> Result<()> {
    let item = resolve(ctx, &id).await?;
    output.print_saved_url(&item);
    Ok(())
}

/// Delete a saved URL
pub async fn remove(ctx: &AppContext, id: String, output: &Output) -> Result<()> {
    let item = resolve(ctx, &id).await?;

    if output.should_prompt() {
        println!("Delete: {} - {}", item.name, item.url);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    ctx.saved
        .remove_by_id(&item.id)
        .await
        .context("Failed to delete saved URL")?;
    ctx.note(format!("Removed {}", item.name)).await;

    output.success(&format!("Deleted: {}", item.name));
    Ok(())
}

/// Launch a saved URL through the operating system
pub async fn open(ctx: &AppContext, id: String, output: &Output) -> Result<()> {
    let item = resolve(ctx, &id).await?;

    if let Err(e) = open::that(&item.url) {
        ctx.note_error(format!("Cannot open {}: {}", item.url, e)).await;
        bail!("Cannot open '{}': {}", item.url, e);
    }
    ctx.note(format!("Opened {}", item.url)).await;

    output.success(&format!("Opened: {}", item.url));
    Ok(())
}

/// Show how a URL would be parsed, without recording anything
pub fn parse(url: String, output: &Output) -> Result<()> {
    output.print_incoming(&IncomingLink::from_raw(url));
    Ok(())
}

/// Message shown when saving fails
fn save_failure_hint(error: &StorageError) -> String {
    let base = if error.is_recoverable() {
        "Entry not saved, please retry"
    } else {
        "Entry not saved"
    };
    match error.recovery_suggestion() {
        Some(suggestion) => format!("{}. {}", base, suggestion),
        None => format!("{}.", base),
    }
}

/// Find a saved URL by full ID or unique ID prefix
async fn resolve(ctx: &AppContext, id: &str) -> Result<SavedUrl> {
    let items = ctx.saved.list_all().await;
    match_id(&items, id).cloned()
}

fn match_id<'a>(items: &'a [SavedUrl], id: &str) -> Result<&'a SavedUrl> {
    if id.is_empty() {
        bail!("No ID given");
    }

    if let Some(item) = items.iter().find(|item| item.id == id) {
        return Ok(item);
    }

    let matches: Vec<_> = items.iter().filter(|item| item.id.starts_with(id)).collect();

    match matches.len() {
        0 => bail!("No saved URL found matching: {}", id),
        1 => Ok(matches[0]),
        _ => {
            eprintln!("Multiple saved URLs match '{}':", id);
            for item in &matches {
                eprintln!("  {} - {}", item.id, item.name);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> SavedUrl {
        SavedUrl {
            id: id.to_string(),
            name: format!("name-{}", id),
            url: format!("myapp://{}", id),
        }
    }

    #[test]
    fn test_save_failure_hint_offers_retry_when_recoverable() {
        let rejected = StorageError::Rejected {
            key: "@saved_urls".to_string(),
            reason: "quota exceeded".to_string(),
        };
        let hint = save_failure_hint(&rejected);
        assert!(hint.starts_with("Entry not saved, please retry."));
        assert!(hint.contains("refused the write"));

        let broken = StorageError::WriteError {
            path: std::path::PathBuf::from("/data/x.json"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "device went away"),
        };
        assert_eq!(save_failure_hint(&broken), "Entry not saved.");
    }

    #[test]
    fn test_match_full_id() {
        let items = vec![item("abc123"), item("abc")];
        assert_eq!(match_id(&items, "abc").unwrap().id, "abc");
    }

    #[test]
    fn test_match_unique_prefix() {
        let items = vec![item("abc123"), item("def456")];
        assert_eq!(match_id(&items, "de").unwrap().id, "def456");
    }

    #[test]
    fn test_match_ambiguous_or_missing() {
        let items = vec![item("abc123"), item("abc456")];
        assert!(match_id(&items, "abc").is_err());
        assert!(match_id(&items, "zzz").is_err());
        assert!(match_id(&items, "").is_err());
    }
}
