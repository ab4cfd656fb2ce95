//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use schemeurl_core::{IncomingLink, LogEntry, Preferences, SavedUrl, Theme};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a received link and its parameters
    pub fn print_incoming(&self, link: &IncomingLink) {
        match self.format {
            OutputFormat::Human => {
                println!("Received URL: {}", link.raw_url);
                for line in param_lines(link) {
                    println!("{}", line);
                }
            }
            OutputFormat::Json => {
                print_json(link);
            }
            OutputFormat::Quiet => {
                println!("{}", link.raw_url);
            }
        }
    }

    /// Print a single saved URL
    pub fn print_saved_url(&self, item: &SavedUrl) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:   {}", item.id);
                println!("Name: {}", item.name);
                println!("URL:  {}", item.url);
            }
            OutputFormat::Json => print_json(item),
            OutputFormat::Quiet => println!("{}", item.id),
        }
    }

    /// Print the saved URL list
    pub fn print_saved_urls(&self, items: &[SavedUrl]) {
        match self.format {
            OutputFormat::Human => {
                if items.is_empty() {
                    println!("No saved URLs.");
                    return;
                }
                for item in items {
                    println!(
                        "{} | {} | {}",
                        short_id(&item.id),
                        truncate(&item.name, 30),
                        truncate(&item.url, 50)
                    );
                }
                println!("\n{} saved URL(s)", items.len());
            }
            OutputFormat::Json => print_json(items),
            OutputFormat::Quiet => {
                for item in items {
                    println!("{}", item.id);
                }
            }
        }
    }

    /// Print application log entries
    pub fn print_logs(&self, entries: &[LogEntry]) {
        match self.format {
            OutputFormat::Human => {
                if entries.is_empty() {
                    println!("No log entries.");
                    return;
                }
                for entry in entries {
                    println!(
                        "{} [{:<7}] {}",
                        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                        entry.level,
                        entry.message
                    );
                }
            }
            OutputFormat::Json => print_json(entries),
            OutputFormat::Quiet => {
                for entry in entries {
                    println!("{}", entry.message);
                }
            }
        }
    }

    /// Print stored preferences and the theme they resolve to
    pub fn print_preferences(&self, prefs: &Preferences, theme: Theme) {
        match self.format {
            OutputFormat::Human => {
                let dark_mode = match prefs.dark_mode {
                    Some(true) => "on",
                    Some(false) => "off",
                    None => "system",
                };
                println!("Settings:");
                println!("  dark_mode:     {}", dark_mode);
                println!("  theme:         {}", if theme.is_dark() { "dark" } else { "light" });
                println!("  eula_accepted: {}", prefs.eula_accepted);
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "dark_mode": prefs.dark_mode,
                        "theme": theme,
                        "eula_accepted": prefs.eula_accepted
                    })
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode JSON output: {}", e),
    }
}

/// Human lines describing the parameters of a received link
fn param_lines(link: &IncomingLink) -> Vec<String> {
    match &link.query_params {
        None => vec!["No parameters".to_string()],
        Some(params) if params.is_empty() => vec!["Parameters: (empty query)".to_string()],
        Some(params) => std::iter::once("Parameters:".to_string())
            .chain(params.iter().map(|(k, v)| format!("  {} = {}", k, v)))
            .collect(),
    }
}

fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Truncate a string to max chars, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
