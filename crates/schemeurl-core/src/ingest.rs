//! Deep-link ingestion
//!
//! Turns URLs handed to the process into [`IncomingLink`] events. Two
//! delivery paths exist:
//!
//! - the link that launched the process, read once from a [`LinkSource`]
//! - links arriving while running, pushed in through [`LinkIngestion::deliver`]
//!
//! Each event goes to the single current subscriber and is also published
//! on a `watch` channel holding the most recent link, so a display can
//! either react to callbacks or poll/await the latest state.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use tracing::debug;

use crate::models::IncomingLink;

/// Where the launch link comes from
pub trait LinkSource {
    /// The URL that started the process, if it was started by one
    fn startup_link(&self) -> Option<String>;
}

/// Launch link taken from command-line arguments
///
/// Registering a scheme with the OS makes it run `<exe> "<url>"`; the
/// first argument using the scheme is taken as the launch link.
#[derive(Debug, Clone, Default)]
pub struct LaunchArgs {
    url: Option<String>,
}

impl LaunchArgs {
    pub fn new(url: Option<String>) -> Self {
        Self { url }
    }

    /// Scan `args` for the first value of the form `<scheme>:...`
    pub fn from_args<I, T>(args: I, scheme: &str) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let prefix = format!("{}:", scheme.to_ascii_lowercase());
        let url = args
            .into_iter()
            .map(Into::into)
            .find(|arg| arg.to_ascii_lowercase().starts_with(&prefix));
        Self { url }
    }
}

impl LinkSource for LaunchArgs {
    fn startup_link(&self) -> Option<String> {
        self.url.clone()
    }
}

type Handler = Arc<dyn Fn(IncomingLink) + Send + Sync>;

#[derive(Default)]
struct Slot {
    next_id: u64,
    current: Option<(u64, Handler)>,
}

/// Receives deep links and hands them to the active display
pub struct LinkIngestion {
    startup: Option<String>,
    slot: Arc<Mutex<Slot>>,
    received: watch::Sender<Option<IncomingLink>>,
}

impl LinkIngestion {
    /// Create the ingestion point, reading the launch link from `source`
    ///
    /// `source` is queried exactly once, here.
    pub fn new(source: &impl LinkSource) -> Self {
        let startup = source.startup_link();
        if let Some(ref url) = startup {
            debug!(url = %url, "Process launched by link");
        }
        let (received, _) = watch::channel(None);

        Self {
            startup,
            slot: Arc::new(Mutex::new(Slot::default())),
            received,
        }
    }

    /// The link that launched the process, as captured at construction
    pub fn startup_link(&self) -> Option<&str> {
        self.startup.as_deref()
    }

    /// Register the handler for links arriving from now on
    ///
    /// Only one subscriber is active at a time; subscribing again replaces
    /// the previous handler. Deregister with [`Subscription::remove`] or by
    /// dropping the returned guard.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(IncomingLink) + Send + Sync + 'static,
    {
        let mut slot = lock(&self.slot);
        slot.next_id += 1;
        let id = slot.next_id;
        if slot.current.replace((id, Arc::new(handler))).is_some() {
            debug!("Replacing previous link subscriber");
        }

        Subscription {
            id,
            slot: Arc::downgrade(&self.slot),
        }
    }

    #[cfg(test)]
    fn has_subscriber(&self) -> bool {
        lock(&self.slot).current.is_some()
    }

    /// Ingest a link received while running
    ///
    /// Never fails: malformed URLs produce an event with partial or no
    /// parameters.
    pub fn deliver(&self, raw_url: impl Into<String>) -> IncomingLink {
        let link = IncomingLink::from_raw(raw_url);
        debug!(
            url = %link.raw_url,
            params = link.query_params.as_ref().map_or(0, |p| p.len()),
            "Incoming link"
        );

        self.received.send_replace(Some(link.clone()));

        // Call outside the lock so the handler may resubscribe
        let handler = lock(&self.slot).current.as_ref().map(|(_, h)| Arc::clone(h));
        match handler {
            Some(handler) => handler(link.clone()),
            None => debug!("No link subscriber, event kept as latest state only"),
        }

        link
    }

    /// Watch the most recently received link
    pub fn received(&self) -> watch::Receiver<Option<IncomingLink>> {
        self.received.subscribe()
    }

    /// The most recently received link, if any
    pub fn latest(&self) -> Option<IncomingLink> {
        self.received.borrow().clone()
    }
}

/// Registration handle returned by [`LinkIngestion::subscribe`]
///
/// Dropping it deregisters the handler. A handle whose handler was already
/// replaced by a newer subscription does nothing.
#[must_use = "dropping the subscription deregisters the handler immediately"]
pub struct Subscription {
    id: u64,
    slot: std::sync::Weak<Mutex<Slot>>,
}

impl Subscription {
    /// Deregister the handler
    pub fn remove(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(slot) = self.slot.upgrade() else {
            return;
        };
        let mut slot = lock(&slot);
        if matches!(&slot.current, Some((id, _)) if *id == self.id) {
            slot.current = None;
        }
    }
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(|e| e.into_inner())
}
