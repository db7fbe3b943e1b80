//! Deploy event port
//!
//! Observable interface for deployment sessions. Sinks receive typed
//! events including `(label, percent)` progress tuples; emission is
//! synchronous and fire-and-forget - a sink cannot abort the session.

use std::path::PathBuf;

/// Event emitted during a deployment or purge session
#[derive(Debug, Clone)]
pub enum DeployEvent {
    /// Session started
    Started {
        game_id: String,
        destination: PathBuf,
        mod_count: usize,
    },

    /// Progress update: a label and a 0-100 percentage
    Progress { label: String, percent: u8 },

    /// One mod was activated
    ModActivated { index: usize, mod_id: String },

    /// One mod failed to activate (session continues)
    ModFailed {
        index: usize,
        mod_id: String,
        error: String,
    },

    /// Session finished
    Completed {
        deployed: usize,
        warning_count: usize,
    },

    /// Purge finished
    Purged {
        removed: usize,
        warning_count: usize,
    },
}

/// Trait for receiving deploy events
///
/// Implementations can render terminal progress, stream NDJSON for CI,
/// or ignore everything.
pub trait DeployEventSink: Send + Sync {
    /// Handle one event
    fn on_event(&self, event: DeployEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Test sink that records all events
    pub(crate) struct RecordingEventSink {
        events: Arc<Mutex<Vec<DeployEvent>>>,
    }

    impl RecordingEventSink {
        fn new() -> (Self, Arc<Mutex<Vec<DeployEvent>>>) {
            let events = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    events: events.clone(),
                },
                events,
            )
        }
    }

    impl DeployEventSink for RecordingEventSink {
        fn on_event(&self, event: DeployEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn recording_sink_captures_events() {
        let (sink, events) = RecordingEventSink::new();

        sink.on_event(DeployEvent::Started {
            game_id: "skyrim".to_string(),
            destination: PathBuf::from("/games/skyrim/data"),
            mod_count: 3,
        });
        sink.on_event(DeployEvent::Progress {
            label: "SkyUI".to_string(),
            percent: 17,
        });

        assert_eq!(events.lock().unwrap().len(), 2);
    }
}
