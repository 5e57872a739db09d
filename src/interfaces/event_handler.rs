// ============================================================================
// Edit Handler Interface
// Defines the contract for observing editor mutations
// ============================================================================

use super::codes::EditOp;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events emitted by a value editor
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EditEvent {
    /// Edit applied, pattern possibly changed
    Applied {
        type_name: String,
        op: EditOp,
        before: u64,
        after: u64,
        version: u64,
    },

    /// Code unknown or not applicable to this format
    Unapplied {
        type_name: String,
        code: i32,
        version_bumped: bool,
        version: u64,
    },

    /// Serialized payload rejected; the pattern was reset to zero
    PayloadRejected {
        type_name: String,
        payload: String,
        reason: String,
        version: u64,
    },
}

/// Observer for editor mutations.
/// Implementations can handle logging, undo history, UI refresh, etc.
pub trait EditHandler: Send + Sync {
    /// Handle an editor event
    fn on_event(&self, event: EditEvent);

    /// Batch handler (optional optimization)
    fn on_events(&self, events: Vec<EditEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op handler for testing
pub struct NoOpEditHandler;

impl EditHandler for NoOpEditHandler {
    fn on_event(&self, _event: EditEvent) {}
}

/// Logging handler
pub struct LoggingEditHandler;

impl EditHandler for LoggingEditHandler {
    fn on_event(&self, event: EditEvent) {
        tracing::debug!("Value editor event: {:?}", event);
    }
}
