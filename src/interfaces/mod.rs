// ============================================================================
// Interfaces Module
// Contains all trait definitions, contracts and shared code tables
// ============================================================================

mod codes;
mod event_handler;
mod format_codec;

pub use codes::{BitRole, EditOp, Field, Flag};
pub use event_handler::{EditEvent, EditHandler, LoggingEditHandler, NoOpEditHandler};
pub use format_codec::FormatCodec;
