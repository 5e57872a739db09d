// ============================================================================
// Domain Models Module
// Formats, decoded fields and editor configuration
// ============================================================================

pub mod bits;
pub mod config;
pub mod errors;
pub mod fields;
pub mod format;

pub use config::{EditorConfig, UnknownCodePolicy};
pub use errors::{FormatError, FormatResult};
pub use fields::{Classification, Ieee754Fields, PositFields, PositWidths};
pub use format::{low_mask, Format, TypeCode, MAX_BITS};
