// ============================================================================
// Editor Module
// Value editors, their factory and the process-wide registry
// ============================================================================

pub mod factory;
mod registry;
mod value_editor;

pub use factory::{create_from_config, EditorBuilder};
pub use registry::{get_editor_by_type_code, EditorHandle, EditorRegistry};
pub use value_editor::{EditorSnapshot, ValueEditor, NOT_APPLICABLE};
