// ============================================================================
// Editor Registry
// The nine built-in editors and the integer-code facade over them
// ============================================================================

use crate::domain::{FormatResult, TypeCode};
use crate::editor::ValueEditor;
use crate::interfaces::{EditHandler, Field, Flag, LoggingEditHandler};
use parking_lot::Mutex;
use std::sync::{Arc, LazyLock};

/// One editor per built-in format, indexed by type code.
pub struct EditorRegistry {
    editors: Vec<ValueEditor>,
}

impl EditorRegistry {
    /// Fresh editors, all at the zero pattern.
    pub fn new(event_handler: Arc<dyn EditHandler>) -> Self {
        Self {
            editors: TypeCode::ALL
                .iter()
                .map(|ty| ValueEditor::for_type(*ty, event_handler.clone()))
                .collect(),
        }
    }

    fn slot(type_code: TypeCode) -> usize {
        (type_code.code() - 1) as usize
    }

    pub fn editor(&self, type_code: TypeCode) -> &ValueEditor {
        &self.editors[Self::slot(type_code)]
    }

    pub fn editor_mut(&mut self, type_code: TypeCode) -> &mut ValueEditor {
        &mut self.editors[Self::slot(type_code)]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValueEditor> {
        self.editors.iter()
    }
}

impl std::fmt::Debug for EditorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.editors.iter()).finish()
    }
}

/// Process-wide editors handed out by [`get_editor_by_type_code`].
static REGISTRY: LazyLock<Mutex<EditorRegistry>> =
    LazyLock::new(|| Mutex::new(EditorRegistry::new(Arc::new(LoggingEditHandler))));

// ============================================================================
// Facade
// ============================================================================

/// Handle to a process-wide editor, addressed by integer codes.
///
/// Each call locks the registry for the duration of one operation.
///
/// # Example
/// ```
/// use floatinfo::editor::get_editor_by_type_code;
///
/// let posit8 = get_editor_by_type_code(4).unwrap();
/// assert_eq!(posit8.read_field(12).unwrap(), "posit8");
/// assert_eq!(posit8.read_flag(6), 1);
/// assert!(get_editor_by_type_code(0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorHandle {
    type_code: TypeCode,
}

/// Look up one of the nine process-wide editors.
pub fn get_editor_by_type_code(code: i32) -> Option<EditorHandle> {
    TypeCode::from_code(code)
        .ok()
        .map(|type_code| EditorHandle { type_code })
}

impl EditorHandle {
    pub fn type_code(&self) -> TypeCode {
        self.type_code
    }

    /// Text of field `code`.
    pub fn read_field(&self, code: i32) -> FormatResult<String> {
        let field = Field::from_code(code)?;
        Ok(self.with(|editor| editor.read_field(field).to_string()))
    }

    /// Flag `code`, or -1 when the code is unknown.
    pub fn read_flag(&self, code: i32) -> i32 {
        match Flag::from_code(code) {
            Ok(flag) => self.with(|editor| editor.read_flag(flag)),
            Err(err) => {
                tracing::debug!(%err, "unknown flag");
                -1
            },
        }
    }

    /// Apply edit `code`; see [`ValueEditor::mutate_code`].
    pub fn mutate(&self, code: i32, payload: Option<&str>) -> bool {
        self.with(|editor| editor.mutate_code(code, payload))
    }

    /// Run `f` on the editor with the registry locked.
    pub fn with<R>(&self, f: impl FnOnce(&mut ValueEditor) -> R) -> R {
        let mut registry = REGISTRY.lock();
        f(registry.editor_mut(self.type_code))
    }
}
