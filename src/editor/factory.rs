// ============================================================================
// Editor Factory
// Creates value editors with proper configuration
// ============================================================================

use crate::domain::{EditorConfig, Format, FormatResult, TypeCode, UnknownCodePolicy};
use crate::editor::ValueEditor;
use crate::interfaces::EditHandler;
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a value editor from configuration
///
/// # Arguments
/// * `config` - Editor configuration
/// * `event_handler` - Handler for edit events
///
/// # Returns
/// * `FormatResult<ValueEditor>` - Configured editor or the validation error
///
/// # Example
/// ```
/// use floatinfo::prelude::*;
/// use std::sync::Arc;
///
/// let config = EditorConfig::binary32();
/// let editor = create_from_config(config, Arc::new(NoOpEditHandler)).unwrap();
/// assert_eq!(editor.name(), "binary32");
/// ```
pub fn create_from_config(
    config: EditorConfig,
    event_handler: Arc<dyn EditHandler>,
) -> FormatResult<ValueEditor> {
    ValueEditor::new(config, event_handler)
}

// ============================================================================
// Builder Pattern for Custom Formats
// ============================================================================

/// Builder for creating value editors with fluent API
///
/// # Example
/// ```
/// use floatinfo::prelude::*;
/// use std::sync::Arc;
///
/// let editor = EditorBuilder::new("fp24")
///     .ieee754(24, 7, 16)
///     .with_long_name("AMD 24-bit float")
///     .build(Arc::new(NoOpEditHandler))
///     .unwrap();
/// assert_eq!(editor.read_field(Field::ExponentBias), "63");
/// ```
pub struct EditorBuilder {
    config: EditorConfig,
}

impl EditorBuilder {
    /// Create a new builder; the format defaults to binary32
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            config: EditorConfig::new(name.clone(), name, Format::BINARY32),
        }
    }

    // ========================================================================
    // Format Configuration
    // ========================================================================

    /// Configure an IEEE 754 layout
    pub fn ieee754(mut self, total_bits: u32, exponent_bits: u32, mantissa_bits: u32) -> Self {
        self.config.format = Format::Ieee754 {
            total_bits,
            exponent_bits,
            mantissa_bits,
        };
        self
    }

    /// Configure an es=2 posit layout
    pub fn posit(mut self, total_bits: u32) -> Self {
        self.config.format = Format::Posit { total_bits };
        self
    }

    // ========================================================================
    // Additional Configuration
    // ========================================================================

    /// Set the human-readable name
    pub fn with_long_name(mut self, long_name: impl Into<String>) -> Self {
        self.config.long_name = long_name.into();
        self
    }

    /// Set the starting pattern
    pub fn with_initial_pattern(mut self, pattern: u64) -> Self {
        self.config.initial_pattern = pattern;
        self
    }

    /// Set the unknown-code policy
    pub fn with_unknown_code_policy(mut self, policy: UnknownCodePolicy) -> Self {
        self.config.unknown_code_policy = policy;
        self
    }

    // ========================================================================
    // Preset Configurations
    // ========================================================================

    /// Start from a built-in format instance
    pub fn preset(type_code: TypeCode) -> Self {
        Self {
            config: EditorConfig::for_type(type_code),
        }
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the value editor
    pub fn build(self, event_handler: Arc<dyn EditHandler>) -> FormatResult<ValueEditor> {
        create_from_config(self.config, event_handler)
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &EditorConfig {
        &self.config
    }
}
