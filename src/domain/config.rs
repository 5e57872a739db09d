// ============================================================================
// Editor Configuration
// Format, starting pattern and unknown-code handling for one value editor
// ============================================================================

use super::errors::{FormatError, FormatResult};
use super::format::{Format, TypeCode};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Unknown Code Policy
// ============================================================================

/// What a mutation does when its code is unknown or does not apply to the
/// editor's format (e.g. `SetInfinity` on a posit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnknownCodePolicy {
    /// Leave the pattern alone but advance the version and recompute,
    /// so every reader sees a fresh cache
    #[default]
    BumpVersion,

    /// Strict no-op: pattern and version unchanged
    Ignore,
}

// ============================================================================
// Editor Configuration
// ============================================================================

/// Configuration for creating a value editor
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EditorConfig {
    /// Short type name (e.g. "binary16"), used in permalinks
    pub name: String,

    /// Human-readable type name
    pub long_name: String,

    /// Bit layout
    pub format: Format,

    /// Pattern the editor starts from
    pub initial_pattern: u64,

    /// Handling of unknown or inapplicable mutation codes
    pub unknown_code_policy: UnknownCodePolicy,
}

impl EditorConfig {
    /// Create a new configuration starting from the all-zero pattern
    pub fn new(name: impl Into<String>, long_name: impl Into<String>, format: Format) -> Self {
        Self {
            name: name.into(),
            long_name: long_name.into(),
            format,
            initial_pattern: 0,
            unknown_code_policy: UnknownCodePolicy::default(),
        }
    }

    /// Builder method: Set the starting pattern
    pub fn with_initial_pattern(mut self, pattern: u64) -> Self {
        self.initial_pattern = pattern;
        self
    }

    /// Builder method: Set the unknown-code policy
    pub fn with_unknown_code_policy(mut self, policy: UnknownCodePolicy) -> Self {
        self.unknown_code_policy = policy;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> FormatResult<()> {
        if self.name.is_empty() {
            return Err(FormatError::InvalidConfig("type name cannot be empty".to_string()));
        }

        self.format.validate()?;

        if self.initial_pattern & !self.format.mask() != 0 {
            return Err(FormatError::InvalidConfig(format!(
                "initial pattern {:#x} does not fit in {} bits",
                self.initial_pattern,
                self.format.total_bits()
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl EditorConfig {
    /// Configuration of a built-in format instance
    pub fn for_type(type_code: TypeCode) -> Self {
        Self::new(type_code.name(), type_code.long_name(), type_code.format())
    }

    /// IEEE 754 half precision (1+5+10)
    pub fn binary16() -> Self {
        Self::for_type(TypeCode::Binary16)
    }

    /// IEEE 754 single precision (1+8+23)
    pub fn binary32() -> Self {
        Self::for_type(TypeCode::Binary32)
    }

    /// IEEE 754 double precision (1+11+52)
    pub fn binary64() -> Self {
        Self::for_type(TypeCode::Binary64)
    }

    /// Brain floating-point (1+8+7)
    pub fn bfloat16() -> Self {
        Self::for_type(TypeCode::BFloat16)
    }

    /// 8-bit minifloat (1+4+3)
    pub fn minifloat() -> Self {
        Self::for_type(TypeCode::Minifloat)
    }

    /// Posit of the given width with es=2
    pub fn posit(type_code: TypeCode) -> Self {
        debug_assert!(type_code.format().is_posit());
        Self::for_type(type_code)
    }
}
