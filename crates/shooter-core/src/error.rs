//! Error types for the simulation core.
//!
//! Only [`SimError::InvalidConfig`] is ever returned to a caller, and only
//! from [`Simulation::new`](crate::simulation::Simulation::new) before the
//! first tick. The other variants describe recoverable conditions that the
//! stages log and skip; they never abort a tick.

use thiserror::Error;

/// Errors produced by the simulation core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// The spawner could not find a free grid cell for an adversary.
    #[error("no free spawn cell found after {attempts} attempts")]
    InvalidPlacement {
        /// Number of grid cells tried before giving up.
        attempts: u32,
    },

    /// An input event carried a key code the core does not understand.
    #[error("unrecognised key code 0x{code:02x}")]
    InputDecode {
        /// The raw key code.
        code: u32,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration `{field}`: {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Human readable reason.
        reason: String,
    },
}

impl SimError {
    /// Shorthand for building an [`SimError::InvalidConfig`].
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate.
pub type SimResult<T> = Result<T, SimError>;
