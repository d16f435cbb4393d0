use thiserror::Error;

/// Largeur par défaut des numéros de roll.
pub const DEFAULT_ROLL_LENGTH: usize = 5;

/// Options de génération
#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    pub roll_length: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            roll_length: DEFAULT_ROLL_LENGTH,
        }
    }
}

/// Famille d'erreur, utilisée par la CLI pour choisir un code de sortie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingInput,
    Schema,
    SourceUnavailable,
    InvalidInput,
}

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("no shift names given: enter at least one shift (comma separated)")]
    MissingShifts,
    #[error("{table} table is missing required column(s): {}", .missing.join(", "))]
    MissingColumns {
        table: &'static str,
        missing: Vec<&'static str>,
    },
    #[error("{table} table, row {row}: {reason}")]
    MalformedRow {
        table: &'static str,
        row: usize,
        reason: String,
    },
    #[error("cannot read {location}: {reason}")]
    SourceUnavailable { location: String, reason: String },
    #[error("roll number length must be at least 1 (got {0})")]
    InvalidRollLength(usize),
    #[error("shift #{index} falls outside the supported calendar range")]
    DateOutOfRange { index: usize },
}

impl RosterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RosterError::MissingShifts => ErrorKind::MissingInput,
            RosterError::MissingColumns { .. } | RosterError::MalformedRow { .. } => {
                ErrorKind::Schema
            }
            RosterError::SourceUnavailable { .. } => ErrorKind::SourceUnavailable,
            RosterError::InvalidRollLength(_) | RosterError::DateOutOfRange { .. } => {
                ErrorKind::InvalidInput
            }
        }
    }

    pub(crate) fn unavailable(location: impl std::fmt::Display, reason: impl ToString) -> Self {
        RosterError::SourceUnavailable {
            location: location.to_string(),
            reason: reason.to_string(),
        }
    }
}
