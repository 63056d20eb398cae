//! # Crafting Error Types
//!
//! Everything that can go wrong while building a catalog, an inventory or a
//! session. The outcome of a craft is not an error; see
//! [`CraftOutcome`](crate::crafting::CraftOutcome).

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while assembling or restocking a crafting session.
#[derive(Error, Debug)]
pub enum CraftError {
    /// A numeric field could not be parsed.
    #[error("invalid {field} `{value}`{}", line_suffix(.line))]
    Parse {
        /// The field that failed, e.g. `success rate` or `quantity of Iron`.
        field: String,
        /// The raw text that was rejected.
        value: String,
        /// 1-based source line, when the record came from a file.
        line: Option<usize>,
    },

    /// A recipe line did not have the expected shape.
    #[error("malformed recipe on line {line}: {reason}")]
    Malformed {
        /// 1-based source line.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// A recipe violated a construction invariant.
    #[error("invalid recipe `{recipe}`: {reason}")]
    InvalidRecipe {
        /// Name of the offending recipe.
        recipe: String,
        /// Which invariant was broken.
        reason: String,
    },

    /// Two requirements of one recipe name the same material.
    #[error("recipe `{recipe}` lists material `{material}` more than once")]
    DuplicateMaterial {
        /// Name of the offending recipe.
        recipe: String,
        /// The repeated material.
        material: String,
    },

    /// A material could not be built from text.
    #[error("invalid material `{0}`")]
    InvalidMaterial(String),

    /// Restocking would overflow the stored quantity.
    #[error("quantity overflow for `{material}`: have {have}, adding {amount}")]
    QuantityOverflow {
        /// The material being restocked.
        material: String,
        /// Quantity currently held.
        have: u32,
        /// Amount that was being added.
        amount: u32,
    },

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A backing file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl CraftError {
    /// Attaches a source line to a parse error that does not carry one yet.
    #[must_use]
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Self::Parse {
                field,
                value,
                line: None,
            } => Self::Parse {
                field,
                value,
                line: Some(line),
            },
            other => other,
        }
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map(|l| format!(" on line {l}")).unwrap_or_default()
}

/// Result type for crafting operations.
pub type CraftResult<T> = Result<T, CraftError>;
