//! Typed errors for listing normalization.
//!
//! Every error here is scoped to a single listing so a batch can skip the
//! offending payload and carry on with its siblings.

use thiserror::Error;

/// A price could not be read out of display price text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No digit run at the requested position
    #[error("no price found at position {position} in display price {text:?}")]
    NoPrice { text: String, position: usize },

    #[error("price {digits} in display price {text:?} is too large")]
    Overflow { text: String, digits: String },
}

/// An agent could not be built from the data supplied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("not enough information given to create an agent")]
    NoAdvertiser,

    #[error("advertiser identifiers are missing `{0}`")]
    IncompleteIdentifiers(&'static str),
}

/// A raw listing could not be turned into a [`crate::models::Listing`].
#[derive(Debug, Error)]
pub enum NormalizationError {
    /// A structurally required field is absent
    #[error("required field `{field}` is missing")]
    MissingField { field: &'static str },

    #[error("invalid agent: {0}")]
    Agent(#[from] ConstructionError),

    #[error("unparseable display price: {0}")]
    Price(#[from] ParseError),

    /// The payload is not shaped like a listing at all
    #[error("malformed listing payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl NormalizationError {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }
}
