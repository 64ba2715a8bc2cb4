use crate::types::{Amount, EntityId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Illegal {entity} transition for '{id}': {from} -> {to}")]
    IllegalTransition {
        entity: &'static str,
        id:     EntityId,
        from:   String,
        to:     String,
    },

    #[error("Duplicate id '{id}' in {collection}")]
    DuplicateId {
        collection: &'static str,
        id:         EntityId,
    },

    #[error("Negative amount {amount} on {collection} record '{id}'")]
    NegativeAmount {
        collection: &'static str,
        id:         EntityId,
        amount:     Amount,
    },

    #[error("Unknown {kind} '{label}'")]
    UnknownLabel { kind: &'static str, label: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type PanelResult<T> = Result<T, PanelError>;
