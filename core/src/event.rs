//! Panel events and the notifications they raise.
//!
//! RULE: every state change a view makes is reported as a `PanelEvent`.
//! The session turns each event into exactly one user-facing
//! `Notification`; notifications are fire-and-forget and never persisted.

use crate::{
    compliance_view::DocumentStatus,
    fee_config_view::{FeeSection, PlatformFeeConfig},
    format::format_currency_dzd,
    payout_view::PayoutStatus,
    types::{Amount, EntityId},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PanelEvent {
    // ── Payouts ────────────────────────────────────────
    PayoutStatusChanged {
        payout_id:  EntityId,
        store_name: String,
        amount:     Amount,
        status:     PayoutStatus,
    },

    // ── Store accounts ─────────────────────────────────
    StoreFreezeToggled {
        store_id:   EntityId,
        store_name: String,
        frozen:     bool,
    },
    StoreFlagToggled {
        store_id:   EntityId,
        store_name: String,
        flagged:    bool,
    },

    // ── Compliance ─────────────────────────────────────
    DocumentStatusChanged {
        document_id:   EntityId,
        document_name: String,
        store_name:    String,
        status:        DocumentStatus,
    },
    ReuploadRequested {
        document_id:   EntityId,
        document_name: String,
        store_name:    String,
    },
    UploadRequested,

    // ── Configuration ──────────────────────────────────
    FeeConfigSaved {
        section: FeeSection,
        config:  PlatformFeeConfig,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// A toast: shown once, then gone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id:          Uuid,
    pub title:       String,
    pub description: String,
    pub variant:     NotificationVariant,
}

impl PanelEvent {
    pub fn notification(&self) -> Notification {
        let (title, description, variant) = match self {
            Self::PayoutStatusChanged { payout_id, store_name, amount, status } => (
                format!("Payout {status}"),
                format!(
                    "Payout request {payout_id} for {store_name} ({}) is now {status}.",
                    format_currency_dzd(*amount)
                ),
                if *status == PayoutStatus::Rejected {
                    NotificationVariant::Destructive
                } else {
                    NotificationVariant::Default
                },
            ),
            Self::StoreFreezeToggled { store_name, frozen, .. } => {
                let (title, verb) = if *frozen { ("Frozen", "frozen") } else { ("Unfrozen", "unfrozen") };
                (
                    format!("Store {title}"),
                    format!("{store_name} has been {verb}."),
                    NotificationVariant::Default,
                )
            }
            Self::StoreFlagToggled { store_name, flagged, .. } => {
                if *flagged {
                    (
                        "Store Flagged".to_string(),
                        format!("{store_name} has been flagged for review."),
                        NotificationVariant::Destructive,
                    )
                } else {
                    (
                        "Store Unflagged".to_string(),
                        format!("{store_name} has been unflagged."),
                        NotificationVariant::Default,
                    )
                }
            }
            Self::DocumentStatusChanged { document_name, store_name, status, .. } => (
                "Document Status Updated".to_string(),
                format!("Document \"{document_name}\" for {store_name} is now {status}."),
                NotificationVariant::Default,
            ),
            Self::ReuploadRequested { document_name, store_name, .. } => (
                "Re-upload Requested".to_string(),
                format!("{store_name} has been asked to re-upload \"{document_name}\"."),
                NotificationVariant::Default,
            ),
            Self::UploadRequested => (
                "Upload".to_string(),
                "File selection is not available in this panel.".to_string(),
                NotificationVariant::Default,
            ),
            Self::FeeConfigSaved { section, .. } => (
                format!("{section} Settings Saved"),
                format!(
                    "The {} configuration has been updated.",
                    section.label().to_lowercase()
                ),
                NotificationVariant::Default,
            ),
        };

        Notification {
            id: Uuid::new_v4(),
            title,
            description,
            variant,
        }
    }
}
