use crate::{
    compliance_view::DocumentStatus,
    fee_config_view::{FeeField, FeeSection},
    types::EntityId,
};
use serde::{Deserialize, Serialize};

/// Every mutation an operator can request.
/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PanelCommand {
    // ── Payouts ───────────────────────────────────
    ApprovePayout { payout_id: EntityId },
    RejectPayout { payout_id: EntityId },

    // ── Store accounts ────────────────────────────
    ToggleStoreFreeze { store_id: EntityId },
    ToggleStoreFlag { store_id: EntityId },

    // ── Compliance ────────────────────────────────
    SetDocumentStatus {
        document_id: EntityId,
        status:      DocumentStatus,
    },
    RequestReupload { document_id: EntityId },
    ExpireDocuments,
    OpenPreview { document_id: EntityId },
    ClosePreview,
    ResolvePreview { status: DocumentStatus },
    RequestUpload,

    // ── Configuration ─────────────────────────────
    EditFee {
        field: FeeField,
        value: String,
    },
    SaveFees { section: FeeSection },

    // ── Session ───────────────────────────────────
    /// Forget every mutation and reload the fixtures.
    Refresh,
}
