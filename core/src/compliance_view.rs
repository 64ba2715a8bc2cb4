//! Compliance documents: KYC, bank verification and business registration
//! papers uploaded by stores.
//!
//! Document lifecycle:
//!
//! ```text
//!   Pending Review ──► Verified ──► Expired
//!        │    ▲                        │
//!        ▼    └────────────────────────┤  (re-upload requested)
//!     Rejected ────────────────────────┘
//! ```

use crate::{
    error::PanelResult,
    event::PanelEvent,
    filter::{Choice, Criteria, Searchable, TextQuery},
    format::format_date,
    labelled_enum,
    list_view::ListView,
    repository::{Record, Repository},
    table::TablePage,
    transition::{check_transition, StatusMachine},
    types::{EntityId, Timestamp},
};
use serde::{Deserialize, Serialize};

pub const EMPTY_MESSAGE: &str = "No documents found.";

labelled_enum! {
    pub enum DocumentStatus {
        Verified      => "Verified",
        PendingReview => "Pending Review",
        Rejected      => "Rejected",
        Expired       => "Expired",
    }
}

labelled_enum! {
    pub enum DocumentType {
        BankAccountVerification => "Bank Account Verification",
        Identity                => "Identity (KYC)",
        BusinessRegistration    => "Business Registration",
    }
}

impl StatusMachine for DocumentStatus {
    const ENTITY: &'static str = "compliance document";

    fn can_transition_to(&self, next: Self) -> bool {
        use DocumentStatus::*;
        matches!(
            (self, next),
            (PendingReview, Verified)
                | (PendingReview, Rejected)
                | (Verified, Expired)
                | (Rejected, PendingReview)
                | (Expired, PendingReview)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceDocument {
    pub id:            EntityId,
    pub document_name: String,
    pub document_type: DocumentType,
    pub store_id:      EntityId,
    pub store_name:    String,
    pub upload_date:   Timestamp,
    #[serde(default)]
    pub expiry_date:   Option<Timestamp>,
    pub status:        DocumentStatus,
    #[serde(default)]
    pub file_url:      Option<String>,
}

impl Record for ComplianceDocument {
    const COLLECTION: &'static str = "compliance_document";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Searchable for ComplianceDocument {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.store_name.as_str(), self.document_name.as_str()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentCriteria {
    pub search: TextQuery,
    pub status: Choice<DocumentStatus>,
}

impl Criteria<ComplianceDocument> for DocumentCriteria {
    fn matches(&self, doc: &ComplianceDocument) -> bool {
        self.search.matches(doc) && self.status.matches(&doc.status)
    }
}

/// What the preview dialog shows for the selected document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentPreview {
    pub document:  ComplianceDocument,
    pub image_url: String,
    /// Approve/Reject buttons are only offered while the document awaits review.
    pub can_decide: bool,
}

pub struct ComplianceView {
    list:              ListView<ComplianceDocument, DocumentCriteria>,
    selected:          Option<EntityId>,
    placeholder_image: String,
}

impl ComplianceView {
    pub fn new(
        repo: Box<dyn Repository<ComplianceDocument>>,
        criteria: DocumentCriteria,
        placeholder_image: impl Into<String>,
    ) -> Self {
        Self {
            list: ListView::new(repo, criteria),
            selected: None,
            placeholder_image: placeholder_image.into(),
        }
    }

    pub fn criteria(&self) -> &DocumentCriteria {
        self.list.criteria()
    }

    pub fn set_criteria(&mut self, criteria: DocumentCriteria) {
        self.list.set_criteria(criteria);
    }

    pub fn visible(&mut self) -> PanelResult<Vec<ComplianceDocument>> {
        Ok(self.list.visible()?.to_vec())
    }

    pub fn get(&self, id: &str) -> PanelResult<Option<ComplianceDocument>> {
        self.list.get(id)
    }

    pub fn all(&self) -> PanelResult<Vec<ComplianceDocument>> {
        self.list.all()
    }

    /// Move document `id` to `status` along a declared edge.
    pub fn set_status(
        &mut self,
        id: &str,
        status: DocumentStatus,
    ) -> PanelResult<Option<PanelEvent>> {
        let outcome = self.list.modify(id, &mut |doc: &mut ComplianceDocument| {
            let changed = check_transition(&doc.id, doc.status, status)?;
            if changed {
                doc.status = status;
            }
            Ok(changed)
        })?;

        Ok(match outcome {
            Some((doc, true)) => {
                log::info!("document {} ({}) -> {}", doc.id, doc.document_name, doc.status);
                Some(PanelEvent::DocumentStatusChanged {
                    document_id:   doc.id,
                    document_name: doc.document_name,
                    store_name:    doc.store_name,
                    status:        doc.status,
                })
            }
            _ => None,
        })
    }

    pub fn verify(&mut self, id: &str) -> PanelResult<Option<PanelEvent>> {
        self.set_status(id, DocumentStatus::Verified)
    }

    pub fn reject(&mut self, id: &str) -> PanelResult<Option<PanelEvent>> {
        self.set_status(id, DocumentStatus::Rejected)
    }

    /// Ask the store for a fresh copy: a rejected or expired document goes
    /// back to review.
    pub fn request_reupload(&mut self, id: &str) -> PanelResult<Option<PanelEvent>> {
        let outcome = self.list.modify(id, &mut |doc: &mut ComplianceDocument| {
            check_transition(&doc.id, doc.status, DocumentStatus::PendingReview)?;
            let changed = doc.status != DocumentStatus::PendingReview;
            doc.status = DocumentStatus::PendingReview;
            Ok(changed)
        })?;

        Ok(outcome.map(|(doc, _)| {
            log::info!("re-upload requested for document {}", doc.id);
            PanelEvent::ReuploadRequested {
                document_id:   doc.id,
                document_name: doc.document_name,
                store_name:    doc.store_name,
            }
        }))
    }

    /// Mark every verified document whose expiry date is before `now` as expired.
    pub fn expire_documents(&mut self, now: Timestamp) -> PanelResult<Vec<PanelEvent>> {
        let due: Vec<EntityId> = self
            .all()?
            .into_iter()
            .filter(|d| d.status == DocumentStatus::Verified)
            .filter(|d| d.expiry_date.is_some_and(|expiry| expiry < now))
            .map(|d| d.id)
            .collect();

        let mut events = Vec::new();
        for id in due {
            if let Some(event) = self.set_status(&id, DocumentStatus::Expired)? {
                events.push(event);
            }
        }
        Ok(events)
    }

    /// The upload affordance: nothing is read or stored.
    pub fn request_upload(&self) -> PanelEvent {
        PanelEvent::UploadRequested
    }

    // ── Preview dialog ─────────────────────────────────────────

    /// Select document `id` for preview. Unknown ids leave the dialog closed.
    pub fn open_preview(&mut self, id: &str) -> PanelResult<Option<DocumentPreview>> {
        self.selected = self.get(id)?.map(|d| d.id);
        self.preview()
    }

    pub fn close_preview(&mut self) {
        self.selected = None;
    }

    /// The open dialog, rebuilt from the current record.
    pub fn preview(&self) -> PanelResult<Option<DocumentPreview>> {
        let Some(id) = &self.selected else {
            return Ok(None);
        };
        Ok(self.get(id)?.map(|document| DocumentPreview {
            image_url: document
                .file_url
                .clone()
                .unwrap_or_else(|| self.placeholder_image.clone()),
            can_decide: document.status == DocumentStatus::PendingReview,
            document,
        }))
    }

    /// Approve or reject from the dialog, then close it.
    pub fn resolve_preview(&mut self, status: DocumentStatus) -> PanelResult<Option<PanelEvent>> {
        let Some(id) = self.selected.clone() else {
            return Ok(None);
        };
        let event = self.set_status(&id, status)?;
        self.selected = None;
        Ok(event)
    }

    pub fn reload(&mut self, records: Vec<ComplianceDocument>) -> PanelResult<()> {
        self.selected = None;
        self.list.reload(records)
    }

    pub fn page(&mut self) -> PanelResult<TablePage> {
        let rows = self
            .list
            .visible()?
            .iter()
            .map(|d| {
                vec![
                    d.document_name.clone(),
                    d.document_type.to_string(),
                    format!("{} ({})", d.store_name, d.store_id),
                    format_date(d.upload_date),
                    d.expiry_date.map_or_else(|| "N/A".to_string(), format_date),
                    d.status.to_string(),
                ]
            })
            .collect();

        Ok(TablePage {
            title: "Compliance & Documents".into(),
            description: "Verify store legal and identity documents.".into(),
            columns: vec!["Document", "Type", "Store", "Uploaded", "Expires", "Status"],
            rows,
            empty_message: EMPTY_MESSAGE,
        })
    }
}
