//! Payout review: store payout requests awaiting a finance decision.
//!
//! Filters by text (store name or transaction id), status, region and
//! request date. A request moves Pending -> Approved or Pending -> Rejected.

use crate::{
    error::PanelResult,
    event::PanelEvent,
    filter::{Choice, Criteria, DateRange, Searchable, TextQuery},
    format::{format_currency_dzd, format_datetime},
    labelled_enum,
    list_view::ListView,
    repository::{Record, Repository},
    table::TablePage,
    transition::{check_transition, StatusMachine},
    types::{Amount, EntityId, Timestamp},
};
use serde::{Deserialize, Serialize};

pub const EMPTY_MESSAGE: &str = "No payout requests found.";

labelled_enum! {
    pub enum PayoutStatus {
        Pending  => "Pending",
        Approved => "Approved",
        Rejected => "Rejected",
    }
}

labelled_enum! {
    pub enum PayoutMethod {
        BankTransfer => "Bank Transfer",
        Manual       => "Manual",
        PaperBased   => "Paper-based",
    }
}

impl StatusMachine for PayoutStatus {
    const ENTITY: &'static str = "payout request";

    fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutRequest {
    pub id:                  EntityId,
    pub store_name:          String,
    pub store_id:            EntityId,
    pub amount_requested:    Amount,
    pub total_store_balance: Amount,
    pub transaction_id:      String,
    pub request_time:        Timestamp,
    pub payout_method:       PayoutMethod,
    pub status:              PayoutStatus,
    /// Wilaya.
    pub region:              String,
}

impl Record for PayoutRequest {
    const COLLECTION: &'static str = "payout_request";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Searchable for PayoutRequest {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.store_name.as_str(), self.transaction_id.as_str()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoutCriteria {
    pub search:     TextQuery,
    pub status:     Choice<PayoutStatus>,
    pub region:     Choice<String>,
    pub date_range: Option<DateRange>,
}

impl PayoutCriteria {
    /// What the page opens with: everything from the last `window_days` days.
    pub fn initial(now: Timestamp, window_days: i64) -> Self {
        Self {
            date_range: Some(DateRange::trailing_days(now, window_days)),
            ..Self::default()
        }
    }
}

impl Criteria<PayoutRequest> for PayoutCriteria {
    fn matches(&self, req: &PayoutRequest) -> bool {
        self.search.matches(req)
            && self.status.matches(&req.status)
            && self.region.matches(&req.region)
            && DateRange::admits(&self.date_range, req.request_time)
    }
}

pub struct PayoutView {
    list: ListView<PayoutRequest, PayoutCriteria>,
}

impl PayoutView {
    pub fn new(repo: Box<dyn Repository<PayoutRequest>>, criteria: PayoutCriteria) -> Self {
        Self {
            list: ListView::new(repo, criteria),
        }
    }

    pub fn criteria(&self) -> &PayoutCriteria {
        self.list.criteria()
    }

    pub fn set_criteria(&mut self, criteria: PayoutCriteria) {
        self.list.set_criteria(criteria);
    }

    pub fn visible(&mut self) -> PanelResult<Vec<PayoutRequest>> {
        Ok(self.list.visible()?.to_vec())
    }

    pub fn get(&self, id: &str) -> PanelResult<Option<PayoutRequest>> {
        self.list.get(id)
    }

    pub fn all(&self) -> PanelResult<Vec<PayoutRequest>> {
        self.list.all()
    }

    pub fn approve(&mut self, id: &str) -> PanelResult<Option<PanelEvent>> {
        self.set_status(id, PayoutStatus::Approved)
    }

    pub fn reject(&mut self, id: &str) -> PanelResult<Option<PanelEvent>> {
        self.set_status(id, PayoutStatus::Rejected)
    }

    /// Move request `id` to `status`.
    ///
    /// Returns the event to announce, or None when the id is unknown or the
    /// request already had that status.
    pub fn set_status(&mut self, id: &str, status: PayoutStatus) -> PanelResult<Option<PanelEvent>> {
        let outcome = self.list.modify(id, &mut |req: &mut PayoutRequest| {
            let changed = check_transition(&req.id, req.status, status)?;
            if changed {
                req.status = status;
            }
            Ok(changed)
        })?;

        Ok(match outcome {
            Some((req, true)) => {
                log::info!("payout {} for {} -> {}", req.id, req.store_name, req.status);
                Some(PanelEvent::PayoutStatusChanged {
                    payout_id:  req.id,
                    store_name: req.store_name,
                    amount:     req.amount_requested,
                    status:     req.status,
                })
            }
            _ => None,
        })
    }

    /// Total requested across the given status.
    pub fn total_requested(&self, status: PayoutStatus) -> PanelResult<Amount> {
        Ok(self
            .all()?
            .iter()
            .filter(|r| r.status == status)
            .map(|r| r.amount_requested)
            .sum())
    }

    pub fn reload(&mut self, records: Vec<PayoutRequest>) -> PanelResult<()> {
        self.list.reload(records)
    }

    pub fn page(&mut self) -> PanelResult<TablePage> {
        let rows = self
            .list
            .visible()?
            .iter()
            .map(|r| {
                vec![
                    r.store_name.clone(),
                    format_currency_dzd(r.amount_requested),
                    format_currency_dzd(r.total_store_balance),
                    r.transaction_id.clone(),
                    format_datetime(r.request_time),
                    r.payout_method.to_string(),
                    r.status.to_string(),
                    r.region.clone(),
                ]
            })
            .collect();

        Ok(TablePage {
            title: "Payout Requests".into(),
            description: "Manage and process store payout requests.".into(),
            columns: vec![
                "Store Name", "Amount", "Balance", "Txn ID", "Requested", "Method", "Status",
                "Region",
            ],
            rows,
            empty_message: EMPTY_MESSAGE,
        })
    }
}
