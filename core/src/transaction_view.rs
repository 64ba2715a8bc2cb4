//! Transaction ledger: read-only view over marketplace transactions.
//!
//! Filters by text (buyer or store name), store id substring, payment
//! method, status and transaction date. Refunds carry a negative amount.

use crate::{
    error::PanelResult,
    filter::{Choice, Criteria, DateRange, Searchable, TextQuery},
    format::{format_currency_dzd, format_datetime},
    labelled_enum,
    list_view::ListView,
    repository::{Record, Repository},
    table::TablePage,
    types::{Amount, EntityId, Timestamp},
};
use serde::{Deserialize, Serialize};

pub const EMPTY_MESSAGE: &str = "No transactions found.";

labelled_enum! {
    pub enum TransactionStatus {
        Success  => "Success",
        Failed   => "Failed",
        Refunded => "Refunded",
        Pending  => "Pending",
    }
}

labelled_enum! {
    pub enum PaymentMethod {
        BankApi        => "Bank API",
        CashOnDelivery => "Cash on Delivery",
        Manual         => "Manual",
    }
}

labelled_enum! {
    pub enum TransactionKind {
        Sale   => "Sale",
        Refund => "Refund",
        Fee    => "Fee",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id:               EntityId,
    pub buyer_name:       String,
    pub store_name:       String,
    pub store_id:         EntityId,
    pub items_purchased:  Vec<String>,
    /// Negative for refunds.
    pub amount_paid:      Amount,
    pub payment_method:   PaymentMethod,
    pub status:           TransactionStatus,
    pub transaction_date: Timestamp,
    #[serde(rename = "type")]
    pub kind:             TransactionKind,
}

impl Record for Transaction {
    const COLLECTION: &'static str = "transaction";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Searchable for Transaction {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.buyer_name.as_str(), self.store_name.as_str()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionCriteria {
    pub search:         TextQuery,
    /// Substring of the store id, not an exact match.
    pub store_id:       TextQuery,
    pub payment_method: Choice<PaymentMethod>,
    pub status:         Choice<TransactionStatus>,
    pub date_range:     Option<DateRange>,
}

impl TransactionCriteria {
    pub fn initial(now: Timestamp, window_days: i64) -> Self {
        Self {
            date_range: Some(DateRange::trailing_days(now, window_days)),
            ..Self::default()
        }
    }
}

impl Criteria<Transaction> for TransactionCriteria {
    fn matches(&self, txn: &Transaction) -> bool {
        self.search.matches(txn)
            && self.store_id.matches_any(&[txn.store_id.as_str()])
            && self.payment_method.matches(&txn.payment_method)
            && self.status.matches(&txn.status)
            && DateRange::admits(&self.date_range, txn.transaction_date)
    }
}

pub struct TransactionView {
    list: ListView<Transaction, TransactionCriteria>,
}

impl TransactionView {
    pub fn new(repo: Box<dyn Repository<Transaction>>, criteria: TransactionCriteria) -> Self {
        Self {
            list: ListView::new(repo, criteria),
        }
    }

    pub fn criteria(&self) -> &TransactionCriteria {
        self.list.criteria()
    }

    pub fn set_criteria(&mut self, criteria: TransactionCriteria) {
        self.list.set_criteria(criteria);
    }

    pub fn visible(&mut self) -> PanelResult<Vec<Transaction>> {
        Ok(self.list.visible()?.to_vec())
    }

    pub fn get(&self, id: &str) -> PanelResult<Option<Transaction>> {
        self.list.get(id)
    }

    pub fn all(&self) -> PanelResult<Vec<Transaction>> {
        self.list.all()
    }

    /// Net amount of the visible rows (refunds subtract).
    pub fn visible_total(&mut self) -> PanelResult<Amount> {
        Ok(self.list.visible()?.iter().map(|t| t.amount_paid).sum())
    }

    pub fn reload(&mut self, records: Vec<Transaction>) -> PanelResult<()> {
        self.list.reload(records)
    }

    pub fn page(&mut self) -> PanelResult<TablePage> {
        let rows = self
            .list
            .visible()?
            .iter()
            .map(|t| {
                vec![
                    t.id.clone(),
                    t.buyer_name.clone(),
                    t.store_name.clone(),
                    t.store_id.clone(),
                    t.items_purchased.join(", "),
                    format_currency_dzd(t.amount_paid),
                    t.payment_method.to_string(),
                    t.status.to_string(),
                    format_datetime(t.transaction_date),
                    t.kind.to_string(),
                ]
            })
            .collect();

        Ok(TablePage {
            title: "Transaction Records".into(),
            description: "View all successful and failed transactions.".into(),
            columns: vec![
                "Txn ID", "Buyer", "Store", "Store ID", "Items", "Amount", "Payment",
                "Status", "Date", "Type",
            ],
            rows,
            empty_message: EMPTY_MESSAGE,
        })
    }
}
