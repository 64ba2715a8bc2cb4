//! Store accounts: merchant balances, tiers and the freeze/flag switches.

use crate::{
    error::PanelResult,
    event::PanelEvent,
    filter::{Choice, Criteria, Searchable, TextQuery},
    format::{format_currency_dzd, format_date},
    labelled_enum,
    list_view::ListView,
    repository::{Record, Repository},
    table::TablePage,
    types::{Amount, EntityId, Timestamp},
};
use serde::{Deserialize, Serialize};

pub const EMPTY_MESSAGE: &str = "No stores found.";

labelled_enum! {
    /// Display-only badge; no computed behavior depends on it.
    pub enum StoreTier {
        Basic      => "Basic",
        Premium    => "Premium",
        Enterprise => "Enterprise",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreAccount {
    pub id:               EntityId,
    pub name:             String,
    pub current_balance:  Amount,
    pub last_payout_date: Option<Timestamp>,
    pub total_earnings:   Amount,
    pub tier:             StoreTier,
    pub region:           String,
    pub city:             String,
    pub join_date:        Timestamp,
    pub contact_email:    String,
    pub is_flagged:       bool,
    pub is_frozen:        bool,
}

impl Record for StoreAccount {
    const COLLECTION: &'static str = "store_account";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Searchable for StoreAccount {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.id.as_str()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreCriteria {
    pub search: TextQuery,
    pub tier:   Choice<StoreTier>,
    pub region: Choice<String>,
}

impl Criteria<StoreAccount> for StoreCriteria {
    fn matches(&self, store: &StoreAccount) -> bool {
        self.search.matches(store)
            && self.tier.matches(&store.tier)
            && self.region.matches(&store.region)
    }
}

pub struct StoreView {
    list: ListView<StoreAccount, StoreCriteria>,
}

impl StoreView {
    pub fn new(repo: Box<dyn Repository<StoreAccount>>, criteria: StoreCriteria) -> Self {
        Self {
            list: ListView::new(repo, criteria),
        }
    }

    pub fn criteria(&self) -> &StoreCriteria {
        self.list.criteria()
    }

    pub fn set_criteria(&mut self, criteria: StoreCriteria) {
        self.list.set_criteria(criteria);
    }

    pub fn visible(&mut self) -> PanelResult<Vec<StoreAccount>> {
        Ok(self.list.visible()?.to_vec())
    }

    pub fn get(&self, id: &str) -> PanelResult<Option<StoreAccount>> {
        self.list.get(id)
    }

    pub fn all(&self) -> PanelResult<Vec<StoreAccount>> {
        self.list.all()
    }

    /// Flip `is_frozen` on store `id`. Unknown ids are ignored.
    pub fn toggle_freeze(&mut self, id: &str) -> PanelResult<Option<PanelEvent>> {
        let outcome = self.list.modify(id, &mut |store: &mut StoreAccount| {
            store.is_frozen = !store.is_frozen;
            Ok(true)
        })?;
        Ok(outcome.map(|(store, _)| {
            log::info!("store {} frozen={}", store.id, store.is_frozen);
            PanelEvent::StoreFreezeToggled {
                store_id:   store.id,
                store_name: store.name,
                frozen:     store.is_frozen,
            }
        }))
    }

    /// Flip `is_flagged` on store `id`. Unknown ids are ignored.
    pub fn toggle_flag(&mut self, id: &str) -> PanelResult<Option<PanelEvent>> {
        let outcome = self.list.modify(id, &mut |store: &mut StoreAccount| {
            store.is_flagged = !store.is_flagged;
            Ok(true)
        })?;
        Ok(outcome.map(|(store, _)| {
            log::info!("store {} flagged={}", store.id, store.is_flagged);
            PanelEvent::StoreFlagToggled {
                store_id:   store.id,
                store_name: store.name,
                flagged:    store.is_flagged,
            }
        }))
    }

    pub fn reload(&mut self, records: Vec<StoreAccount>) -> PanelResult<()> {
        self.list.reload(records)
    }

    pub fn page(&mut self) -> PanelResult<TablePage> {
        let rows = self
            .list
            .visible()?
            .iter()
            .map(|s| {
                let mut state = Vec::new();
                if s.is_frozen {
                    state.push("Frozen");
                }
                if s.is_flagged {
                    state.push("Flagged");
                }
                if state.is_empty() {
                    state.push("Active");
                }
                vec![
                    s.id.clone(),
                    s.name.clone(),
                    format_currency_dzd(s.current_balance),
                    s.last_payout_date.map_or_else(|| "N/A".to_string(), format_date),
                    format_currency_dzd(s.total_earnings),
                    s.tier.to_string(),
                    format!("{}, {}", s.city, s.region),
                    state.join(", "),
                ]
            })
            .collect();

        Ok(TablePage {
            title: "Store Accounts & Balances".into(),
            description: "Manage financial profiles of all stores.".into(),
            columns: vec![
                "Store ID", "Name", "Balance", "Last Payout", "Total Earnings", "Tier",
                "Location", "Status",
            ],
            rows,
            empty_message: EMPTY_MESSAGE,
        })
    }
}
