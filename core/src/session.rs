//! One operator session over the panel.
//!
//! RULES:
//!   - Every mutation enters through `apply(PanelCommand)`.
//!   - Each view owns its own repository; views never read each other.
//!   - Every event a command produces becomes exactly one notification.
//!   - Nothing outlives the session. `refresh` rebuilds from fixtures.

use crate::{
    command::PanelCommand,
    compliance_view::{ComplianceDocument, ComplianceView, DocumentCriteria, DocumentPreview},
    config::PanelConfig,
    error::{PanelError, PanelResult},
    event::{Notification, PanelEvent},
    fee_config_view::{FeeConfigEditor, PlatformFeeConfig},
    fixtures::Fixtures,
    navigation::{render_nav, Route},
    payout_view::{PayoutCriteria, PayoutRequest, PayoutView},
    repository::{MemoryRepository, Record, Repository},
    revenue_view::RevenueDashboard,
    sql_store::SqliteRepository,
    store_view::{StoreAccount, StoreCriteria, StoreView},
    transaction_view::{Transaction, TransactionCriteria, TransactionView},
    types::Timestamp,
};
use serde::Serialize;
use std::str::FromStr;

/// Where a session keeps its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    Memory,
    Sqlite,
}

impl FromStr for Backend {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(PanelError::UnknownLabel {
                kind:  "Backend",
                label: other.to_string(),
            }),
        }
    }
}

fn repository<R: Record + 'static>(
    backend: Backend,
    records: Vec<R>,
) -> PanelResult<Box<dyn Repository<R>>> {
    let repo: Box<dyn Repository<R>> = match backend {
        Backend::Memory => Box::new(MemoryRepository::new(records)),
        Backend::Sqlite => Box::new(SqliteRepository::new(records)?),
    };
    Ok(repo)
}

/// Extra generated records appended to the base fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Synthetic {
    pub seed:  u64,
    pub count: usize,
}

/// Everything the panel currently shows, as one serializable value.
#[derive(Debug, Clone, Serialize)]
pub struct PanelState {
    pub now:           Timestamp,
    pub backend:       Backend,
    pub payouts:       Vec<PayoutRequest>,
    pub transactions:  Vec<Transaction>,
    pub stores:        Vec<StoreAccount>,
    pub documents:     Vec<ComplianceDocument>,
    pub preview:       Option<DocumentPreview>,
    pub fee_config:    PlatformFeeConfig,
    pub dashboard:     RevenueDashboard,
    pub notifications: Vec<Notification>,
}

pub struct PanelSession {
    now:           Timestamp,
    config:        PanelConfig,
    backend:       Backend,
    synthetic:     Option<Synthetic>,
    pub payouts:      PayoutView,
    pub transactions: TransactionView,
    pub stores:       StoreView,
    pub compliance:   ComplianceView,
    pub fees:         FeeConfigEditor,
    pub dashboard:    RevenueDashboard,
    events:        Vec<PanelEvent>,
    notifications: Vec<Notification>,
}

impl PanelSession {
    pub fn build(now: Timestamp, config: PanelConfig, backend: Backend) -> PanelResult<Self> {
        Self::assemble(now, config, backend, None)
    }

    pub fn build_with_synthetic(
        now: Timestamp,
        config: PanelConfig,
        backend: Backend,
        synthetic: Synthetic,
    ) -> PanelResult<Self> {
        Self::assemble(now, config, backend, Some(synthetic))
    }

    /// Default config, in-memory records.
    pub fn build_test(now: Timestamp) -> PanelResult<Self> {
        Self::build(now, PanelConfig::default(), Backend::Memory)
    }

    fn fixtures(now: Timestamp, config: &PanelConfig, synthetic: Option<Synthetic>) -> PanelResult<Fixtures> {
        let mut fixtures = Fixtures::seed(now, config);
        if let Some(s) = synthetic {
            fixtures = fixtures.with_synthetic(s.seed, s.count, now, &config.regions);
        }
        fixtures.validate()?;
        Ok(fixtures)
    }

    fn assemble(
        now: Timestamp,
        config: PanelConfig,
        backend: Backend,
        synthetic: Option<Synthetic>,
    ) -> PanelResult<Self> {
        config.validate()?;
        let f = Self::fixtures(now, &config, synthetic)?;
        let window = config.date_window_days;

        let dashboard = RevenueDashboard::new(
            f.metrics,
            f.weekly_revenue,
            f.monthly_revenue,
            f.store_breakdown,
            &f.stores,
            config.top_stores,
        );
        let session = Self {
            payouts: PayoutView::new(
                repository(backend, f.payouts)?,
                PayoutCriteria::initial(now, window),
            ),
            transactions: TransactionView::new(
                repository(backend, f.transactions)?,
                TransactionCriteria::initial(now, window),
            ),
            stores: StoreView::new(repository(backend, f.stores)?, StoreCriteria::default()),
            compliance: ComplianceView::new(
                repository(backend, f.documents)?,
                DocumentCriteria::default(),
                config.preview_image_url.clone(),
            ),
            fees: FeeConfigEditor::new(f.fee_config),
            dashboard,
            events: Vec::new(),
            notifications: Vec::new(),
            now,
            config,
            backend,
            synthetic,
        };
        log::info!("session built at {now} on {backend:?} backend");
        Ok(session)
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Dispatch one command. Returns the notifications it raised, which are
    /// also appended to the session feed.
    pub fn apply(&mut self, command: PanelCommand) -> PanelResult<Vec<Notification>> {
        log::info!("apply {command:?}");
        let events: Vec<PanelEvent> = match command {
            PanelCommand::ApprovePayout { payout_id } => {
                self.payouts.approve(&payout_id)?.into_iter().collect()
            }
            PanelCommand::RejectPayout { payout_id } => {
                self.payouts.reject(&payout_id)?.into_iter().collect()
            }
            PanelCommand::ToggleStoreFreeze { store_id } => {
                self.stores.toggle_freeze(&store_id)?.into_iter().collect()
            }
            PanelCommand::ToggleStoreFlag { store_id } => {
                self.stores.toggle_flag(&store_id)?.into_iter().collect()
            }
            PanelCommand::SetDocumentStatus { document_id, status } => self
                .compliance
                .set_status(&document_id, status)?
                .into_iter()
                .collect(),
            PanelCommand::RequestReupload { document_id } => self
                .compliance
                .request_reupload(&document_id)?
                .into_iter()
                .collect(),
            PanelCommand::ExpireDocuments => self.compliance.expire_documents(self.now)?,
            PanelCommand::OpenPreview { document_id } => {
                self.compliance.open_preview(&document_id)?;
                Vec::new()
            }
            PanelCommand::ClosePreview => {
                self.compliance.close_preview();
                Vec::new()
            }
            PanelCommand::ResolvePreview { status } => {
                self.compliance.resolve_preview(status)?.into_iter().collect()
            }
            PanelCommand::RequestUpload => vec![self.compliance.request_upload()],
            PanelCommand::EditFee { field, value } => {
                self.fees.edit(field, &value);
                Vec::new()
            }
            PanelCommand::SaveFees { section } => vec![self.fees.save(section)],
            PanelCommand::Refresh => {
                self.refresh()?;
                Vec::new()
            }
        };

        let raised: Vec<Notification> = events.iter().map(PanelEvent::notification).collect();
        self.events.extend(events);
        self.notifications.extend(raised.iter().cloned());
        Ok(raised)
    }

    /// Every event applied since the session was built or last refreshed.
    pub fn events(&self) -> &[PanelEvent] {
        &self.events
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Drop every change and reload the fixtures. Criteria go back to the
    /// page defaults and the notification feed is cleared.
    pub fn refresh(&mut self) -> PanelResult<()> {
        let f = Self::fixtures(self.now, &self.config, self.synthetic)?;
        let window = self.config.date_window_days;

        self.dashboard = RevenueDashboard::new(
            f.metrics,
            f.weekly_revenue,
            f.monthly_revenue,
            f.store_breakdown,
            &f.stores,
            self.config.top_stores,
        );
        self.payouts.reload(f.payouts)?;
        self.payouts.set_criteria(PayoutCriteria::initial(self.now, window));
        self.transactions.reload(f.transactions)?;
        self.transactions
            .set_criteria(TransactionCriteria::initial(self.now, window));
        self.stores.reload(f.stores)?;
        self.stores.set_criteria(StoreCriteria::default());
        self.compliance.reload(f.documents)?;
        self.compliance.set_criteria(DocumentCriteria::default());
        self.fees.reset(f.fee_config);
        self.events.clear();
        self.notifications.clear();
        log::info!("session refreshed");
        Ok(())
    }

    /// Replace one page's criteria from a JSON object. Missing fields take
    /// their "All"/empty defaults. The dashboard and settings pages have no
    /// criteria and ignore the call.
    pub fn set_criteria_json(&mut self, route: Route, criteria: serde_json::Value) -> PanelResult<()> {
        match route {
            Route::Payouts => self.payouts.set_criteria(serde_json::from_value(criteria)?),
            Route::Transactions => self.transactions.set_criteria(serde_json::from_value(criteria)?),
            Route::Stores => self.stores.set_criteria(serde_json::from_value(criteria)?),
            Route::Compliance => self.compliance.set_criteria(serde_json::from_value(criteria)?),
            Route::Dashboard | Route::Settings => {
                log::debug!("{route:?} has no criteria; ignoring");
            }
        }
        Ok(())
    }

    /// The text rendering of one page.
    pub fn page(&mut self, route: Route) -> PanelResult<String> {
        Ok(match route {
            Route::Dashboard => self.dashboard.render(),
            Route::Payouts => self.payouts.page()?.render(),
            Route::Transactions => self.transactions.page()?.render(),
            Route::Stores => self.stores.page()?.render(),
            Route::Compliance => self.compliance.page()?.render(),
            Route::Settings => self.fees.render(),
        })
    }

    /// Navigation followed by every page, in navigation order.
    pub fn render_all(&mut self) -> PanelResult<String> {
        let mut out = render_nav(Route::Dashboard.href());
        for route in [
            Route::Dashboard,
            Route::Payouts,
            Route::Transactions,
            Route::Stores,
            Route::Compliance,
            Route::Settings,
        ] {
            out.push('\n');
            out.push_str(&self.page(route)?);
        }
        Ok(out)
    }

    pub fn state(&mut self) -> PanelResult<PanelState> {
        Ok(PanelState {
            now:           self.now,
            backend:       self.backend,
            payouts:       self.payouts.visible()?,
            transactions:  self.transactions.visible()?,
            stores:        self.stores.visible()?,
            documents:     self.compliance.visible()?,
            preview:       self.compliance.preview()?,
            fee_config:    *self.fees.config(),
            dashboard:     self.dashboard.clone(),
            notifications: self.notifications.clone(),
        })
    }
}
