//! The in-memory and SQLite repositories must be indistinguishable from the
//! views' point of view.

use chrono::{DateTime, TimeZone, Utc};
use dzdpanel_core::{
    command::PanelCommand,
    compliance_view::DocumentStatus,
    config::PanelConfig,
    fixtures::Fixtures,
    payout_view::PayoutRequest,
    repository::{MemoryRepository, Repository},
    session::{Backend, PanelSession},
    sql_store::SqliteRepository,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap()
}

fn script() -> Vec<PanelCommand> {
    vec![
        PanelCommand::ApprovePayout { payout_id: "pr001".into() },
        PanelCommand::RejectPayout { payout_id: "pr002".into() },
        PanelCommand::ToggleStoreFreeze { store_id: "s002".into() },
        PanelCommand::ToggleStoreFlag { store_id: "s004".into() },
        PanelCommand::SetDocumentStatus {
            document_id: "doc002".into(),
            status:      DocumentStatus::Verified,
        },
        PanelCommand::RequestReupload { document_id: "doc004".into() },
    ]
}

#[test]
fn both_backends_yield_identical_views() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut memory = PanelSession::build(now(), PanelConfig::default(), Backend::Memory).unwrap();
    let mut sqlite = PanelSession::build(now(), PanelConfig::default(), Backend::Sqlite).unwrap();

    for command in script() {
        let a = memory.apply(command.clone()).unwrap();
        let b = sqlite.apply(command).unwrap();
        assert_eq!(a.len(), b.len());
    }

    assert_eq!(memory.payouts.visible().unwrap(), sqlite.payouts.visible().unwrap());
    assert_eq!(memory.transactions.visible().unwrap(), sqlite.transactions.visible().unwrap());
    assert_eq!(memory.stores.visible().unwrap(), sqlite.stores.visible().unwrap());
    assert_eq!(memory.compliance.visible().unwrap(), sqlite.compliance.visible().unwrap());
    assert_eq!(memory.events(), sqlite.events());
}

#[test]
fn sqlite_keeps_insertion_order_and_replaces_in_place() {
    let payouts = Fixtures::seed(now(), &PanelConfig::default()).payouts;
    let mut repo: SqliteRepository<PayoutRequest> = SqliteRepository::new(payouts.clone()).unwrap();
    assert_eq!(repo.store().record_count("payout_request").unwrap(), 4);
    assert_eq!(repo.list().unwrap(), payouts);

    let mut edited = payouts[2].clone();
    edited.region = "Annaba".into();
    assert!(repo.replace(edited.clone()).unwrap());
    assert_eq!(repo.list().unwrap()[2], edited);

    let mut stranger = payouts[0].clone();
    stranger.id = "pr999".into();
    assert!(!repo.replace(stranger).unwrap(), "unknown ids are not inserted");
    assert_eq!(repo.list().unwrap().len(), 4);
}

#[test]
fn update_writes_back_only_on_change() {
    let payouts = Fixtures::seed(now(), &PanelConfig::default()).payouts;
    let mut repo = MemoryRepository::new(payouts.clone());

    let untouched = repo
        .update("pr001", &mut |p: &mut PayoutRequest| {
            p.region = "discarded".into();
            Ok(false)
        })
        .unwrap()
        .unwrap();
    assert_eq!(untouched.region, "discarded", "the caller sees its own copy");
    assert_eq!(repo.get("pr001").unwrap().unwrap().region, "Algiers");

    assert!(repo
        .update("missing", &mut |_: &mut PayoutRequest| Ok(true))
        .unwrap()
        .is_none());
}
