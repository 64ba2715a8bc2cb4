//! Session lifecycle: command dispatch, notification feed, refresh and
//! fixture validation.

use chrono::{DateTime, TimeZone, Utc};
use dzdpanel_core::{
    command::PanelCommand,
    config::PanelConfig,
    error::PanelError,
    fixtures::Fixtures,
    navigation::Route,
    session::{Backend, PanelSession, Synthetic},
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap()
}

#[test]
fn notifications_accumulate_in_order() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut session = PanelSession::build_test(now()).unwrap();
    session
        .apply(PanelCommand::ApprovePayout { payout_id: "pr001".into() })
        .unwrap();
    session
        .apply(PanelCommand::ToggleStoreFreeze { store_id: "s003".into() })
        .unwrap();

    let titles: Vec<&str> = session.notifications().iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["Payout Approved", "Store Frozen"]);
    assert_eq!(session.events().len(), 2);
    assert_ne!(
        session.notifications()[0].id,
        session.notifications()[1].id,
        "every notification gets its own id"
    );
}

/// Refresh throws away every change made during the session.
#[test]
fn refresh_reverts_to_fixtures() {
    let mut session = PanelSession::build_test(now()).unwrap();
    let stores = session.stores.all().unwrap();
    let payouts = session.payouts.all().unwrap();

    session
        .apply(PanelCommand::ToggleStoreFreeze { store_id: "s001".into() })
        .unwrap();
    session
        .apply(PanelCommand::RejectPayout { payout_id: "pr001".into() })
        .unwrap();
    session
        .set_criteria_json(Route::Stores, serde_json::json!({ "tier": "Basic" }))
        .unwrap();

    session.apply(PanelCommand::Refresh).unwrap();

    assert_eq!(session.stores.all().unwrap(), stores);
    assert_eq!(session.payouts.all().unwrap(), payouts);
    assert_eq!(session.stores.visible().unwrap().len(), 4, "criteria reset too");
    assert!(session.notifications().is_empty());
}

#[test]
fn criteria_arrive_as_json() {
    let mut session = PanelSession::build_test(now()).unwrap();
    session
        .set_criteria_json(Route::Payouts, serde_json::json!({ "status": "Pending", "region": "All" }))
        .unwrap();
    assert_eq!(session.payouts.visible().unwrap().len(), 2);

    let bad = session.set_criteria_json(Route::Payouts, serde_json::json!({ "status": "Paid" }));
    assert!(matches!(bad, Err(PanelError::Serialization(_))), "got {bad:?}");

    // Pages without criteria accept and ignore them.
    session
        .set_criteria_json(Route::Dashboard, serde_json::json!({ "anything": 1 }))
        .unwrap();
}

#[test]
fn render_all_covers_every_page() {
    let mut session = PanelSession::build_test(now()).unwrap();
    let text = session.render_all().unwrap();
    for needle in [
        "DZD Control",
        "Platform Revenue Dashboard",
        "Payout Requests",
        "Transaction Records",
        "Store Accounts & Balances",
        "Compliance & Documents",
        "Configuration & Fees",
    ] {
        assert!(text.contains(needle), "missing {needle:?} in rendering");
    }
}

#[test]
fn backend_names_parse() {
    assert_eq!("memory".parse::<Backend>().unwrap(), Backend::Memory);
    assert_eq!("sqlite".parse::<Backend>().unwrap(), Backend::Sqlite);
    assert!("postgres".parse::<Backend>().is_err());
}

#[test]
fn seeded_fixtures_are_valid() {
    let fixtures = Fixtures::seed(now(), &PanelConfig::default());
    fixtures.validate().expect("seed data is consistent");
    assert_eq!(fixtures.payouts.len(), 4);
    assert_eq!(fixtures.transactions.len(), 5);
    assert_eq!(fixtures.stores.len(), 4);
    assert_eq!(fixtures.documents.len(), 4);
}

#[test]
fn validation_rejects_duplicates_and_negative_amounts() {
    let mut dup = Fixtures::seed(now(), &PanelConfig::default());
    let copy = dup.stores[0].clone();
    dup.stores.push(copy);
    assert!(matches!(
        dup.validate(),
        Err(PanelError::DuplicateId { collection: "store_account", .. })
    ));

    let mut negative = Fixtures::seed(now(), &PanelConfig::default());
    negative.payouts[1].amount_requested = -1.0;
    assert!(matches!(
        negative.validate(),
        Err(PanelError::NegativeAmount { collection: "payout_request", .. })
    ));
}

/// Same seed, same synthetic records.
#[test]
fn synthetic_fixtures_are_deterministic() {
    let config = PanelConfig::default();
    let a = Fixtures::seed(now(), &config).with_synthetic(7, 25, now(), &config.regions);
    let b = Fixtures::seed(now(), &config).with_synthetic(7, 25, now(), &config.regions);
    let c = Fixtures::seed(now(), &config).with_synthetic(8, 25, now(), &config.regions);

    a.validate().expect("synthetic data is consistent");
    assert_eq!(a.stores.len(), 29);
    assert_eq!(a.payouts.len(), 29);
    assert_eq!(a.stores, b.stores);
    assert_eq!(a.transactions, b.transactions);
    assert_ne!(a.stores, c.stores, "a different seed should differ");
}

#[test]
fn synthetic_session_builds_on_sqlite() {
    let mut session = PanelSession::build_with_synthetic(
        now(),
        PanelConfig::default(),
        Backend::Sqlite,
        Synthetic { seed: 3, count: 10 },
    )
    .unwrap();
    assert_eq!(session.stores.visible().unwrap().len(), 14);
    assert_eq!(session.backend(), Backend::Sqlite);
}

/// A runaway date window is refused up front instead of overflowing date math.
#[test]
fn oversized_date_window_is_refused() {
    let config = PanelConfig {
        date_window_days: i64::MAX,
        ..PanelConfig::default()
    };
    let result = PanelSession::build(now(), config, Backend::Memory);
    assert!(matches!(result, Err(PanelError::Other(_))));

    let negative = PanelConfig {
        date_window_days: -1,
        ..PanelConfig::default()
    };
    assert!(PanelSession::build(now(), negative, Backend::Memory).is_err());
}
