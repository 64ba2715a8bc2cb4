//! Transaction ledger: date window, store id filter and refunds.

use chrono::{DateTime, Duration, TimeZone, Utc};
use dzdpanel_core::{
    config::PanelConfig,
    filter::{Choice, DateRange, TextQuery},
    fixtures::Fixtures,
    repository::MemoryRepository,
    session::PanelSession,
    transaction_view::{
        PaymentMethod, TransactionCriteria, TransactionKind, TransactionStatus, TransactionView,
        EMPTY_MESSAGE,
    },
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap()
}

fn ids(view: &mut TransactionView) -> Vec<String> {
    view.visible()
        .expect("visible transactions")
        .into_iter()
        .map(|t| t.id)
        .collect()
}

/// A trailing 30-day window drops a sale from 40 days ago and keeps one
/// from 5 days ago.
#[test]
fn date_window_is_inclusive_of_recent_only() {
    let base = Fixtures::seed(now(), &PanelConfig::default()).transactions;
    let mut old = base[0].clone();
    old.id = "txn_old".into();
    old.transaction_date = now() - Duration::days(40);
    let mut recent = base[0].clone();
    recent.id = "txn_recent".into();
    recent.transaction_date = now() - Duration::days(5);

    let mut view = TransactionView::new(
        Box::new(MemoryRepository::new(vec![old, recent])),
        TransactionCriteria::initial(now(), 30),
    );
    assert_eq!(ids(&mut view), vec!["txn_recent"]);

    view.set_criteria(TransactionCriteria::default());
    assert_eq!(ids(&mut view), vec!["txn_old", "txn_recent"], "no range admits everything");
}

#[test]
fn range_bounds_are_inclusive() {
    let range = DateRange::trailing_days(now(), 30);
    assert!(range.contains(now()));
    assert!(range.contains(now() - Duration::days(30)));
    assert!(!range.contains(now() - Duration::days(30) - Duration::seconds(1)));
}

#[test]
fn store_id_filter_ignores_case() {
    let mut session = PanelSession::build_test(now()).unwrap();
    session.transactions.set_criteria(TransactionCriteria {
        store_id: TextQuery::new("S001"),
        ..TransactionCriteria::initial(now(), 30)
    });
    assert_eq!(ids(&mut session.transactions), vec!["txn001", "txn003", "txn005"]);
}

#[test]
fn method_and_status_filters() {
    let mut session = PanelSession::build_test(now()).unwrap();
    session.transactions.set_criteria(TransactionCriteria {
        payment_method: Choice::Only(PaymentMethod::CashOnDelivery),
        ..TransactionCriteria::initial(now(), 30)
    });
    assert_eq!(ids(&mut session.transactions), vec!["txn002"]);

    session.transactions.set_criteria(TransactionCriteria {
        status: Choice::Only(TransactionStatus::Failed),
        ..TransactionCriteria::initial(now(), 30)
    });
    assert_eq!(ids(&mut session.transactions), vec!["txn003"]);
}

/// Refunds carry a negative amount and pull the visible total down.
#[test]
fn refunds_are_negative() {
    let mut session = PanelSession::build_test(now()).unwrap();
    let refund = session.transactions.get("txn005").unwrap().expect("txn005 exists");
    assert_eq!(refund.kind, TransactionKind::Refund);
    assert_eq!(refund.status, TransactionStatus::Refunded);
    assert_eq!(refund.amount_paid, -2_500.0);

    assert_eq!(session.transactions.visible_total().unwrap(), 66_000.0);

    let page = session.transactions.page().unwrap();
    assert!(page.render().contains("-2 500,00 DZD"));
}

#[test]
fn no_match_renders_empty_message() {
    let mut session = PanelSession::build_test(now()).unwrap();
    session.transactions.set_criteria(TransactionCriteria {
        search: TextQuery::new("zzz"),
        ..TransactionCriteria::initial(now(), 30)
    });
    let page = session.transactions.page().unwrap();
    assert!(page.is_empty());
    assert_eq!(EMPTY_MESSAGE, "No transactions found.");
    assert!(page.render().contains(EMPTY_MESSAGE));
}

#[test]
fn kind_serializes_as_type() {
    let txn = Fixtures::seed(now(), &PanelConfig::default()).transactions.remove(4);
    let json = serde_json::to_value(&txn).unwrap();
    assert_eq!(json["type"], "Refund");
    assert_eq!(json["payment_method"], "Bank API");
}
