//! Revenue dashboard aggregates and the navigation table.

use chrono::{DateTime, TimeZone, Utc};
use dzdpanel_core::{
    navigation::{active_item, Route, NAV_ITEMS},
    revenue_view::top_earning_stores,
    session::PanelSession,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap()
}

#[test]
fn top_stores_rank_by_total_earnings() {
    let session = PanelSession::build_test(now()).unwrap();
    let names: Vec<&str> = session
        .dashboard
        .top_stores
        .iter()
        .map(|s| s.store_name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Constantine Wheels", "AutoParts Algiers", "Oran Car Services", "Sahara Auto Fix"]
    );
}

/// Ranking leaves the store collection in its original order.
#[test]
fn ranking_does_not_reorder_stores() {
    let session = PanelSession::build_test(now()).unwrap();
    let stores = session.stores.all().unwrap();
    let top = top_earning_stores(&stores, 2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].revenue, 2_500_000.0);
    let ids: Vec<&str> = stores.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["s001", "s002", "s003", "s004"]);
}

#[test]
fn stat_cards_format_dinar_amounts() {
    let session = PanelSession::build_test(now()).unwrap();
    let cards = session.dashboard.stat_cards();
    assert_eq!(cards.len(), 4);
    assert_eq!(cards[0].value, "15 750 000,00 DZD");
    assert_eq!(cards[3].value, "495 000,00 DZD");
}

#[test]
fn chart_series_are_relative_to_now() {
    let session = PanelSession::build_test(now()).unwrap();

    let weekly = session.dashboard.weekly_chart();
    assert_eq!(weekly.len(), 5);
    assert_eq!(weekly[0].label, "Sep 20");
    assert_eq!(weekly[4].label, "Oct 18");
    assert_eq!(weekly[3].tick, "510k");

    let monthly = session.dashboard.monthly_chart();
    assert_eq!(monthly[0].label, "Jun 26");
    assert_eq!(monthly[4].label, "Oct 26");
    assert_eq!(monthly[1].tick, "1.5M");

    let breakdown = session.dashboard.breakdown_chart();
    assert_eq!(breakdown.len(), 5);
    assert_eq!(breakdown[4].label, "Tlemcen Auto Gear");
}

#[test]
fn navigation_matches_by_prefix() {
    assert_eq!(NAV_ITEMS.len(), 6);
    assert_eq!(Route::resolve("/payouts/pr001"), Some(Route::Payouts));
    assert_eq!(Route::resolve("/"), None);
    assert_eq!(active_item("/settings").map(|i| i.label), Some("Configuration"));
    assert!(active_item("/unknown").is_none());
}

/// Stat cards carry their captions and every chart, breakdown included, renders.
#[test]
fn render_shows_captions_and_breakdown() {
    let session = PanelSession::build_test(now()).unwrap();
    let captions: Vec<&str> = session
        .dashboard
        .stat_cards()
        .iter()
        .map(|c| c.description)
        .collect();
    assert_eq!(
        captions,
        vec![
            "All sales processed",
            "7% commission on gross",
            "Successfully paid to stores",
            "Awaiting approval/processing",
        ]
    );

    let text = session.dashboard.render();
    assert!(text.starts_with("Platform Revenue Dashboard"));
    for needle in [
        "7% commission on gross",
        "Weekly Revenue Growth",
        "Monthly Revenue Growth",
        "Top 5 Earning Stores",
        "Store Revenue Breakdown (Sample)",
        "Tlemcen Auto Gear",
        "300k",
    ] {
        assert!(text.contains(needle), "missing {needle:?} in dashboard");
    }
}
