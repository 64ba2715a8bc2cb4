//! Revenue dashboard: display-only aggregates and chart series.

use crate::{
    format::{axis_millions, axis_thousands, format_currency_dzd},
    store_view::StoreAccount,
    types::Amount,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformMetrics {
    pub total_gross_revenue:   Amount,
    pub platform_earnings:     Amount,
    pub payouts_processed:     Amount,
    pub pending_payout_amount: Amount,
}

/// One chart point. `date` is `YYYY-MM-DD` for daily/weekly series and
/// `YYYY-MM` for monthly ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueDataPoint {
    pub date:    String,
    pub revenue: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRevenue {
    pub store_name: String,
    pub revenue:    Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub title:       &'static str,
    pub value:       String,
    pub description: &'static str,
}

/// A chart point relabelled for display, with its formatted axis tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label:   String,
    pub revenue: Amount,
    pub tick:    String,
}

/// Highest earners first, at most `limit` of them. Ties keep collection order.
pub fn top_earning_stores(stores: &[StoreAccount], limit: usize) -> Vec<StoreRevenue> {
    let mut ranked: Vec<&StoreAccount> = stores.iter().collect();
    ranked.sort_by(|a, b| b.total_earnings.total_cmp(&a.total_earnings));
    ranked
        .into_iter()
        .take(limit)
        .map(|s| StoreRevenue {
            store_name: s.name.clone(),
            revenue:    s.total_earnings,
        })
        .collect()
}

/// `"2026-10-18"` -> `"Oct 18"`; unparseable labels pass through.
pub fn weekly_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%b %-d").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// `"2026-10"` -> `"Oct 26"`; unparseable labels pass through.
pub fn monthly_label(date: &str) -> String {
    NaiveDate::parse_from_str(&format!("{date}-01"), "%Y-%m-%d")
        .map(|d| d.format("%b %y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

#[derive(Debug, Clone, Serialize)]
pub struct RevenueDashboard {
    pub metrics:         PlatformMetrics,
    pub weekly_revenue:  Vec<RevenueDataPoint>,
    pub monthly_revenue: Vec<RevenueDataPoint>,
    pub store_breakdown: Vec<StoreRevenue>,
    pub top_stores:      Vec<StoreRevenue>,
    /// Configured ranking length; fewer stores may be listed.
    pub top_limit:       usize,
}

impl RevenueDashboard {
    pub fn new(
        metrics: PlatformMetrics,
        weekly_revenue: Vec<RevenueDataPoint>,
        monthly_revenue: Vec<RevenueDataPoint>,
        store_breakdown: Vec<StoreRevenue>,
        stores: &[StoreAccount],
        top_n: usize,
    ) -> Self {
        Self {
            metrics,
            weekly_revenue,
            monthly_revenue,
            store_breakdown,
            top_stores: top_earning_stores(stores, top_n),
            top_limit: top_n,
        }
    }

    pub fn stat_cards(&self) -> Vec<StatCard> {
        vec![
            StatCard {
                title:       "Total Gross Revenue",
                value:       format_currency_dzd(self.metrics.total_gross_revenue),
                description: "All sales processed",
            },
            StatCard {
                title:       "Platform Earnings",
                value:       format_currency_dzd(self.metrics.platform_earnings),
                description: "7% commission on gross",
            },
            StatCard {
                title:       "Payouts Processed",
                value:       format_currency_dzd(self.metrics.payouts_processed),
                description: "Successfully paid to stores",
            },
            StatCard {
                title:       "Pending Payouts",
                value:       format_currency_dzd(self.metrics.pending_payout_amount),
                description: "Awaiting approval/processing",
            },
        ]
    }

    pub fn weekly_chart(&self) -> Vec<ChartPoint> {
        self.weekly_revenue
            .iter()
            .map(|p| ChartPoint {
                label:   weekly_label(&p.date),
                revenue: p.revenue,
                tick:    axis_thousands(p.revenue),
            })
            .collect()
    }

    pub fn monthly_chart(&self) -> Vec<ChartPoint> {
        self.monthly_revenue
            .iter()
            .map(|p| ChartPoint {
                label:   monthly_label(&p.date),
                revenue: p.revenue,
                tick:    axis_millions(p.revenue),
            })
            .collect()
    }

    pub fn breakdown_chart(&self) -> Vec<ChartPoint> {
        self.store_breakdown
            .iter()
            .map(|s| ChartPoint {
                label:   s.store_name.clone(),
                revenue: s.revenue,
                tick:    axis_thousands(s.revenue),
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Platform Revenue Dashboard\nOverview of financial performance.\n\n");
        for card in self.stat_cards() {
            out.push_str(&format!(
                "  {:<22} {:<18} {}\n",
                card.title, card.value, card.description
            ));
        }
        out.push_str("\n  Weekly Revenue Growth\n");
        for p in self.weekly_chart() {
            out.push_str(&format!("    {:<8} {}\n", p.label, p.tick));
        }
        out.push_str("\n  Monthly Revenue Growth\n");
        for p in self.monthly_chart() {
            out.push_str(&format!("    {:<8} {}\n", p.label, p.tick));
        }
        out.push_str(&format!("\n  Top {} Earning Stores\n", self.top_limit));
        for (rank, s) in self.top_stores.iter().enumerate() {
            out.push_str(&format!(
                "    {}. {:<24} {}\n",
                rank + 1,
                s.store_name,
                format_currency_dzd(s.revenue)
            ));
        }
        out.push_str("\n  Store Revenue Breakdown (Sample)\n  Current period revenue by store.\n");
        for p in self.breakdown_chart() {
            out.push_str(&format!("    {:<24} {}\n", p.label, p.tick));
        }
        out
    }
}
