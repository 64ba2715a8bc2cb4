//! The fixed left-hand navigation of the panel.

use serde::Serialize;

pub const APP_NAME: &str = "DZD Control";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub href:  &'static str,
    pub label: &'static str,
    pub icon:  &'static str,
}

pub static NAV_ITEMS: [NavItem; 6] = [
    NavItem { href: "/dashboard",    label: "Dashboard",       icon: "layout-dashboard" },
    NavItem { href: "/payouts",      label: "Payout Requests", icon: "hand-coins" },
    NavItem { href: "/transactions", label: "Transactions",    icon: "list-checks" },
    NavItem { href: "/stores",       label: "Store Accounts",  icon: "users" },
    NavItem { href: "/compliance",   label: "Compliance",      icon: "shield-check" },
    NavItem { href: "/settings",     label: "Configuration",   icon: "sliders-horizontal" },
];

/// The page a path resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Dashboard,
    Payouts,
    Transactions,
    Stores,
    Compliance,
    Settings,
}

impl Route {
    pub fn href(&self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Payouts => "/payouts",
            Self::Transactions => "/transactions",
            Self::Stores => "/stores",
            Self::Compliance => "/compliance",
            Self::Settings => "/settings",
        }
    }

    /// First route whose href is a prefix of `path`.
    pub fn resolve(path: &str) -> Option<Route> {
        const ROUTES: [Route; 6] = [
            Route::Dashboard,
            Route::Payouts,
            Route::Transactions,
            Route::Stores,
            Route::Compliance,
            Route::Settings,
        ];
        ROUTES.into_iter().find(|r| path.starts_with(r.href()))
    }
}

/// The navigation entry highlighted for `path`, if any.
pub fn active_item(path: &str) -> Option<&'static NavItem> {
    NAV_ITEMS.iter().find(|item| path.starts_with(item.href))
}

pub fn render_nav(path: &str) -> String {
    let active = active_item(path);
    let mut out = format!("{APP_NAME}\n");
    for item in &NAV_ITEMS {
        let marker = if Some(item) == active { '>' } else { ' ' };
        out.push_str(&format!(" {marker} {:<16} {}\n", item.label, item.href));
    }
    out
}
