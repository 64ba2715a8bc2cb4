//! Core of the DZD Control back-office panel: record collections, the
//! filterable views over them, status workflows, fee configuration and the
//! revenue dashboard. The `panel-runner` binary drives a `PanelSession`.

pub mod types;
pub mod error;
pub mod filter;
pub mod transition;
pub mod repository;
pub mod list_view;
pub mod sql_store;
pub mod format;
pub mod table;
pub mod navigation;
pub mod rng;
pub mod name_generator;
pub mod event;
pub mod command;
pub mod config;
pub mod fixtures;
pub mod payout_view;
pub mod transaction_view;
pub mod store_view;
pub mod compliance_view;
pub mod fee_config_view;
pub mod revenue_view;
pub mod session;
