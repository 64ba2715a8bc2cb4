//! Synthetic session data.
//!
//! Every timestamp is relative to the `now` the session is built with, so a
//! fixed `now` gives a fully reproducible session.

use crate::{
    compliance_view::{ComplianceDocument, DocumentStatus, DocumentType},
    config::PanelConfig,
    error::{PanelError, PanelResult},
    fee_config_view::PlatformFeeConfig,
    name_generator::NameGenerator,
    payout_view::{PayoutMethod, PayoutRequest, PayoutStatus},
    repository::Record,
    revenue_view::{PlatformMetrics, RevenueDataPoint, StoreRevenue},
    rng::{FixtureSlot, RngBank},
    store_view::{StoreAccount, StoreTier},
    transaction_view::{PaymentMethod, Transaction, TransactionKind, TransactionStatus},
    types::{Amount, Timestamp},
};
use chrono::{Duration, Months};
use std::collections::HashSet;

const PLACEHOLDER_FILE: &str = "https://placehold.co/600x400.png";

#[derive(Debug, Clone)]
pub struct Fixtures {
    pub payouts:         Vec<PayoutRequest>,
    pub transactions:    Vec<Transaction>,
    pub stores:          Vec<StoreAccount>,
    pub documents:       Vec<ComplianceDocument>,
    pub fee_config:      PlatformFeeConfig,
    pub metrics:         PlatformMetrics,
    pub weekly_revenue:  Vec<RevenueDataPoint>,
    pub monthly_revenue: Vec<RevenueDataPoint>,
    pub store_breakdown: Vec<StoreRevenue>,
}

fn days_ago(now: Timestamp, days: i64) -> Timestamp {
    now - Duration::days(days)
}

fn months_ago(now: Timestamp, months: u32) -> Timestamp {
    now.checked_sub_months(Months::new(months)).unwrap_or(now)
}

fn months_ahead(now: Timestamp, months: u32) -> Timestamp {
    now.checked_add_months(Months::new(months)).unwrap_or(now)
}

impl Fixtures {
    /// The base data set the panel ships with.
    pub fn seed(now: Timestamp, config: &PanelConfig) -> Self {
        let payouts = vec![
            payout("pr001", "AutoParts Algiers", "s001", 150_000.0, 250_000.0, "txn_payout_001",
                days_ago(now, 2), PayoutMethod::BankTransfer, PayoutStatus::Pending, "Algiers"),
            payout("pr002", "Oran Car Services", "s002", 75_000.0, 120_000.0, "txn_payout_002",
                days_ago(now, 1), PayoutMethod::Manual, PayoutStatus::Pending, "Oran"),
            payout("pr003", "Constantine Wheels", "s003", 220_000.0, 300_000.0, "txn_payout_003",
                days_ago(now, 5), PayoutMethod::BankTransfer, PayoutStatus::Approved, "Constantine"),
            payout("pr004", "Sahara Auto Fix", "s004", 50_000.0, 60_000.0, "txn_payout_004",
                days_ago(now, 3), PayoutMethod::PaperBased, PayoutStatus::Rejected, "Adrar"),
        ];

        let transactions = vec![
            transaction("txn001", "Karim B.", "AutoParts Algiers", "s001", &["Spark Plugs", "Oil Filter"],
                12_500.0, PaymentMethod::BankApi, TransactionStatus::Success, days_ago(now, 3), TransactionKind::Sale),
            transaction("txn002", "Fatima Z.", "Oran Car Services", "s002", &["Full Car Wash"],
                3_000.0, PaymentMethod::CashOnDelivery, TransactionStatus::Success, days_ago(now, 1), TransactionKind::Sale),
            transaction("txn003", "Ahmed K.", "AutoParts Algiers", "s001", &["Brake Pads"],
                8_000.0, PaymentMethod::BankApi, TransactionStatus::Failed, days_ago(now, 2), TransactionKind::Sale),
            transaction("txn004", "Leila M.", "Constantine Wheels", "s003", &["Tire Set"],
                45_000.0, PaymentMethod::Manual, TransactionStatus::Success, days_ago(now, 7), TransactionKind::Sale),
            transaction("txn005", "Yanis S.", "AutoParts Algiers", "s001", &["Refund: Oil Filter"],
                -2_500.0, PaymentMethod::BankApi, TransactionStatus::Refunded, days_ago(now, 1), TransactionKind::Refund),
        ];

        let stores = vec![
            StoreAccount {
                id: "s001".into(),
                name: "AutoParts Algiers".into(),
                current_balance: 250_000.0,
                last_payout_date: Some(days_ago(now, 30)),
                total_earnings: 1_200_000.0,
                tier: StoreTier::Premium,
                region: "Algiers".into(),
                city: "Algiers Center".into(),
                join_date: months_ago(now, 6),
                contact_email: "contact@autopartsalgiers.dz".into(),
                is_flagged: false,
                is_frozen: false,
            },
            StoreAccount {
                id: "s002".into(),
                name: "Oran Car Services".into(),
                current_balance: 120_000.0,
                last_payout_date: Some(days_ago(now, 15)),
                total_earnings: 850_000.0,
                tier: StoreTier::Basic,
                region: "Oran".into(),
                city: "Oran".into(),
                join_date: months_ago(now, 3),
                contact_email: "info@orancarservices.dz".into(),
                is_flagged: true,
                is_frozen: false,
            },
            StoreAccount {
                id: "s003".into(),
                name: "Constantine Wheels".into(),
                current_balance: 300_000.0,
                last_payout_date: Some(days_ago(now, 7)),
                total_earnings: 2_500_000.0,
                tier: StoreTier::Enterprise,
                region: "Constantine".into(),
                city: "Constantine".into(),
                join_date: months_ago(now, 12),
                contact_email: "manager@constantinewheels.com".into(),
                is_flagged: false,
                is_frozen: false,
            },
            StoreAccount {
                id: "s004".into(),
                name: "Sahara Auto Fix".into(),
                current_balance: 60_000.0,
                last_payout_date: None,
                total_earnings: 150_000.0,
                tier: StoreTier::Basic,
                region: "Adrar".into(),
                city: "Adrar".into(),
                join_date: months_ago(now, 1),
                contact_email: "saharaautofix@email.com".into(),
                is_flagged: false,
                is_frozen: true,
            },
        ];

        let documents = vec![
            document("doc001", "S001_KYC.pdf", DocumentType::Identity, "s001", "AutoParts Algiers",
                months_ago(now, 5), None, DocumentStatus::Verified),
            document("doc002", "S002_BankStatement.pdf", DocumentType::BankAccountVerification, "s002",
                "Oran Car Services", days_ago(now, 10), None, DocumentStatus::PendingReview),
            document("doc003", "S003_BusinessReg.pdf", DocumentType::BusinessRegistration, "s003",
                "Constantine Wheels", months_ago(now, 11), Some(months_ahead(now, 1)), DocumentStatus::Verified),
            document("doc004", "S004_Old_KYC.jpg", DocumentType::Identity, "s004", "Sahara Auto Fix",
                months_ago(now, 2), Some(days_ago(now, 5)), DocumentStatus::Expired),
        ];

        let weekly_revenue = [(28, 350_000.0), (21, 420_000.0), (14, 380_000.0), (7, 510_000.0), (0, 450_000.0)]
            .into_iter()
            .map(|(days, revenue)| RevenueDataPoint {
                date: days_ago(now, days).format("%Y-%m-%d").to_string(),
                revenue,
            })
            .collect();

        let monthly_revenue = [(4, 1_200_000.0), (3, 1_500_000.0), (2, 1_350_000.0), (1, 1_800_000.0), (0, 1_600_000.0)]
            .into_iter()
            .map(|(months, revenue)| RevenueDataPoint {
                date: months_ago(now, months).format("%Y-%m").to_string(),
                revenue,
            })
            .collect();

        let store_breakdown = [
            ("AutoParts Algiers", 650_000.0),
            ("Constantine Wheels", 850_000.0),
            ("Oran Car Services", 420_000.0),
            ("Sahara Auto Fix", 150_000.0),
            ("Tlemcen Auto Gear", 300_000.0),
        ]
        .into_iter()
        .map(|(name, revenue)| StoreRevenue {
            store_name: name.to_string(),
            revenue,
        })
        .collect();

        Self {
            payouts,
            transactions,
            stores,
            documents,
            fee_config: config.default_fees,
            metrics: PlatformMetrics {
                total_gross_revenue:   15_750_000.0,
                platform_earnings:     1_102_500.0,
                payouts_processed:     9_850_000.0,
                pending_payout_amount: 495_000.0,
            },
            weekly_revenue,
            monthly_revenue,
            store_breakdown,
        }
    }

    /// Append `count` generated stores, each with one payout request, one
    /// transaction and one compliance document. Same seed, same records.
    pub fn with_synthetic(mut self, seed: u64, count: usize, now: Timestamp, regions: &[String]) -> Self {
        if count == 0 || regions.is_empty() {
            return self;
        }
        let bank = RngBank::new(seed);
        let mut store_rng = bank.for_slot(FixtureSlot::Stores);
        let mut payout_rng = bank.for_slot(FixtureSlot::Payouts);
        let mut txn_rng = bank.for_slot(FixtureSlot::Transactions);
        let mut doc_rng = bank.for_slot(FixtureSlot::Documents);

        for n in 1..=count {
            let seq = 1000 + n;
            let store_id = format!("s{seq}");
            let region = store_rng.pick(regions).clone();
            let name = NameGenerator::generate_store_name(&mut store_rng, &region);
            let balance = store_rng.amount_between(10_000.0, 400_000.0);
            let tier = *store_rng.pick(StoreTier::ALL);

            self.stores.push(StoreAccount {
                id: store_id.clone(),
                name: name.clone(),
                current_balance: balance,
                last_payout_date: if store_rng.chance(0.8) {
                    Some(days_ago(now, 1 + store_rng.next_u64_below(60) as i64))
                } else {
                    None
                },
                total_earnings: balance + store_rng.amount_between(0.0, 3_000_000.0),
                tier,
                region: region.clone(),
                city: region.clone(),
                join_date: months_ago(now, 1 + store_rng.next_u64_below(24) as u32),
                contact_email: NameGenerator::contact_email(&name),
                is_flagged: store_rng.chance(0.1),
                is_frozen: store_rng.chance(0.05),
            });

            self.payouts.push(payout(
                &format!("pr{seq}"),
                &name,
                &store_id,
                payout_rng.amount_between(5_000.0, balance.max(5_001.0)),
                balance,
                &format!("txn_payout_{seq}"),
                days_ago(now, payout_rng.next_u64_below(45) as i64),
                *payout_rng.pick(PayoutMethod::ALL),
                *payout_rng.pick(PayoutStatus::ALL),
                &region,
            ));

            let refund = txn_rng.chance(0.1);
            let items = NameGenerator::generate_items(&mut txn_rng);
            let amount = txn_rng.amount_between(1_000.0, 80_000.0);
            let item_refs: Vec<&str> = items.iter().map(String::as_str).collect();
            self.transactions.push(transaction(
                &format!("txn{seq}"),
                &NameGenerator::generate_buyer_name(&mut txn_rng),
                &name,
                &store_id,
                &item_refs,
                if refund { -amount } else { amount },
                *txn_rng.pick(PaymentMethod::ALL),
                if refund {
                    TransactionStatus::Refunded
                } else {
                    *txn_rng.pick(&[
                        TransactionStatus::Success,
                        TransactionStatus::Failed,
                        TransactionStatus::Pending,
                    ])
                },
                days_ago(now, txn_rng.next_u64_below(60) as i64),
                if refund { TransactionKind::Refund } else { TransactionKind::Sale },
            ));

            let doc_type = *doc_rng.pick(DocumentType::ALL);
            self.documents.push(document(
                &format!("doc{seq}"),
                &format!("S{seq}_{}.pdf", doc_type_slug(doc_type)),
                doc_type,
                &store_id,
                &name,
                days_ago(now, doc_rng.next_u64_below(300) as i64),
                if doc_rng.chance(0.5) {
                    Some(months_ahead(now, 1 + doc_rng.next_u64_below(12) as u32))
                } else {
                    None
                },
                *doc_rng.pick(&[DocumentStatus::PendingReview, DocumentStatus::Verified, DocumentStatus::Rejected]),
            ));
        }
        log::debug!("generated {count} synthetic stores from seed {seed}");
        self
    }

    /// Check collection invariants: unique ids per collection and
    /// non-negative amounts (refund transactions excepted).
    /// Store id/name pairs are not cross-checked between collections.
    pub fn validate(&self) -> PanelResult<()> {
        unique_ids(&self.payouts)?;
        unique_ids(&self.transactions)?;
        unique_ids(&self.stores)?;
        unique_ids(&self.documents)?;

        for p in &self.payouts {
            non_negative::<PayoutRequest>(&p.id, p.amount_requested)?;
            non_negative::<PayoutRequest>(&p.id, p.total_store_balance)?;
        }
        for t in &self.transactions {
            if t.kind != TransactionKind::Refund {
                non_negative::<Transaction>(&t.id, t.amount_paid)?;
            }
        }
        for s in &self.stores {
            non_negative::<StoreAccount>(&s.id, s.current_balance)?;
            non_negative::<StoreAccount>(&s.id, s.total_earnings)?;
        }
        Ok(())
    }
}

fn unique_ids<R: Record>(records: &[R]) -> PanelResult<()> {
    let mut seen = HashSet::new();
    for r in records {
        if !seen.insert(r.id()) {
            return Err(PanelError::DuplicateId {
                collection: R::COLLECTION,
                id:         r.id().to_string(),
            });
        }
    }
    Ok(())
}

fn non_negative<R: Record>(id: &str, amount: Amount) -> PanelResult<()> {
    if amount < 0.0 {
        return Err(PanelError::NegativeAmount {
            collection: R::COLLECTION,
            id:         id.to_string(),
            amount,
        });
    }
    Ok(())
}

fn doc_type_slug(doc_type: DocumentType) -> &'static str {
    match doc_type {
        DocumentType::BankAccountVerification => "BankStatement",
        DocumentType::Identity => "KYC",
        DocumentType::BusinessRegistration => "BusinessReg",
    }
}

#[allow(clippy::too_many_arguments)]
fn payout(
    id: &str,
    store_name: &str,
    store_id: &str,
    amount_requested: Amount,
    total_store_balance: Amount,
    transaction_id: &str,
    request_time: Timestamp,
    payout_method: PayoutMethod,
    status: PayoutStatus,
    region: &str,
) -> PayoutRequest {
    PayoutRequest {
        id: id.into(),
        store_name: store_name.into(),
        store_id: store_id.into(),
        amount_requested,
        total_store_balance,
        transaction_id: transaction_id.into(),
        request_time,
        payout_method,
        status,
        region: region.into(),
    }
}

#[allow(clippy::too_many_arguments)]
fn transaction(
    id: &str,
    buyer_name: &str,
    store_name: &str,
    store_id: &str,
    items: &[&str],
    amount_paid: Amount,
    payment_method: PaymentMethod,
    status: TransactionStatus,
    transaction_date: Timestamp,
    kind: TransactionKind,
) -> Transaction {
    Transaction {
        id: id.into(),
        buyer_name: buyer_name.into(),
        store_name: store_name.into(),
        store_id: store_id.into(),
        items_purchased: items.iter().map(|s| s.to_string()).collect(),
        amount_paid,
        payment_method,
        status,
        transaction_date,
        kind,
    }
}

#[allow(clippy::too_many_arguments)]
fn document(
    id: &str,
    document_name: &str,
    document_type: DocumentType,
    store_id: &str,
    store_name: &str,
    upload_date: Timestamp,
    expiry_date: Option<Timestamp>,
    status: DocumentStatus,
) -> ComplianceDocument {
    ComplianceDocument {
        id: id.into(),
        document_name: document_name.into(),
        document_type,
        store_id: store_id.into(),
        store_name: store_name.into(),
        upload_date,
        expiry_date,
        status,
        file_url: Some(PLACEHOLDER_FILE.to_string()),
    }
}
