//! Platform fee configuration editor.
//!
//! One mutable record edited field by field. Inputs are parsed leniently:
//! anything unparseable is stored as NaN and rendered as "NaN". Saving only
//! logs and announces; nothing is persisted.

use crate::{
    event::PanelEvent,
    format::{format_currency_dzd, format_number, parse_float},
    labelled_enum,
    types::Amount,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformFeeConfig {
    /// Fraction of gross transaction value, e.g. 0.07 for 7%.
    pub commission_rate:         f64,
    /// Fixed fee per bank transfer payout.
    pub bank_transfer_fee:       Amount,
    /// Minimum amount for a manual payout.
    pub manual_payout_threshold: Amount,
}

impl Default for PlatformFeeConfig {
    fn default() -> Self {
        Self {
            commission_rate:         0.07,
            bank_transfer_fee:       500.0,
            manual_payout_threshold: 10_000.0,
        }
    }
}

labelled_enum! {
    /// Form input names.
    pub enum FeeField {
        CommissionRate        => "commissionRate",
        BankTransferFee       => "bankTransferFee",
        ManualPayoutThreshold => "manualPayoutThreshold",
    }
}

labelled_enum! {
    /// Each settings card has its own save button.
    pub enum FeeSection {
        Commission      => "Commission",
        Fees            => "Fees",
        PaymentPartners => "Payment Partners",
    }
}

/// Integrations listed on the settings page; toggling them is not supported.
pub const PAYMENT_PARTNERS: [(&str, &str); 2] = [
    ("Bank API XYZ", "api.bankxyz.dz/v1/payments"),
    ("Cash on Delivery", "Manual processing"),
];

/// Percentage inputs show the stored fraction times 100, normalised to 15
/// significant digits so 0.07 shows as 7, not 7.000000000000001.
pub fn fraction_to_percent(fraction: f64) -> f64 {
    let percent = fraction * 100.0;
    if !percent.is_finite() || percent == 0.0 {
        return percent;
    }
    format!("{percent:.14e}").parse().unwrap_or(percent)
}

pub fn percent_to_fraction(percent: f64) -> f64 {
    percent / 100.0
}

pub struct FeeConfigEditor {
    config: PlatformFeeConfig,
}

impl FeeConfigEditor {
    pub fn new(config: PlatformFeeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlatformFeeConfig {
        &self.config
    }

    /// Write the raw input text of `field` into the config.
    pub fn edit(&mut self, field: FeeField, raw: &str) {
        let value = parse_float(raw);
        match field {
            FeeField::CommissionRate => self.config.commission_rate = percent_to_fraction(value),
            FeeField::BankTransferFee => self.config.bank_transfer_fee = value,
            FeeField::ManualPayoutThreshold => self.config.manual_payout_threshold = value,
        }
        log::debug!("fee field {field} <- {raw:?}");
    }

    /// The number a field's input shows.
    pub fn input_value(&self, field: FeeField) -> f64 {
        match field {
            FeeField::CommissionRate => fraction_to_percent(self.config.commission_rate),
            FeeField::BankTransferFee => self.config.bank_transfer_fee,
            FeeField::ManualPayoutThreshold => self.config.manual_payout_threshold,
        }
    }

    /// The text a field's input shows.
    pub fn display(&self, field: FeeField) -> String {
        format_number(self.input_value(field))
    }

    pub fn save(&self, section: FeeSection) -> PanelEvent {
        log::info!("Saving {section}: {:?}", self.config);
        PanelEvent::FeeConfigSaved {
            section,
            config: self.config,
        }
    }

    pub fn reset(&mut self, config: PlatformFeeConfig) {
        self.config = config;
    }

    /// What the stored commission takes from a 10 000 DZD sale.
    /// NaN input propagates here as "NaN DZD".
    pub fn commission_preview(&self) -> String {
        format!(
            "Current rate: {} per 10,000 DZD transaction.",
            format_currency_dzd(10_000.0 * self.config.commission_rate)
        )
    }

    pub fn render(&self) -> String {
        let mut out = String::from(
            "Configuration & Fees\nManage platform-wide settings and financial parameters.\n\n",
        );
        out.push_str("  Commission Rates\n");
        out.push_str(&format!(
            "    Default Commission Rate (%)    {}\n",
            self.display(FeeField::CommissionRate)
        ));
        out.push_str(&format!("    {}\n", self.commission_preview()));
        out.push_str("\n  Transaction Fees\n");
        out.push_str(&format!(
            "    Bank Transfer Fee (DZD)        {}\n",
            self.display(FeeField::BankTransferFee)
        ));
        out.push_str(&format!(
            "    Manual Payout Threshold (DZD)  {}\n",
            self.display(FeeField::ManualPayoutThreshold)
        ));
        out.push_str("\n  Payment Partners\n");
        for (partner, detail) in PAYMENT_PARTNERS {
            out.push_str(&format!("    {partner:<30} {detail}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_display_is_normalised() {
        assert_eq!(fraction_to_percent(0.07), 7.0);
        assert_eq!(fraction_to_percent(0.075), 7.5);
        assert!(fraction_to_percent(f64::NAN).is_nan());
        assert_eq!(fraction_to_percent(0.123456789012), 12.3456789012);
        assert_eq!(fraction_to_percent(1e-12), 1e-10);
    }

    #[test]
    fn field_names_follow_form_inputs() {
        assert_eq!("bankTransferFee".parse::<FeeField>().unwrap(), FeeField::BankTransferFee);
        assert!("bank_transfer_fee".parse::<FeeField>().is_err());
    }
}
