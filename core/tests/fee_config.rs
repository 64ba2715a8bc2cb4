//! Fee configuration editor: lenient numeric input and per-section saves.

use chrono::{TimeZone, Utc};
use dzdpanel_core::{
    command::PanelCommand,
    fee_config_view::{FeeConfigEditor, FeeField, FeeSection, PlatformFeeConfig},
    session::PanelSession,
};

/// The commission input shows percent while the config stores a fraction.
#[test]
fn commission_percent_round_trips() {
    for (input, stored) in [("0", 0.0), ("7", 0.07), ("7.5", 0.075), ("100", 1.0)] {
        let mut editor = FeeConfigEditor::new(PlatformFeeConfig::default());
        editor.edit(FeeField::CommissionRate, input);
        assert_eq!(
            editor.config().commission_rate, stored,
            "input {input} should store {stored}"
        );
        assert_eq!(editor.display(FeeField::CommissionRate), input, "input {input} redisplays");
    }
}

/// Long fractions survive the percent/fraction conversion unchanged.
#[test]
fn long_commission_fractions_redisplay_exactly() {
    for input in ["12.3456789012", "0.0000000001", "33.3333333333", "99.9999999999"] {
        let mut editor = FeeConfigEditor::new(PlatformFeeConfig::default());
        editor.edit(FeeField::CommissionRate, input);
        assert_eq!(editor.display(FeeField::CommissionRate), input, "input {input} redisplays");
    }
}

#[test]
fn defaults_display_as_whole_numbers() {
    let editor = FeeConfigEditor::new(PlatformFeeConfig::default());
    assert_eq!(editor.display(FeeField::CommissionRate), "7");
    assert_eq!(editor.display(FeeField::BankTransferFee), "500");
    assert_eq!(editor.display(FeeField::ManualPayoutThreshold), "10000");
}

/// Unparseable input is kept as NaN rather than rejected.
#[test]
fn invalid_input_becomes_nan() {
    let mut editor = FeeConfigEditor::new(PlatformFeeConfig::default());
    editor.edit(FeeField::BankTransferFee, "");
    assert!(editor.config().bank_transfer_fee.is_nan());
    assert_eq!(editor.display(FeeField::BankTransferFee), "NaN");

    editor.edit(FeeField::ManualPayoutThreshold, "12000 DZD");
    assert_eq!(editor.config().manual_payout_threshold, 12_000.0, "trailing text is ignored");
}

#[test]
fn saving_a_section_announces_it() {
    let mut session = PanelSession::build_test(Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap())
        .unwrap();
    session
        .apply(PanelCommand::EditFee {
            field: FeeField::CommissionRate,
            value: "8".into(),
        })
        .unwrap();

    let notes = session
        .apply(PanelCommand::SaveFees { section: FeeSection::Commission })
        .unwrap();
    assert_eq!(notes[0].title, "Commission Settings Saved");
    assert_eq!(notes[0].description, "The commission configuration has been updated.");
    assert_eq!(session.fees.config().commission_rate, 0.08);

    let notes = session
        .apply(PanelCommand::SaveFees { section: FeeSection::PaymentPartners })
        .unwrap();
    assert_eq!(notes[0].title, "Payment Partners Settings Saved");
    assert_eq!(notes[0].description, "The payment partners configuration has been updated.");
}

#[test]
fn edit_command_uses_form_field_names() {
    let command: PanelCommand =
        serde_json::from_str(r#"{"cmd":"edit_fee","field":"bankTransferFee","value":"750"}"#)
            .unwrap();
    let mut session = PanelSession::build_test(Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap())
        .unwrap();
    let notes = session.apply(command).unwrap();
    assert!(notes.is_empty(), "editing alone raises nothing");
    assert_eq!(session.fees.config().bank_transfer_fee, 750.0);
}

/// The derived rate line follows the commission input, NaN included.
#[test]
fn commission_preview_follows_the_input() {
    let mut editor = FeeConfigEditor::new(PlatformFeeConfig::default());
    assert_eq!(
        editor.commission_preview(),
        "Current rate: 700,00 DZD per 10,000 DZD transaction."
    );

    editor.edit(FeeField::CommissionRate, "abc");
    assert_eq!(editor.display(FeeField::CommissionRate), "NaN");
    let page = editor.render();
    assert!(
        page.contains("Current rate: NaN DZD per 10,000 DZD transaction."),
        "rate line should show NaN DZD:\n{page}"
    );
    assert!(page.starts_with("Configuration & Fees"));
}
