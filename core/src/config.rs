use crate::fee_config_view::PlatformFeeConfig;
use serde::{Deserialize, Serialize};

/// Ten years.
pub const MAX_DATE_WINDOW_DAYS: i64 = 3650;

/// Compile-time defaults, optionally overridden by a JSON file.
/// Every field may be omitted from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Wilayas offered by the region selectors.
    pub regions:           Vec<String>,
    pub default_fees:      PlatformFeeConfig,
    /// Width of the date range the payout and transaction pages open with.
    pub date_window_days:  i64,
    /// Size of the "top earning stores" list.
    pub top_stores:        usize,
    /// Shown by the preview dialog when a document has no file URL.
    pub preview_image_url: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            regions: [
                "Algiers", "Oran", "Constantine", "Annaba", "Adrar", "Tamanrasset", "Béjaïa",
                "Sétif", "Tlemcen",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            default_fees:      PlatformFeeConfig::default(),
            date_window_days:  30,
            top_stores:        5,
            preview_image_url: "https://placehold.co/600x400.png".to_string(),
        }
    }
}

impl PanelConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: PanelConfig = serde_json::from_str(&content)?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("{path}: {e}"))?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.regions.is_empty() {
            anyhow::bail!("regions must not be empty");
        }
        if !(0..=MAX_DATE_WINDOW_DAYS).contains(&self.date_window_days) {
            anyhow::bail!(
                "date_window_days must be within 0..={MAX_DATE_WINDOW_DAYS}, got {}",
                self.date_window_days
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_window_is_bounded() {
        assert!(PanelConfig::default().validate().is_ok());
        for days in [-1, MAX_DATE_WINDOW_DAYS + 1, i64::MAX] {
            let config = PanelConfig {
                date_window_days: days,
                ..PanelConfig::default()
            };
            assert!(config.validate().is_err(), "{days} days accepted");
        }
    }

    #[test]
    fn load_rejects_absurd_window() {
        let path = std::env::temp_dir().join(format!("dzdpanel-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"date_window_days": 9223372036854775807}"#).unwrap();
        let result = PanelConfig::load(path.to_str().unwrap());
        std::fs::remove_file(&path).ok();
        let err = result.unwrap_err().to_string();
        assert!(err.contains("date_window_days"), "{err}");
    }
}
