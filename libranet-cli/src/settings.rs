//! Application settings (fine rate, config file location).

use std::path::PathBuf;

use libranet_core::DEFAULT_FINE_RATE;

/// Canonical path to the settings file: `~/.config/libranet/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("libranet").join("settings.toml")
}

/// Resolve the per-day fine rate using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `fines.daily_rate` in `settings.toml`
/// 3. Built-in default
pub fn resolve_fine_rate(cli_override: Option<f64>) -> f64 {
    if let Some(rate) = cli_override {
        log::debug!("fine rate {rate:.2} from --fine-rate");
        return rate;
    }
    if let Some(rate) = load_daily_rate() {
        log::debug!("fine rate {rate:.2} from {}", settings_path().display());
        return rate;
    }
    log::debug!("fine rate {DEFAULT_FINE_RATE:.2} (built-in default)");
    DEFAULT_FINE_RATE
}

/// Read `fines.daily_rate` from `settings.toml`, if set.
fn load_daily_rate() -> Option<f64> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    let rate = doc.get("fines")?.get("daily_rate")?;
    let rate = rate.as_float().or_else(|| rate.as_integer().map(|i| i as f64))?;
    if rate >= 0.0 { Some(rate) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_override_wins_over_everything() {
        assert_eq!(resolve_fine_rate(Some(2.5)), 2.5);
        assert_eq!(resolve_fine_rate(Some(0.0)), 0.0);
    }

    #[test]
    fn settings_path_ends_with_the_app_file() {
        let path = settings_path();
        assert!(path.ends_with("libranet/settings.toml"));
    }
}
