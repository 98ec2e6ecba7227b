use crate::components::shift_editor::models::ShiftDefaults;
use crate::error::{config_error, env_error, EditorResult};
use crate::utils::time::today_in;
use chrono::NaiveDate;
use dotenvy::dotenv;
use std::env;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Default locale for user-facing messages
pub const DEFAULT_LOCALE: &str = "fa";

/// Default timeout for shift API requests, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// File overriding the shape of editor-created intervals
pub const SHIFT_DEFAULTS_FILE: &str = "config/shift_defaults.toml";

/// Main configuration structure for the editor
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the booking REST API
    pub api_base_url: String,
    /// Bearer token for the API
    pub api_token: Option<String>,
    /// Timezone deciding what "today" is
    pub timezone: String,
    /// Locale for user-facing messages
    pub locale: String,
    /// Timeout for API requests
    pub request_timeout_secs: u64,
    /// Shape of intervals created by the editor
    pub shift_defaults: ShiftDefaults,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> EditorResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let api_base_url = env::var("SHIFT_API_URL").map_err(|_| env_error("SHIFT_API_URL"))?;
        let api_token = env::var("SHIFT_API_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let timezone = env::var("TIMEZONE").unwrap_or_else(|_| String::from("UTC"));
        let locale = env::var("EDITOR_LOCALE").unwrap_or_else(|_| String::from(DEFAULT_LOCALE));

        let request_timeout_secs = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| config_error("Invalid REQUEST_TIMEOUT_SECS format"))?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let shift_defaults = Self::load_shift_defaults(Path::new(SHIFT_DEFAULTS_FILE));

        Ok(Config {
            api_base_url,
            api_token,
            timezone,
            locale,
            request_timeout_secs,
            shift_defaults,
        })
    }

    /// Read interval defaults from a TOML file, falling back to the built-in
    /// ones when the file is missing or unreadable
    pub fn load_shift_defaults(path: &Path) -> ShiftDefaults {
        let Ok(content) = fs::read_to_string(path) else {
            return ShiftDefaults::default();
        };

        match Self::parse_shift_defaults(&content) {
            Ok(defaults) => defaults,
            Err(e) => {
                warn!("Ignoring invalid {}: {}", path.display(), e);
                ShiftDefaults::default()
            }
        }
    }

    /// Parse interval defaults from TOML text
    pub fn parse_shift_defaults(content: &str) -> EditorResult<ShiftDefaults> {
        let defaults = toml::from_str::<ShiftDefaults>(content)?;
        defaults
            .check()
            .map_err(|e| config_error(&format!("Invalid shift defaults: {}", e)))?;
        Ok(defaults)
    }

    /// Today's date in the configured timezone
    pub fn today(&self) -> EditorResult<NaiveDate> {
        today_in(&self.timezone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_missing_defaults_file() {
        let defaults = Config::load_shift_defaults(Path::new("does/not/exist.toml"));
        assert_eq!(defaults, ShiftDefaults::default());
    }

    #[test]
    fn test_defaults_file_overrides() {
        let path = env::temp_dir().join(format!("shift_defaults_{}.toml", std::process::id()));
        fs::write(&path, "start = \"10:00\"\nadded_gap_minutes = 30\n").unwrap();

        let defaults = Config::load_shift_defaults(&path);
        fs::remove_file(&path).unwrap();

        assert_eq!(defaults.start, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        assert_eq!(defaults.added_gap_minutes, 30);
        assert_eq!(defaults.length_minutes, 8 * 60);
    }

    #[test]
    fn test_invalid_defaults_file_falls_back() {
        let path = env::temp_dir().join(format!("shift_defaults_bad_{}.toml", std::process::id()));
        fs::write(&path, "start = \"25:00\"\n").unwrap();

        let defaults = Config::load_shift_defaults(&path);
        fs::remove_file(&path).unwrap();

        assert_eq!(defaults, ShiftDefaults::default());
    }

    #[test]
    fn test_out_of_range_defaults_are_rejected() {
        for content in [
            "added_length_minutes = 0",
            "length_minutes = -60",
            "added_gap_minutes = -15",
            "length_minutes = 9223372036854775807",
            "added_gap_minutes = 100000",
        ] {
            let result = Config::parse_shift_defaults(content);
            assert!(
                matches!(result, Err(crate::error::Error::Config(_))),
                "{} was accepted",
                content
            );
        }

        let defaults = Config::parse_shift_defaults("added_gap_minutes = 0").unwrap();
        assert_eq!(defaults.added_gap_minutes, 0);
    }

    #[test]
    fn test_out_of_range_defaults_file_falls_back() {
        let path = env::temp_dir().join(format!("shift_defaults_zero_{}.toml", std::process::id()));
        fs::write(&path, "added_length_minutes = 0\n").unwrap();

        let defaults = Config::load_shift_defaults(&path);
        fs::remove_file(&path).unwrap();

        assert_eq!(defaults, ShiftDefaults::default());
        let day = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        let seed = defaults.seed_interval(day);
        assert!(defaults.interval_after(&seed).is_well_formed());
    }

    #[test]
    fn test_today_uses_timezone() {
        let mut config = Config {
            api_base_url: "http://localhost:8080".to_string(),
            api_token: None,
            timezone: "Asia/Tehran".to_string(),
            locale: "en".to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            shift_defaults: ShiftDefaults::default(),
        };
        assert!(config.today().is_ok());

        config.timezone = "Not/AZone".to_string();
        assert!(config.today().is_err());
    }
}
