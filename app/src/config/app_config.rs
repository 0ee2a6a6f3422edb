//! Runtime application configuration loaded from the environment.

use link_oracle::SchemeRegistry;
use qr_engine::{DEFAULT_QUIET_ZONE, DISPLAY_SIZE, ErrorCorrection};

use super::validation::validate_setting;

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub image_size: u32,
    pub quiet_zone: usize,
    pub error_correction: ErrorCorrection,
    pub openable_schemes: SchemeRegistry,
    pub max_screens: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 8080,
            image_size: DISPLAY_SIZE,
            quiet_zone: DEFAULT_QUIET_ZONE,
            error_correction: ErrorCorrection::default(),
            openable_schemes: SchemeRegistry::default(),
            max_screens: 64,
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`; unset keys keep their defaults,
    /// invalid values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let g = |key: &str| -> Option<String> {
            let value = lookup(key)?;
            match validate_setting(key, &value) {
                Ok(()) => Some(value),
                Err(e) => {
                    tracing::warn!(key, value = %value, "Ignoring invalid setting: {e}");
                    None
                }
            }
        };

        let mut config = Self::default();

        if let Some(v) = g("SERVER_PORT").and_then(|v| v.trim().parse::<u16>().ok()) {
            config.server_port = v;
        }
        if let Some(v) = g("QR_IMAGE_SIZE").and_then(|v| v.trim().parse::<u32>().ok()) {
            config.image_size = v;
        }
        if let Some(v) = g("QR_QUIET_ZONE").and_then(|v| v.trim().parse::<usize>().ok()) {
            config.quiet_zone = v;
        }
        if let Some(ec) = g("QR_ERROR_CORRECTION").and_then(|v| ErrorCorrection::from_letter(&v)) {
            config.error_correction = ec;
        }
        if let Some(reg) = g("QR_OPENABLE_SCHEMES").and_then(|v| SchemeRegistry::parse_list(&v).ok()) {
            config.openable_schemes = reg;
        }
        if let Some(v) = g("MAX_SCREENS").and_then(|v| v.trim().parse::<usize>().ok()) {
            config.max_screens = v;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load_from(pairs: &[(&str, &str)]) -> AppConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let c = load_from(&[]);
        assert_eq!(c.server_port, 8080);
        assert_eq!(c.image_size, 200);
        assert_eq!(c.quiet_zone, 1);
        assert_eq!(c.error_correction, ErrorCorrection::Medium);
        assert!(c.openable_schemes.contains("https"));
        assert_eq!(c.max_screens, 64);
    }

    #[test]
    fn test_overrides_applied() {
        let c = load_from(&[
            ("SERVER_PORT", "9000"),
            ("QR_IMAGE_SIZE", "512"),
            ("QR_QUIET_ZONE", "4"),
            ("QR_ERROR_CORRECTION", "q"),
            ("QR_OPENABLE_SCHEMES", "https,myapp"),
            ("MAX_SCREENS", "5"),
        ]);
        assert_eq!(c.max_screens, 5);
        assert_eq!(c.server_port, 9000);
        assert_eq!(c.image_size, 512);
        assert_eq!(c.quiet_zone, 4);
        assert_eq!(c.error_correction, ErrorCorrection::Quartile);
        assert!(c.openable_schemes.contains("myapp"));
        assert!(!c.openable_schemes.contains("http"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let c = load_from(&[
            ("SERVER_PORT", "not-a-port"),
            ("QR_IMAGE_SIZE", "1"),
            ("QR_ERROR_CORRECTION", "X"),
            ("QR_OPENABLE_SCHEMES", " , "),
            ("MAX_SCREENS", "0"),
        ]);
        assert_eq!(c.max_screens, 64);
        assert_eq!(c.server_port, 8080);
        assert_eq!(c.image_size, 200);
        assert_eq!(c.error_correction, ErrorCorrection::Medium);
        assert_eq!(c.openable_schemes, SchemeRegistry::default());
    }
}
