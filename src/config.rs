//! Configuration loaded from environment variables.
//!
//! Built once in `main` and passed by reference to whatever needs it. A `.env`
//! file in the working directory is loaded first when present.

use std::env;
use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::ConfigError;
use crate::llm::Provider;

pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const OPENROUTER_API_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const DAYS_VAR: &str = "GIT_SUMMARIZER_DAYS";
pub const MAX_DIFF_VAR: &str = "GIT_SUMMARIZER_MAX_DIFF";
pub const GEMINI_MODEL_VAR: &str = "GIT_SUMMARIZER_GEMINI_MODEL";
pub const OPENROUTER_MODEL_VAR: &str = "GIT_SUMMARIZER_OPENROUTER_MODEL";
pub const PROVIDER_VAR: &str = "GIT_SUMMARIZER_PROVIDER";
pub const SLACK_WEBHOOK_VAR: &str = "SLACK_WEBHOOK_URL";
pub const GEMINI_URL_VAR: &str = "GIT_SUMMARIZER_GEMINI_URL";
pub const OPENROUTER_URL_VAR: &str = "GIT_SUMMARIZER_OPENROUTER_URL";

pub const DEFAULT_DAYS: u32 = 7;
pub const DEFAULT_MAX_DIFF_CHARS: usize = 8000;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-flash-latest";
pub const DEFAULT_OPENROUTER_MODEL: &str = "xiaomi/mimo-v2-flash:free";
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_OPENROUTER_URL: &str = "https://openrouter.ai/api/v1";

/// Which provider the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderPreference {
    #[default]
    Auto,
    Gemini,
    OpenRouter,
}

impl FromStr for ProviderPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" | "" => Ok(Self::Auto),
            "gemini" => Ok(Self::Gemini),
            "openrouter" => Ok(Self::OpenRouter),
            other => Err(format!("Unknown provider: {}", other)),
        }
    }
}

impl fmt::Display for ProviderPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Gemini => f.write_str("gemini"),
            Self::OpenRouter => f.write_str("openrouter"),
        }
    }
}

/// Configuration settings for git-summarizer.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub openrouter_api_key: String,
    pub default_days: u32,
    pub max_diff_chars: usize,
    pub gemini_model: String,
    pub openrouter_model: String,
    pub gemini_base_url: String,
    pub openrouter_base_url: String,
    pub preferred_provider: ProviderPreference,
    pub slack_webhook_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: String::new(),
            openrouter_api_key: String::new(),
            default_days: DEFAULT_DAYS,
            max_diff_chars: DEFAULT_MAX_DIFF_CHARS,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            openrouter_model: DEFAULT_OPENROUTER_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_URL.to_string(),
            openrouter_base_url: DEFAULT_OPENROUTER_URL.to_string(),
            preferred_provider: ProviderPreference::Auto,
            slack_webhook_url: String::new(),
        }
    }
}

impl Config {
    /// Load `.env` (if present) and then read the environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Read configuration from the process environment only.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            gemini_api_key: string_var(GEMINI_API_KEY_VAR).unwrap_or_default(),
            openrouter_api_key: string_var(OPENROUTER_API_KEY_VAR).unwrap_or_default(),
            default_days: parsed_var(DAYS_VAR, defaults.default_days),
            max_diff_chars: parsed_var(MAX_DIFF_VAR, defaults.max_diff_chars),
            gemini_model: string_var(GEMINI_MODEL_VAR).unwrap_or(defaults.gemini_model),
            openrouter_model: string_var(OPENROUTER_MODEL_VAR).unwrap_or(defaults.openrouter_model),
            gemini_base_url: string_var(GEMINI_URL_VAR).unwrap_or(defaults.gemini_base_url),
            openrouter_base_url: string_var(OPENROUTER_URL_VAR)
                .unwrap_or(defaults.openrouter_base_url),
            preferred_provider: parsed_var(PROVIDER_VAR, defaults.preferred_provider),
            slack_webhook_url: string_var(SLACK_WEBHOOK_VAR).unwrap_or_default(),
        }
    }

    /// Determine which provider to use from the preference and available keys.
    ///
    /// An explicit preference only resolves when its key is set. `auto`
    /// prefers OpenRouter (free tier available), then Gemini.
    pub fn active_provider(&self) -> Result<Provider, ConfigError> {
        let has_gemini = !self.gemini_api_key.is_empty();
        let has_openrouter = !self.openrouter_api_key.is_empty();

        match self.preferred_provider {
            ProviderPreference::Gemini if has_gemini => Ok(Provider::Gemini),
            ProviderPreference::OpenRouter if has_openrouter => Ok(Provider::OpenRouter),
            ProviderPreference::Auto if has_openrouter => Ok(Provider::OpenRouter),
            ProviderPreference::Auto if has_gemini => Ok(Provider::Gemini),
            _ => Err(ConfigError::NoProviderConfigured),
        }
    }

    /// Check that at least one usable provider is configured.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.active_provider().map(|_| ())
    }

    /// Diff budget as passed to the analyzer; zero disables truncation.
    pub fn diff_budget(&self) -> Option<usize> {
        (self.max_diff_chars > 0).then_some(self.max_diff_chars)
    }

    pub fn slack_webhook(&self) -> Option<&str> {
        (!self.slack_webhook_url.trim().is_empty()).then_some(self.slack_webhook_url.trim())
    }
}

fn string_var(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

/// Read and parse a variable, warning and using `default` on bad input.
fn parsed_var<T>(name: &str, default: T) -> T
where
    T: FromStr + fmt::Display,
{
    match string_var(name) {
        Some(v) => match v.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("Invalid {} value '{}', using default {}", name, v, default);
                default
            }
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: [&str; 10] = [
        GEMINI_API_KEY_VAR,
        OPENROUTER_API_KEY_VAR,
        DAYS_VAR,
        MAX_DIFF_VAR,
        GEMINI_MODEL_VAR,
        OPENROUTER_MODEL_VAR,
        PROVIDER_VAR,
        SLACK_WEBHOOK_VAR,
        GEMINI_URL_VAR,
        OPENROUTER_URL_VAR,
    ];

    fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let mut all: Vec<(&str, Option<&str>)> = ALL_VARS.iter().map(|v| (*v, None)).collect();
        for (k, v) in vars {
            if let Some(slot) = all.iter_mut().find(|(name, _)| name == k) {
                slot.1 = Some(*v);
            }
        }
        temp_env::with_vars(all, f);
    }

    fn config(gemini: &str, openrouter: &str, pref: ProviderPreference) -> Config {
        Config {
            gemini_api_key: gemini.to_string(),
            openrouter_api_key: openrouter.to_string(),
            preferred_provider: pref,
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_when_env_empty() {
        with_env(&[], || {
            let cfg = Config::from_env();
            assert_eq!(cfg.default_days, DEFAULT_DAYS);
            assert_eq!(cfg.max_diff_chars, DEFAULT_MAX_DIFF_CHARS);
            assert_eq!(cfg.gemini_model, DEFAULT_GEMINI_MODEL);
            assert_eq!(cfg.openrouter_model, DEFAULT_OPENROUTER_MODEL);
            assert_eq!(cfg.preferred_provider, ProviderPreference::Auto);
            assert!(cfg.slack_webhook().is_none());
        });
    }

    #[test]
    fn test_reads_values_from_env() {
        with_env(
            &[
                (OPENROUTER_API_KEY_VAR, "or-key"),
                (DAYS_VAR, "14"),
                (MAX_DIFF_VAR, "2000"),
                (PROVIDER_VAR, "Gemini"),
                (GEMINI_MODEL_VAR, "gemini-pro"),
                (SLACK_WEBHOOK_VAR, "https://hooks.slack.test/x"),
            ],
            || {
                let cfg = Config::from_env();
                assert_eq!(cfg.openrouter_api_key, "or-key");
                assert_eq!(cfg.default_days, 14);
                assert_eq!(cfg.max_diff_chars, 2000);
                assert_eq!(cfg.preferred_provider, ProviderPreference::Gemini);
                assert_eq!(cfg.gemini_model, "gemini-pro");
                assert_eq!(cfg.slack_webhook(), Some("https://hooks.slack.test/x"));
            },
        );
    }

    #[test]
    fn test_invalid_numbers_fall_back_to_defaults() {
        with_env(&[(DAYS_VAR, "a week"), (MAX_DIFF_VAR, "-5")], || {
            let cfg = Config::from_env();
            assert_eq!(cfg.default_days, DEFAULT_DAYS);
            assert_eq!(cfg.max_diff_chars, DEFAULT_MAX_DIFF_CHARS);
        });
    }

    #[test]
    fn test_unknown_provider_falls_back_to_auto() {
        with_env(&[(PROVIDER_VAR, "mystery")], || {
            assert_eq!(Config::from_env().preferred_provider, ProviderPreference::Auto);
        });
    }

    #[test]
    fn test_auto_prefers_openrouter() {
        let cfg = config("g", "o", ProviderPreference::Auto);
        assert_eq!(cfg.active_provider().unwrap(), Provider::OpenRouter);
    }

    #[test]
    fn test_auto_uses_gemini_when_only_key() {
        let cfg = config("g", "", ProviderPreference::Auto);
        assert_eq!(cfg.active_provider().unwrap(), Provider::Gemini);
    }

    #[test]
    fn test_explicit_preference_wins() {
        let cfg = config("g", "o", ProviderPreference::Gemini);
        assert_eq!(cfg.active_provider().unwrap(), Provider::Gemini);

        let cfg = config("g", "o", ProviderPreference::OpenRouter);
        assert_eq!(cfg.active_provider().unwrap(), Provider::OpenRouter);
    }

    #[test]
    fn test_explicit_preference_without_key_fails() {
        let cfg = config("", "o", ProviderPreference::Gemini);
        assert!(matches!(
            cfg.active_provider(),
            Err(ConfigError::NoProviderConfigured)
        ));
    }

    #[test]
    fn test_no_keys_fails_with_remediation() {
        let cfg = config("", "", ProviderPreference::Auto);
        let err = cfg.validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("OPENROUTER_API_KEY"));
        assert!(msg.contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_zero_budget_disables_truncation() {
        let cfg = Config {
            max_diff_chars: 0,
            ..Default::default()
        };
        assert_eq!(cfg.diff_budget(), None);
        assert_eq!(Config::default().diff_budget(), Some(DEFAULT_MAX_DIFF_CHARS));
    }
}
