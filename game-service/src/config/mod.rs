use crate::services::providers::gemini::GEMINI_API_BASE;
use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;

/// Default Gemini model used for game generation.
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_OUTPUT_TOKENS: i32 = 8192;

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    pub api_base: String,
    /// Model name, e.g. `gemini-3-flash-preview`.
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: i32,
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    /// Directory holding one `<uuid>.html` file per generated game.
    pub games_dir: PathBuf,
    /// Directory holding the landing page (`index.html`).
    pub static_dir: PathBuf,
}

impl GameConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = core_config::is_production();

        Self::from_lookup(common_config, is_prod, |key| env::var(key).ok())
    }

    /// Builds the service settings from an arbitrary key lookup.
    pub fn from_lookup<F>(
        common: core_config::Config,
        is_prod: bool,
        lookup: F,
    ) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: Option<&str>| {
            core_config::resolve(key, lookup(key), default, is_prod)
        };

        let api_key = get("GEMINI_API_KEY", None)?;
        if api_key.trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "GEMINI_API_KEY is required but empty"
            )));
        }

        let default_temperature = DEFAULT_TEMPERATURE.to_string();
        let default_max_tokens = DEFAULT_MAX_OUTPUT_TOKENS.to_string();

        Ok(GameConfig {
            common,
            gemini: GeminiSettings {
                api_key: Secret::new(api_key),
                api_base: get("GEMINI_API_BASE", Some(GEMINI_API_BASE))?,
                model: get("GEMINI_MODEL", Some(DEFAULT_MODEL))?,
                temperature: parse_setting(
                    "GEMINI_TEMPERATURE",
                    &get("GEMINI_TEMPERATURE", Some(default_temperature.as_str()))?,
                )?,
                max_output_tokens: parse_setting(
                    "GEMINI_MAX_OUTPUT_TOKENS",
                    &get("GEMINI_MAX_OUTPUT_TOKENS", Some(default_max_tokens.as_str()))?,
                )?,
            },
            // Relative to the working directory. The defaults fit a run from
            // `game-service/`; from the workspace root set both (see `.env.example`).
            storage: StorageSettings {
                games_dir: get("GAMES_DIR", Some("games"))?.into(),
                static_dir: get("STATIC_DIR", Some("static"))?.into(),
            },
        })
    }
}

fn parse_setting<T>(key: &str, raw: &str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| {
        AppError::ConfigError(anyhow::anyhow!("{} has an invalid value '{}': {}", key, raw, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn common() -> core_config::Config {
        core_config::Config { port: 0 }
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_api_key_is_set() {
        let config =
            GameConfig::from_lookup(common(), false, lookup(&[("GEMINI_API_KEY", "k")])).unwrap();

        assert_eq!(config.gemini.api_key.expose_secret(), "k");
        assert_eq!(config.gemini.api_base, GEMINI_API_BASE);
        assert_eq!(config.gemini.model, DEFAULT_MODEL);
        assert_eq!(config.gemini.temperature, 0.7);
        assert_eq!(config.gemini.max_output_tokens, 8192);
        assert_eq!(config.storage.games_dir, PathBuf::from("games"));
        assert_eq!(config.storage.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn missing_api_key_is_fatal() {
        let err = GameConfig::from_lookup(common(), false, lookup(&[])).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn blank_api_key_is_fatal() {
        let result = GameConfig::from_lookup(common(), false, lookup(&[("GEMINI_API_KEY", "  ")]));
        assert!(result.is_err());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = GameConfig::from_lookup(
            common(),
            false,
            lookup(&[
                ("GEMINI_API_KEY", "k"),
                ("GEMINI_MODEL", "gemini-2.0-flash"),
                ("GEMINI_TEMPERATURE", "0.2"),
                ("GEMINI_MAX_OUTPUT_TOKENS", "4096"),
                ("GAMES_DIR", "/var/lib/games"),
            ]),
        )
        .unwrap();

        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.gemini.temperature, 0.2);
        assert_eq!(config.gemini.max_output_tokens, 4096);
        assert_eq!(config.storage.games_dir, PathBuf::from("/var/lib/games"));
    }

    #[test]
    fn invalid_number_is_rejected() {
        let result = GameConfig::from_lookup(
            common(),
            false,
            lookup(&[("GEMINI_API_KEY", "k"), ("GEMINI_TEMPERATURE", "warm")]),
        );
        assert!(result.is_err());
    }
}
