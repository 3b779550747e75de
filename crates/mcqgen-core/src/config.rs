use crate::config_file::ConfigFile;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Resolved settings for the OpenAI-compatible generation engine.
#[derive(Clone)]
pub struct EngineConfig {
    pub api_key: Option<String>,
    pub model: String,
    /// Base URL without trailing `/chat/completions`.
    pub base_url: String,
    pub temperature: f32,
}

impl std::fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl EngineConfig {
    /// Resolve configuration: env vars > config file > defaults.
    ///
    /// CLI flags are applied on top by the caller.
    pub fn resolve(file: &ConfigFile, env: impl Fn(&str) -> Option<String>) -> Self {
        let engine = file.engine.clone().unwrap_or_default();
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        Self {
            api_key: non_empty(env("OPENAI_API_KEY")).or(non_empty(engine.api_key)),
            model: non_empty(env("OPENAI_MODEL"))
                .or(non_empty(engine.model))
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: non_empty(env("OPENAI_BASE_URL"))
                .or(non_empty(engine.base_url))
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            temperature: engine.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        }
    }

    /// [`resolve`](Self::resolve) against the process environment.
    pub fn from_env(file: &ConfigFile) -> Self {
        Self::resolve(file, |key| std::env::var(key).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_file::EngineSection;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = EngineConfig::resolve(&ConfigFile::default(), env_of(&[]));
        assert!(config.api_key.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn env_overrides_file() {
        let file = ConfigFile {
            engine: Some(EngineSection {
                api_key: Some("file-key".into()),
                model: Some("file-model".into()),
                base_url: None,
                temperature: Some(0.2),
            }),
            ..Default::default()
        };
        let config = EngineConfig::resolve(
            &file,
            env_of(&[("OPENAI_API_KEY", "env-key"), ("OPENAI_BASE_URL", "http://local")]),
        );
        assert_eq!(config.api_key.as_deref(), Some("env-key"));
        assert_eq!(config.model, "file-model");
        assert_eq!(config.base_url, "http://local");
        assert_eq!(config.temperature, 0.2);
    }

    #[test]
    fn empty_env_value_falls_through() {
        let file = ConfigFile {
            engine: Some(EngineSection {
                api_key: Some("file-key".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let config = EngineConfig::resolve(&file, env_of(&[("OPENAI_API_KEY", "  ")]));
        assert_eq!(config.api_key.as_deref(), Some("file-key"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = EngineConfig {
            api_key: Some("sk-secret".into()),
            ..Default::default()
        };
        let dbg = format!("{config:?}");
        assert!(!dbg.contains("sk-secret"));
        assert!(dbg.contains("***"));
    }
}
