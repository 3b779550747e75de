use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Difficulty, QuestionCount};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub engine: Option<EngineSection>,
    pub defaults: Option<DefaultsSection>,
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct EngineSection {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
}

impl std::fmt::Debug for EngineSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineSection")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsSection {
    pub num: Option<i64>,
    pub difficulty: Option<String>,
}

impl ConfigFile {
    /// Default question count, clamped into range.
    pub fn default_num(&self) -> QuestionCount {
        self.defaults
            .as_ref()
            .and_then(|d| d.num)
            .map(QuestionCount::clamped)
            .unwrap_or_default()
    }

    /// Default difficulty; unparseable labels fall back to Easy.
    pub fn default_difficulty(&self) -> Difficulty {
        self.defaults
            .as_ref()
            .and_then(|d| d.difficulty.as_deref())
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

/// Platform config directory path: `<config_dir>/mcqgen/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mcqgen").join("config.toml"))
}

/// Load config by cascading CWD `.mcqgen.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".mcqgen.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let be = base.engine.unwrap_or_default();
    let oe = overlay.engine.unwrap_or_default();
    let bd = base.defaults.unwrap_or_default();
    let od = overlay.defaults.unwrap_or_default();

    ConfigFile {
        engine: Some(EngineSection {
            api_key: oe.api_key.or(be.api_key),
            model: oe.model.or(be.model),
            base_url: oe.base_url.or(be.base_url),
            temperature: oe.temperature.or(be.temperature),
        }),
        defaults: Some(DefaultsSection {
            num: od.num.or(bd.num),
            difficulty: od.difficulty.or(bd.difficulty),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_parses() {
        let toml_str = "[engine]\nmodel = \"gpt-4o\"\n";
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        let engine = parsed.engine.unwrap();
        assert_eq!(engine.model.as_deref(), Some("gpt-4o"));
        assert!(engine.api_key.is_none());
        assert!(parsed.defaults.is_none());
    }

    #[test]
    fn merge_overlay_wins() {
        let base = ConfigFile {
            engine: Some(EngineSection {
                model: Some("base-model".into()),
                api_key: Some("base-key".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let overlay = ConfigFile {
            engine: Some(EngineSection {
                model: Some("overlay-model".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, overlay);
        let engine = merged.engine.unwrap();
        assert_eq!(engine.model.as_deref(), Some("overlay-model"));
        assert_eq!(engine.api_key.as_deref(), Some("base-key"));
    }

    #[test]
    fn defaults_are_clamped_and_parsed() {
        let toml_str = "[defaults]\nnum = 42\ndifficulty = \"hard\"\n";
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        assert_eq!(parsed.default_num().get(), 10);
        assert_eq!(parsed.default_difficulty(), Difficulty::Hard);

        let empty = ConfigFile::default();
        assert_eq!(empty.default_num().get(), 1);
        assert_eq!(empty.default_difficulty(), Difficulty::Easy);
    }

    #[test]
    fn load_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[defaults]\nnum = 3\n").unwrap();

        let loaded = load_from_path(&path).unwrap();
        assert_eq!(loaded.default_num().get(), 3);

        std::fs::write(&path, "not = [valid").unwrap();
        assert!(load_from_path(&path).is_none());

        assert!(load_from_path(&dir.path().join("absent.toml")).is_none());
    }
}
