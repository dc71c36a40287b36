use serde::Deserialize;
use std::path::PathBuf;

use crate::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,
    #[serde(default = "default_hidden_prefixes")]
    pub hidden_prefixes: Vec<String>,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_store_dir() -> PathBuf {
    PathBuf::from("./floe-store")
}

fn default_hidden_prefixes() -> Vec<String> {
    vec!["_".to_string(), ".".to_string()]
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            hidden_prefixes: default_hidden_prefixes(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Loads settings from `FLOE_CONFIG_PATH` (if set) and `FLOE__*` environment variables.
    pub fn new() -> Result<Self> {
        let config_file_path = std::env::var("FLOE_CONFIG_PATH").ok();
        Self::load(config_file_path.as_deref())
    }

    /// Loads settings from an explicit file. The file is optional when `path` is `None`.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::with_name(path).required(true));
        }
        let s = builder
            .add_source(
                ::config::Environment::with_prefix("FLOE")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("hidden_prefixes")
                    .try_parsing(true),
            )
            .build()?;
        Ok(s.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_hide_underscore_and_dot_files() {
        let settings = Settings::default();
        assert_eq!(settings.hidden_prefixes, vec!["_", "."]);
        assert_eq!(settings.store_dir, PathBuf::from("./floe-store"));
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn load_reads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("floe.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "store_dir = \"/var/lib/floe\"").unwrap();
        writeln!(file, "hidden_prefixes = [\"_\"]").unwrap();
        drop(file);

        let settings = Settings::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(settings.store_dir, PathBuf::from("/var/lib/floe"));
        assert_eq!(settings.hidden_prefixes, vec!["_"]);
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn load_fails_for_missing_file() {
        let result = Settings::load(Some("/definitely/not/here/floe.toml"));
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }
}
