use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Property holding the comma-separated list of table roots to plan.
pub const INPUT_PATHS_KEY: &str = "floe.input.paths";

/// Job-level configuration handed to planning and to every reader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobContext {
    pub job_id: String,
    pub properties: BTreeMap<String, String>,
}

impl JobContext {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self { job_id: job_id.into(), properties: BTreeMap::new() }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn input_paths(&self) -> Vec<PathBuf> {
        self.get(INPUT_PATHS_KEY)
            .map(|paths| {
                paths.split(',').map(str::trim).filter(|p| !p.is_empty()).map(PathBuf::from).collect()
            })
            .unwrap_or_default()
    }

    pub fn set_input_paths<P: AsRef<Path>>(&mut self, paths: &[P]) {
        let joined = paths.iter().map(|p| p.as_ref().display().to_string()).collect::<Vec<_>>().join(",");
        self.set(INPUT_PATHS_KEY, joined);
    }
}
