//! Defaults for the command line, read from an optional `scidata.{toml,json,..}`
//! next to the working directory and from `SCIDATA_*` environment variables.

use std::collections::BTreeMap;
use std::path::PathBuf;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::extract::critical::TagMap;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// File patched when `--file` is not given.
    pub data_file: PathBuf,
    /// Constant name used to locate the region; braces when unset.
    pub anchor: Option<String>,
    /// Decimals kept for thermal conductivity.
    pub decimals: usize,
    /// Critical point source tag rewrites, e.g. `_141 = "_19"`.
    pub critical_tags: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_file: PathBuf::from("scientific_data.ts"),
            anchor: None,
            decimals: 5,
            critical_tags: BTreeMap::new(),
        }
    }
}

impl Settings {
    pub fn tag_map(&self) -> TagMap {
        if self.critical_tags.is_empty() {
            TagMap::default()
        } else {
            TagMap::new(self.critical_tags.clone().into_iter().collect())
        }
    }
}

pub fn load() -> Result<Settings, ConfigError> {
    build(
        Config::builder()
            .add_source(File::with_name("scidata").required(false))
            .add_source(Environment::with_prefix("SCIDATA").try_parsing(true)),
    )
}

fn build(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    builder.build()?.try_deserialize()
}
