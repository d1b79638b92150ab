use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Read when present and no `--config` is given.
pub(crate) const DEFAULT_CONFIG: &str = "rs8080-lister.toml";

#[derive(Deserialize, Default, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub(crate) input: Option<PathBuf>,
    pub(crate) output: Option<PathBuf>,
    pub(crate) listing: ListingOptions,
}

/// Per-line decoration. The decoded text itself never changes.
#[derive(Deserialize, Default, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ListingOptions {
    /// prefix each line with the offset of its opcode
    pub(crate) addresses: bool,
    /// prefix each line with the raw instruction bytes
    pub(crate) bytes: bool,
    /// leave undocumented opcodes unmapped
    pub(crate) documented_only: bool,
}

impl ListingOptions {
    pub(crate) fn decorated(&self) -> bool {
        self.addresses || self.bytes
    }
}

pub(crate) fn load_config(path: &Path) -> Result<Config> {
    let mut file = File::open(path)
        .with_context(|| format!("cannot open config '{}'", path.display()))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    let config = parse_config(&contents)
        .with_context(|| format!("err in '{}'", path.display()))?;
    Ok(config)
}

pub(crate) fn parse_config(contents: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(contents)
}
