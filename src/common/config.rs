use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_OVERSCAN_BYTES: usize = 64 * 1024; // 64 KB
const ENV_PREFIX: &str = "RANGELINE_";
const CONFIG_FILE: &str = "rangeline.toml";

/// Whitespace handling for each emitted line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimPolicy {
    /// Strip leading and trailing whitespace
    #[default]
    Both,
    /// Emit segments byte for byte
    Keep,
}

impl TrimPolicy {
    pub fn apply<'a>(&self, segment: &'a str) -> &'a str {
        match self {
            TrimPolicy::Both => segment.trim(),
            TrimPolicy::Keep => segment,
        }
    }
}

/// What to do with bytes that are not UTF-8
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodePolicy {
    /// Replace invalid sequences with U+FFFD
    #[default]
    Lossy,
    /// Fail the partition
    Strict,
}

/// How lines that straddle a window edge are attributed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Split the window exactly as read; edge lines come out partial
    #[default]
    Exact,
    /// A line belongs to the window holding its first byte
    LineAligned,
}

/// Config for partition reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    pub trim: TrimPolicy,
    pub decode: DecodePolicy,
    pub boundary: BoundaryPolicy,
    /// Step size when reading past the window end to finish a line
    pub overscan_bytes: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self::exact()
    }
}

impl ReaderConfig {
    pub fn exact() -> Self {
        Self {
            trim: TrimPolicy::Both,
            decode: DecodePolicy::Lossy,
            boundary: BoundaryPolicy::Exact,
            overscan_bytes: DEFAULT_OVERSCAN_BYTES,
        }
    }

    pub fn line_aligned() -> Self {
        Self {
            boundary: BoundaryPolicy::LineAligned,
            ..Self::exact()
        }
    }

    /// Layered load: defaults, user config dir, explicit file, then
    /// `RANGELINE_*` environment variables.
    pub fn load(explicit: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(ReaderConfig::default()));

        if let Some(dirs) = ProjectDirs::from("", "", "rangeline") {
            figment = figment.merge(Toml::file(dirs.config_dir().join(CONFIG_FILE)));
        }

        if let Some(path) = explicit {
            // Toml::file ignores missing files; an explicit one must exist
            if !path.is_file() {
                return Err(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX)).extract()
    }

    pub(crate) fn overscan_step(&self) -> usize {
        self.overscan_bytes.max(1)
    }
}
