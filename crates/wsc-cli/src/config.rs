use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::args::CliArgs;
use wsc_checker::{CheckOptions, Whitelist, WhitelistRule};
use wsc_common::Severity;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = ".swift-weak-self-check.yml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub report_type: Option<Severity>,
    #[serde(default, alias = "slent")]
    pub silent: Option<bool>,
    #[serde(default)]
    pub white_list: Vec<WhiteListEntry>,
    #[serde(default)]
    pub excluded_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhiteListEntry {
    #[serde(default)]
    pub parent_pattern: Option<String>,
    pub function_name: String,
}

/// Settings for a run after merging flags, the config file and defaults.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub options: CheckOptions,
    pub silent: bool,
    pub excluded: FileFilter,
    /// The config file that was read, if any
    pub config_path: Option<PathBuf>,
}

pub fn parse_config(source: &str) -> Result<Config> {
    // A document with no content is null, not an empty mapping.
    let blank = source.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    });
    if blank {
        return Ok(Config::default());
    }
    let config = serde_yaml::from_str(source).context("failed to parse config YAML")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Locate and load the config file.
///
/// An explicit path must exist. The default file is optional.
pub fn find_config(explicit: Option<&Path>, cwd: &Path) -> Result<Option<(PathBuf, Config)>> {
    if let Some(path) = explicit {
        let path = cwd.join(path);
        let config = load_config(&path)?;
        return Ok(Some((path, config)));
    }

    let path = cwd.join(DEFAULT_CONFIG_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    let config = load_config(&path)?;
    Ok(Some((path, config)))
}

/// Merge command line flags over the config file over built-in defaults.
pub fn resolve_config(args: &CliArgs, cwd: &Path) -> Result<ResolvedConfig> {
    let (config_path, config) = match find_config(args.config.as_deref(), cwd)? {
        Some((path, config)) => (Some(path), config),
        None => (None, Config::default()),
    };

    let severity = args
        .report_type
        .map(Severity::from)
        .or(config.report_type)
        .unwrap_or_default();
    let silent = args.silent || config.silent.unwrap_or(false);

    Ok(ResolvedConfig {
        options: CheckOptions {
            severity,
            whitelist: build_whitelist(&config.white_list)?,
        },
        silent,
        excluded: FileFilter::new(&config.excluded_files)?,
        config_path,
    })
}

/// Compile every whitelist entry; the first invalid pattern fails the run.
pub fn build_whitelist(entries: &[WhiteListEntry]) -> Result<Whitelist> {
    let rules = entries
        .iter()
        .map(|entry| {
            WhitelistRule::new(entry.parent_pattern.as_deref(), &entry.function_name)
                .context("invalid whiteList entry")
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Whitelist::new(rules))
}

/// Excluded-file globs. `*` also matches path separators.
#[derive(Debug, Clone)]
pub struct FileFilter {
    set: GlobSet,
    patterns: Vec<String>,
}

impl Default for FileFilter {
    fn default() -> Self {
        FileFilter {
            set: GlobSet::empty(),
            patterns: Vec::new(),
        }
    }
}

impl FileFilter {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(false)
                .build()
                .with_context(|| format!("invalid excludedFiles pattern '{pattern}'"))?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .context("failed to compile excludedFiles patterns")?;
        Ok(FileFilter {
            set,
            patterns: patterns.to_vec(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Match `path` as given, and relative to `base`.
    pub fn is_excluded(&self, path: &Path, base: &Path) -> bool {
        if self.is_empty() {
            return false;
        }
        self.set.is_match(path)
            || path
                .strip_prefix(base)
                .is_ok_and(|relative| self.set.is_match(relative))
    }
}
