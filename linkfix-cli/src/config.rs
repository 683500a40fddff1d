//! Configuration file loading for linkfix.
//!
//! Discovers and loads `linkfix.toml` from the scanned directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use linkfix_types::LinkRules;
use linkfix_types::rules::{DEFAULT_BUTTON_MARKER, DEFAULT_REDIRECT_PAGE, DEFAULT_TARGET_PAGE};
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "linkfix.toml";

/// Top-level configuration from linkfix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LinkfixConfig {
    /// Which page is retired and where buttons go instead.
    pub rules: RulesConfig,

    /// Which files are scanned.
    pub scan: ScanConfig,
}

/// Rules section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Page whose navigation entries are removed.
    pub target_page: String,

    /// Page that buttons linking to `target_page` are redirected to.
    pub redirect_page: String,

    /// Substring that identifies a button line.
    pub button_marker: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            target_page: DEFAULT_TARGET_PAGE.to_string(),
            redirect_page: DEFAULT_REDIRECT_PAGE.to_string(),
            button_marker: DEFAULT_BUTTON_MARKER.to_string(),
        }
    }
}

/// Scan section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extension (without the dot) of candidate files.
    pub extension: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: "html".to_string(),
        }
    }
}

/// Discover the linkfix.toml config file.
///
/// Returns `None` if `dir` has no config file.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a linkfix.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<LinkfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<LinkfixConfig> {
    let config: LinkfixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `dir`, or return default if not found.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<LinkfixConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(LinkfixConfig::default()),
    }
}

/// Settings for one run, after config file and CLI arguments are combined.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub rules: LinkRules,
    pub extension: String,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: LinkfixConfig,
}

impl ConfigMerger {
    /// Create a new merger from a loaded config.
    pub fn new(config: LinkfixConfig) -> Self {
        Self { config }
    }

    /// Merge with CLI arguments. A page given on the command line replaces the configured one.
    pub fn merge_args(
        self,
        cli_target: Option<&str>,
        cli_redirect: Option<&str>,
    ) -> anyhow::Result<MergedConfig> {
        let rules_cfg = self.config.rules;
        let target = cli_target.unwrap_or(rules_cfg.target_page.as_str());
        let redirect = cli_redirect.unwrap_or(rules_cfg.redirect_page.as_str());

        if target.is_empty() {
            anyhow::bail!("target page must not be empty");
        }
        if target == redirect {
            anyhow::bail!("target and redirect page are both '{}'", target);
        }
        if rules_cfg.button_marker.is_empty() {
            anyhow::bail!("button marker must not be empty");
        }
        let extension = self.config.scan.extension.trim_start_matches('.');
        if extension.is_empty() {
            anyhow::bail!("scan extension must not be empty");
        }

        Ok(MergedConfig {
            rules: LinkRules::for_pages(target, redirect)
                .with_button_marker(rules_cfg.button_marker),
            extension: extension.to_string(),
        })
    }
}
