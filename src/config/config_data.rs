//! Configuration data structures.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::format::Format;

/// Main configuration structure for Literally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Glob patterns for input documents, used when none are given on the command line.
    #[serde(default)]
    pub files: Vec<String>,

    /// Directory for compiled assets.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Asset base name. Defaults to the input file stem.
    #[serde(default)]
    pub name: Option<String>,

    /// Output format.
    #[serde(default)]
    pub format: Format,

    /// Collapse paragraph line breaks in reconstructed markdown.
    #[serde(default = "default_true")]
    pub clean: bool,

    /// Drop a leading title heading from the block-bundle README.
    #[serde(default = "default_true")]
    pub strip_title: bool,

    /// Custom page template, replacing the built-in one.
    #[serde(default)]
    pub template: Option<PathBuf>,

    /// Ordered regex substitutions applied to the raw markdown before parsing.
    #[serde(default)]
    pub retarget: Vec<RetargetRule>,

    /// Watch configuration.
    #[serde(default)]
    pub watch: WatchConfig,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            output: None,
            name: None,
            format: Format::default(),
            clean: true,
            strip_title: true,
            template: None,
            retarget: Vec::new(),
            watch: WatchConfig::default(),
        }
    }
}

impl Config {
    /// Returns the output directory, if configured.
    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    /// Returns the asset name for an input document.
    ///
    /// The configured name wins; otherwise the file stem of `input` is used.
    pub fn asset_name(&self, input: &Path) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "index".to_string()),
        }
    }
}

/// A `{rule, value}` substitution rewriting asset references for a deployment target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetargetRule {
    /// Regular expression to match.
    pub rule: String,
    /// Replacement text; `$1`-style group references are expanded.
    pub value: String,
}

impl RetargetRule {
    /// Creates a new rule.
    pub fn new(rule: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            value: value.into(),
        }
    }
}

/// Watch mode configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Compile continuously.
    #[serde(default)]
    pub enabled: bool,

    /// Debounce delay in milliseconds.
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,
}

fn default_debounce() -> u64 {
    100
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            debounce_ms: default_debounce(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.files.is_empty());
        assert_eq!(config.format, Format::InlineHtml);
        assert!(config.clean);
        assert!(config.strip_title);
        assert_eq!(config.watch.debounce_ms, 100);
    }

    #[test]
    fn test_asset_name() {
        let mut config = Config::default();
        assert_eq!(config.asset_name(Path::new("docs/example.md")), "example");

        config.name = Some("bundle".to_string());
        assert_eq!(config.asset_name(Path::new("docs/example.md")), "bundle");
    }

    #[test]
    fn test_parse_retarget_rules() {
        let config: Config = toml::from_str(
            r#"
format = "blocks"

[[retarget]]
rule = "\\.\\./node_modules/"
value = "https://cdn.jsdelivr.net/npm/"
"#,
        )
        .unwrap();

        assert_eq!(config.format, Format::BlockBundle);
        assert_eq!(config.retarget.len(), 1);
        assert_eq!(config.retarget[0].rule, r"\.\./node_modules/");
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.format, config.format);
        assert_eq!(parsed.clean, config.clean);
    }
}
