//! Configuration update and merging.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::config_data::{Config, RetargetRule, WatchConfig};
use super::format::Format;

/// Partial configuration update that can be merged into a Config.
///
/// All fields are optional. Only specified fields will override the base config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigUpdate {
    /// Input glob patterns.
    #[serde(default)]
    pub files: Option<Vec<String>>,

    /// Output directory.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Asset base name.
    #[serde(default)]
    pub name: Option<String>,

    /// Output format.
    #[serde(default)]
    pub format: Option<Format>,

    /// Cleaned markdown reconstruction.
    #[serde(default)]
    pub clean: Option<bool>,

    /// Strip the README title in block bundles.
    #[serde(default)]
    pub strip_title: Option<bool>,

    /// Custom page template.
    #[serde(default)]
    pub template: Option<PathBuf>,

    /// Retarget rules, appended after the base rules.
    #[serde(default)]
    pub retarget: Option<Vec<RetargetRule>>,

    /// Watch configuration.
    #[serde(default)]
    pub watch: Option<WatchConfig>,
}

impl ConfigUpdate {
    /// Merges this update into a base configuration, returning a new Config.
    ///
    /// Consumes `self` so fields can be moved instead of cloned.
    pub fn merge_into(self, base: &Config) -> Config {
        Config {
            files: self.files.unwrap_or_else(|| base.files.clone()),
            output: self.output.or_else(|| base.output.clone()),
            name: self.name.or_else(|| base.name.clone()),
            format: self.format.unwrap_or(base.format),
            clean: self.clean.unwrap_or(base.clean),
            strip_title: self.strip_title.unwrap_or(base.strip_title),
            template: self.template.or_else(|| base.template.clone()),
            retarget: merge_retarget(&base.retarget, self.retarget.as_deref().unwrap_or(&[])),
            watch: self.watch.unwrap_or_else(|| base.watch.clone()),
        }
    }
}

/// Rules apply in order, so update rules run after the base rules.
fn merge_retarget(base: &[RetargetRule], update: &[RetargetRule]) -> Vec<RetargetRule> {
    let mut result = base.to_vec();
    result.extend(update.iter().cloned());
    result
}

impl From<ConfigUpdate> for Config {
    fn from(update: ConfigUpdate) -> Self {
        update.merge_into(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_update() {
        let base = Config::default();
        let merged = ConfigUpdate::default().merge_into(&base);

        assert_eq!(merged.format, base.format);
        assert_eq!(merged.files, base.files);
        assert_eq!(merged.clean, base.clean);
    }

    #[test]
    fn test_partial_update() {
        let base = Config {
            name: Some("base".to_string()),
            ..Default::default()
        };
        let update = ConfigUpdate {
            format: Some(Format::SplitHtml),
            ..Default::default()
        };
        let merged = update.merge_into(&base);

        assert_eq!(merged.format, Format::SplitHtml);
        assert_eq!(merged.name.as_deref(), Some("base"));
    }

    #[test]
    fn test_merge_retarget_order() {
        let base = vec![RetargetRule::new("a", "1")];
        let update = vec![RetargetRule::new("b", "2")];

        let merged = merge_retarget(&base, &update);
        assert_eq!(merged, vec![RetargetRule::new("a", "1"), RetargetRule::new("b", "2")]);
    }

    #[test]
    fn test_from_update() {
        let update = ConfigUpdate {
            clean: Some(false),
            ..Default::default()
        };
        let config: Config = update.into();

        assert!(!config.clean);
        assert_eq!(config.format, Format::InlineHtml);
    }
}
