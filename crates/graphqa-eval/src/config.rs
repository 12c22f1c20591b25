//! Configuration for the evaluation harness.

use serde::Deserialize;

/// Loaded from the `[eval]` section of `graphqa.toml` or
/// `GRAPHQA__EVAL__*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct EvalConfig {
    /// CSV with `Question` and `Baseline answer` columns.
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,

    /// Where to write per-question records; overridden by `--output`.
    #[serde(default)]
    pub output_path: Option<String>,
}

fn default_dataset_path() -> String {
    "QA/CDKGQA.csv".to_string()
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            output_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EvalConfig::default();
        assert_eq!(config.dataset_path, "QA/CDKGQA.csv");
        assert!(config.output_path.is_none());
    }
}
