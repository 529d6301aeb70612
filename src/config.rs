//! Compiler configuration

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{DialectError, DialectResult};
use crate::version::EngineVersion;

/// How the CLI prints compiled statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DialectConfig {
    /// Engine version to compile for when no server is asked, either a
    /// vendor string (`LI-V2.5.9.27139 Firebird 2.5`) or `major.minor.patch`
    pub engine_version: Option<String>,

    /// Output format
    pub output: OutputFormat,
}

impl DialectConfig {
    /// Create a new configuration builder
    pub fn builder() -> DialectConfigBuilder {
        DialectConfigBuilder::default()
    }

    /// `<config dir>/firebird-dialect/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("firebird-dialect").join("config.toml"))
    }

    /// Parse TOML configuration text.
    pub fn from_toml(text: &str) -> DialectResult<Self> {
        toml::from_str(text).map_err(|e| DialectError::Config(e.to_string()))
    }

    /// Load from an explicit file.
    pub fn load_from(path: &Path) -> DialectResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| DialectError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&text)
    }

    /// Load from `path` if given, otherwise from the default location.
    /// A missing default file means defaults.
    pub fn load(path: Option<&Path>) -> DialectResult<Self> {
        if let Some(path) = path {
            return Self::load_from(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// The configured engine version, parsed.
    pub fn engine_version(&self) -> DialectResult<Option<EngineVersion>> {
        self.engine_version
            .as_deref()
            .map(str::parse::<EngineVersion>)
            .transpose()
    }
}

/// Builder for DialectConfig
#[derive(Debug, Default)]
pub struct DialectConfigBuilder {
    config: DialectConfig,
}

impl DialectConfigBuilder {
    /// Set the engine version
    pub fn engine_version(mut self, version: impl Into<String>) -> Self {
        self.config.engine_version = Some(version.into());
        self
    }

    /// Set the output format
    pub fn output(mut self, format: OutputFormat) -> Self {
        self.config.output = format;
        self
    }

    /// Build the configuration
    pub fn build(self) -> DialectConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DialectConfig::default();
        assert_eq!(config.engine_version, None);
        assert_eq!(config.output, OutputFormat::Text);
        assert_eq!(config.engine_version().unwrap(), None);
    }

    #[test]
    fn test_builder() {
        let config = DialectConfig::builder()
            .engine_version("2.5.9")
            .output(OutputFormat::Json)
            .build();
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(
            config.engine_version().unwrap(),
            Some(EngineVersion::new(2, 5, 9))
        );
    }

    #[test]
    fn test_from_toml() {
        let config = DialectConfig::from_toml(
            r#"
engine_version = "LI-V4.0.1.2692 Firebird 4.0"
output = "json"
"#,
        )
        .unwrap();
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(
            config.engine_version().unwrap(),
            Some(EngineVersion::new(4, 0, 1))
        );
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = DialectConfig::from_toml("engine_version = \"3.0.0\"").unwrap();
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            DialectConfig::from_toml("output = \"yaml\""),
            Err(DialectError::Config(_))
        ));
    }

    #[test]
    fn test_bad_version_is_reported() {
        let config = DialectConfig::builder().engine_version("soon").build();
        assert!(matches!(
            config.engine_version(),
            Err(DialectError::VersionUnparseable { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "engine_version = \"2.5.9\"").unwrap();
        let config = DialectConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.engine_version.as_deref(), Some("2.5.9"));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            DialectConfig::load(Some(&missing)),
            Err(DialectError::Config(_))
        ));
    }
}
