//! Configuration file support
//!
//! A project may carry a `.playscript.yml` (or `.playscript.yaml`) at its
//! root. Values given on the command line always win over the file.

use glob::Pattern;
use playscript_core::{ValidationMode, ValidatorConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::errors::CliError;
use super::formatter::Format;
use super::Opts;

pub const CONFIG_FILE_NAMES: &[&str] = &[".playscript.yml", ".playscript.yaml"];

/// Configuration file structure (.playscript.yml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Document extension, with or without the leading dot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,

    /// Glob patterns, relative to the project root, skipped during discovery
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Default output format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
}

impl ConfigFile {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)
            .map_err(|source| CliError::ConfigRead { path: path.to_path_buf(), source })?;
        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, CliError> {
        // An empty file is a valid, empty configuration
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(content)
            .map_err(|source| CliError::ConfigParse { path: path.to_path_buf(), source })
    }

    /// First default configuration file present under `root`
    pub fn find_default(root: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES.iter().map(|name| root.join(name)).find(|path| path.is_file())
    }

    /// Load the explicit file if given, else the default one, else defaults
    pub fn load(root: &Path, config_path: Option<&Path>) -> Result<Self, CliError> {
        match config_path.map(Path::to_path_buf).or_else(|| Self::find_default(root)) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn ignore_patterns(&self) -> Result<Vec<Pattern>, CliError> {
        self.ignore
            .iter()
            .map(|pattern| {
                Pattern::new(pattern)
                    .map_err(|source| CliError::IgnorePattern { pattern: pattern.clone(), source })
            })
            .collect()
    }
}

/// Everything a run needs once flags and file have been merged
#[derive(Debug, Clone)]
pub struct Settings {
    pub validator: ValidatorConfig,
    pub format: Format,
}

impl Settings {
    pub fn resolve(opts: &Opts, file: ConfigFile) -> Result<Self, CliError> {
        let mut validator = ValidatorConfig::new(&opts.playbook_dir)
            .with_mode(ValidationMode::from_flags(opts.syntax_only, opts.cross_file))
            .with_ignore(file.ignore_patterns()?);
        if let Some(extension) = &file.extension {
            validator = validator.with_extension(extension.as_str());
        }
        if let Some(target) = &opts.target {
            validator = validator.with_target(target);
        }

        let format = opts.format.or(file.format).unwrap_or_default();
        Ok(Settings { validator, format })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn opts(args: &[&str]) -> Opts {
        let mut argv = vec!["playscript"];
        argv.extend_from_slice(args);
        Opts::parse_from(argv)
    }

    #[test]
    fn test_parse_config_file() {
        let config = ConfigFile::parse(
            Path::new(".playscript.yml"),
            "extension: .play\nignore:\n  - generated/**\nformat: json\n",
        )
        .unwrap();
        assert_eq!(config.extension.as_deref(), Some(".play"));
        assert_eq!(config.ignore, vec!["generated/**"]);
        assert_eq!(config.format, Some(Format::Json));
    }

    #[test]
    fn test_empty_config_file() {
        let config = ConfigFile::parse(Path::new(".playscript.yml"), "\n").unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = ConfigFile::parse(Path::new(".playscript.yml"), "rules: {}\n").unwrap_err();
        assert!(matches!(err, CliError::ConfigParse { .. }));
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let err = ConfigFile::load(Path::new("."), Some(Path::new("/nonexistent/.playscript.yml")))
            .unwrap_err();
        assert!(matches!(err, CliError::ConfigRead { .. }));
        assert!(err
            .to_string()
            .starts_with("Failed to read config file /nonexistent/.playscript.yml"));
    }

    #[test]
    fn test_no_config_means_defaults() {
        let config = ConfigFile::load(Path::new("/nonexistent-playscript-root"), None).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_invalid_ignore_pattern() {
        let config = ConfigFile { ignore: vec!["[".to_string()], ..Default::default() };
        let err = config.ignore_patterns().unwrap_err();
        assert!(matches!(err, CliError::IgnorePattern { .. }));
    }

    #[test]
    fn test_flags_override_file() {
        let file = ConfigFile {
            extension: Some("play".to_string()),
            ignore: vec!["generated".to_string()],
            format: Some(Format::Json),
        };
        let settings =
            Settings::resolve(&opts(&["schemas", "--format", "compact", "--cross-file"]), file)
                .unwrap();
        assert_eq!(settings.format, Format::Compact);
        assert_eq!(settings.validator.extension, "play");
        assert_eq!(settings.validator.mode, ValidationMode::CrossFileOnly);
        assert_eq!(settings.validator.target, Some(PathBuf::from("schemas")));
        assert_eq!(settings.validator.ignore.len(), 1);
    }

    #[test]
    fn test_file_format_used_without_flag() {
        let file = ConfigFile { format: Some(Format::Quickfix), ..Default::default() };
        let settings = Settings::resolve(&opts(&[]), file).unwrap();
        assert_eq!(settings.format, Format::Quickfix);
        assert_eq!(settings.validator.extension, "ps");
        assert_eq!(settings.validator.root, PathBuf::from("."));
    }

    #[test]
    fn test_default_format_is_stylish() {
        let settings = Settings::resolve(&opts(&[]), ConfigFile::default()).unwrap();
        assert_eq!(settings.format, Format::Stylish);
        assert_eq!(settings.validator.mode, ValidationMode::Full);
    }
}
