//! Hook settings file.
//!
//! Optional TOML file with per-project defaults for scan options. Looked up
//! as `./.pre-commit-trivy.toml`, then `~/.pre-commit-trivy/config.toml`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::Error;
use crate::scanner::{OutputFormat, ScannerKind, Severity};

/// Project-level settings file name.
pub const PROJECT_FILE: &str = ".pre-commit-trivy.toml";

/// Hook settings. Every field is optional; unset fields fall back to
/// command-line values or built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Scanner binary name or path.
    pub binary: Option<String>,

    pub severity: Option<Vec<Severity>>,

    pub format: Option<OutputFormat>,

    pub exit_code: Option<i32>,

    pub scanners: Option<Vec<ScannerKind>>,

    /// Path to Trivy's own `trivy.yaml`.
    pub config: Option<PathBuf>,

    pub skip_db_update: bool,

    pub timeout: Option<String>,

    pub ignore_unfixed: bool,

    pub ignorefile: Option<PathBuf>,

    pub dependency_tree: bool,

    /// Scan target.
    pub path: Option<PathBuf>,

    /// Extra Trivy arguments, forwarded ahead of command-line ones.
    pub args: Vec<String>,
}

impl Settings {
    /// Path to the global settings file (~/.pre-commit-trivy/config.toml).
    pub fn global_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".pre-commit-trivy").join("config.toml"))
    }

    /// Path to the project settings file.
    pub fn project_path(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_FILE)
    }

    /// Load settings from an explicit file, which must exist.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.is_file() {
            return Err(Error::SettingsNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content).map_err(|e| Error::SettingsParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        settings.validate()?;
        debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Find and load the first settings file that exists.
    ///
    /// Returns defaults when there is none.
    pub fn discover(project_root: &Path) -> Result<Self, Error> {
        let candidates = std::iter::once(Self::project_path(project_root)).chain(Self::global_path());
        for path in candidates {
            if path.is_file() {
                return Self::load(&path);
            }
        }
        debug!("No settings file found");
        Ok(Self::default())
    }

    fn validate(&self) -> Result<(), Error> {
        if let Some(code) = self.exit_code {
            if !(0..=255).contains(&code) {
                return Err(Error::InvalidSettings(format!(
                    "exit_code must be between 0 and 255, got {}",
                    code
                )));
            }
        }
        if matches!(&self.severity, Some(list) if list.is_empty()) {
            return Err(Error::InvalidSettings("severity must not be empty".to_string()));
        }
        if matches!(&self.scanners, Some(list) if list.is_empty()) {
            return Err(Error::InvalidSettings("scanners must not be empty".to_string()));
        }
        if matches!(&self.binary, Some(binary) if binary.trim().is_empty()) {
            return Err(Error::InvalidSettings("binary must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.binary.is_none());
        assert!(settings.severity.is_none());
        assert!(!settings.skip_db_update);
        assert!(settings.args.is_empty());
    }

    #[test]
    fn test_load_full_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PROJECT_FILE);
        fs::write(
            &path,
            r#"
binary = "/opt/trivy/bin/trivy"
severity = ["MEDIUM", "HIGH", "CRITICAL"]
format = "sarif"
exit_code = 3
scanners = ["vuln", "secret"]
config = "trivy.yaml"
skip_db_update = true
timeout = "10m"
ignore_unfixed = true
ignorefile = ".trivyignore"
dependency_tree = true
path = "services"
args = ["--quiet"]
"#,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.binary.as_deref(), Some("/opt/trivy/bin/trivy"));
        assert_eq!(
            settings.severity,
            Some(vec![Severity::Medium, Severity::High, Severity::Critical])
        );
        assert_eq!(settings.format, Some(OutputFormat::Sarif));
        assert_eq!(settings.exit_code, Some(3));
        assert_eq!(
            settings.scanners,
            Some(vec![ScannerKind::Vuln, ScannerKind::Secret])
        );
        assert_eq!(settings.config, Some(PathBuf::from("trivy.yaml")));
        assert!(settings.skip_db_update);
        assert_eq!(settings.timeout.as_deref(), Some("10m"));
        assert!(settings.ignore_unfixed);
        assert_eq!(settings.ignorefile, Some(PathBuf::from(".trivyignore")));
        assert!(settings.dependency_tree);
        assert_eq!(settings.path, Some(PathBuf::from("services")));
        assert_eq!(settings.args, vec!["--quiet"]);
    }

    #[test]
    fn test_values_ignore_case() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PROJECT_FILE);
        fs::write(
            &path,
            "severity = [\"high\", \"Critical\"]\nformat = \"JSON\"\nscanners = [\"Vuln\", \"SECRET\"]\n",
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.severity, Some(vec![Severity::High, Severity::Critical]));
        assert_eq!(settings.format, Some(OutputFormat::Json));
        assert_eq!(
            settings.scanners,
            Some(vec![ScannerKind::Vuln, ScannerKind::Secret])
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PROJECT_FILE);
        fs::write(&path, "severty = [\"LOW\"]\n").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, Error::SettingsParse { .. }));
    }

    #[test]
    fn test_bad_severity_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PROJECT_FILE);
        fs::write(&path, "severity = [\"SEVERE\"]\n").unwrap();

        assert!(matches!(
            Settings::load(&path),
            Err(Error::SettingsParse { .. })
        ));
    }

    #[test]
    fn test_exit_code_out_of_range() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PROJECT_FILE);
        fs::write(&path, "exit_code = 300\n").unwrap();

        assert!(matches!(
            Settings::load(&path),
            Err(Error::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        let err = Settings::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, Error::SettingsNotFound(_)));
    }

    #[test]
    fn test_discover_project_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PROJECT_FILE), "skip_db_update = true\n").unwrap();

        let settings = Settings::discover(dir.path()).unwrap();
        assert!(settings.skip_db_update);
    }
}
