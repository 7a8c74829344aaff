use std::fs;
use std::path::{Path, PathBuf};

use playscript_core::{validate_project, ValidationMode, ValidationReport, ValidatorConfig};
use tempfile::TempDir;

/// Collects documents and writes them into a temporary project directory
#[derive(Debug, Default, Clone)]
pub struct ProjectBuilder {
    files: Vec<(PathBuf, String)>,
}

impl ProjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with raw content at a path relative to the project root
    pub fn file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.files.push((path.as_ref().to_path_buf(), content.into()));
        self
    }

    /// A complete, valid action
    pub fn action(self, name: &str, implementation: &str) -> Self {
        let content = format!(
            "type: action\nname: {name}\ndescription: \"{name} action\"\nimplementation: {implementation}\n"
        );
        self.file(format!("actions/{name}.ps"), content)
    }

    /// A complete, valid schema with plain string fields
    pub fn schema(self, object: &str, fields: &[&str]) -> Self {
        let mut content =
            format!("type: schema\nobject: {object}\ndescription: \"{object} records\"\nfields:\n");
        for field in fields {
            content.push_str(&format!("  - name: {field}\n    type: string\n"));
        }
        self.file(format!("schemas/{object}.ps"), content)
    }

    /// A complete, valid integration
    pub fn integration(self, name: &str, service: &str) -> Self {
        let content = format!(
            "type: integration\nname: {name}\nservice: {service}\ndescription: \"{name} integration\"\n"
        );
        self.file(format!("integrations/{name}.ps"), content)
    }

    /// A manual automation invoking `action_ref`
    pub fn automation(self, name: &str, action_ref: &str) -> Self {
        let content = format!(
            "type: automation\nname: {name}\ndescription: \"{name} automation\"\ntrigger:\n  type: manual\naction:\n  ref: {action_ref}\n"
        );
        self.file(format!("automations/{name}.ps"), content)
    }

    /// A layout with one field section listing `fields`
    pub fn layout(self, name: &str, fields: &[&str]) -> Self {
        let mut content = format!(
            "type: layout\nname: {name}\ncomponents:\n  - type: field_section\n    fields:\n"
        );
        for field in fields {
            content.push_str(&format!("      - {field}\n"));
        }
        self.file(format!("layouts/{name}.ps"), content)
    }

    /// Write every collected file into a fresh temporary directory
    pub fn build(self) -> TestProject {
        let dir = tempfile::tempdir().expect("unable to create temporary project");
        for (path, content) in &self.files {
            let destination = dir.path().join(path);
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent).expect("unable to create project directory");
            }
            fs::write(&destination, content).expect("unable to write project file");
        }
        TestProject { dir }
    }
}

/// A project living in a temporary directory, removed on drop
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn config(&self) -> ValidatorConfig {
        ValidatorConfig::new(self.root())
    }

    pub fn validate(&self) -> ValidationReport {
        self.validate_with(ValidationMode::Full)
    }

    pub fn validate_with(&self, mode: ValidationMode) -> ValidationReport {
        validate_project(self.config().with_mode(mode))
    }

    pub fn validate_target(
        &self,
        target: impl AsRef<Path>,
        mode: ValidationMode,
    ) -> ValidationReport {
        validate_project(self.config().with_target(target.as_ref()).with_mode(mode))
    }
}
