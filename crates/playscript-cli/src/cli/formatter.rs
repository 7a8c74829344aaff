//! Output formatting for validation reports

use playscript_core::{Diagnostic, Severity, ValidationReport};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Grouped human readable report with a summary
    #[default]
    Stylish,
    /// One `file:line:col: severity: message [category]` line per diagnostic
    Compact,
    /// Machine readable report for CI
    Json,
    /// Vim quickfix compatible lines
    Quickfix,
}

pub trait OutputFormatter {
    fn format(&self, report: &ValidationReport) -> String;
}

pub fn get_formatter(format: Format) -> Box<dyn OutputFormatter> {
    match format {
        Format::Stylish => Box::new(StylishFormatter),
        Format::Compact => Box::new(CompactFormatter),
        Format::Json => Box::new(JsonFormatter),
        Format::Quickfix => Box::new(QuickfixFormatter),
    }
}

struct StylishFormatter;

impl StylishFormatter {
    fn push_diagnostic(out: &mut String, diagnostic: &Diagnostic) {
        let bullet = match diagnostic.severity {
            Severity::Error => red!("•"),
            Severity::Warning => yellow!("•"),
        };
        out.push_str(&format!(
            "  {} {}: {} {}\n",
            bullet,
            format_location(file_name(&diagnostic.file), diagnostic.line),
            diagnostic.message,
            dimmed!("[{}]", diagnostic.category)
        ));
    }
}

impl OutputFormatter for StylishFormatter {
    fn format(&self, report: &ValidationReport) -> String {
        let result = &report.result;
        let mut out = String::new();

        if !result.errors.is_empty() {
            let count = pluralize!(result.error_count(), "error");
            out.push_str(&format!("{}\n", red!("✗ {} found:", count)));
            for error in &result.errors {
                Self::push_diagnostic(&mut out, error);
            }
        }

        if !result.warnings.is_empty() {
            let count = pluralize!(result.warning_count(), "warning");
            out.push_str(&format!("{}\n", yellow!("⚠ {}:", count)));
            for warning in &result.warnings {
                Self::push_diagnostic(&mut out, warning);
            }
        }

        if result.is_empty() {
            out.push_str(&format!("{}\n", green!("✓ All files are valid!")));
        } else if !result.has_errors() {
            out.push_str(&format!("{}\n", green!("✓ No errors found (warnings only)")));
        }

        let summary = &report.summary;
        out.push('\n');
        out.push_str(&format!("{}\n", bold!("Summary:")));
        out.push_str(&format!("  Files validated: {}\n", summary.files_validated));
        out.push_str(&format!("  Schemas found: {}\n", summary.schemas));
        out.push_str(&format!("  Actions found: {}\n", summary.actions));
        out.push_str(&format!("  Integrations found: {}\n", summary.integrations));
        out
    }
}

struct CompactFormatter;

impl OutputFormatter for CompactFormatter {
    fn format(&self, report: &ValidationReport) -> String {
        report
            .result
            .iter()
            .map(|d| {
                format!(
                    "{}:{}:1: {}: {} [{}]\n",
                    d.file,
                    d.line.unwrap_or(1),
                    d.severity,
                    d.message,
                    d.category
                )
            })
            .collect()
    }
}

struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &ValidationReport) -> String {
        let output = serde_json::json!({
            "errors": report.result.errors,
            "warnings": report.result.warnings,
            "summary": report.summary,
            "success": report.is_success(),
        });

        let json = serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string());
        format!("{json}\n")
    }
}

struct QuickfixFormatter;

impl OutputFormatter for QuickfixFormatter {
    fn format(&self, report: &ValidationReport) -> String {
        report
            .result
            .iter()
            .map(|d| {
                let kind = match d.severity {
                    Severity::Error => "E",
                    Severity::Warning => "W",
                };
                format!(
                    "{}:{}:1: {}: {} [{}]\n",
                    d.file,
                    d.line.unwrap_or(1),
                    kind,
                    d.message,
                    d.category
                )
            })
            .collect()
    }
}

/// Last path component, or the whole string when there is none
fn file_name(file: &str) -> &str {
    Path::new(file).file_name().and_then(|name| name.to_str()).unwrap_or(file)
}

fn format_location(file: &str, line: Option<usize>) -> String {
    match line {
        Some(l) => format!("{}:{}", file, l),
        None => file.to_string(),
    }
}
