use clap::Parser;
use hiro_system_kit::{self, Logger};
use std::process;

mod config;
mod errors;
mod formatter;
mod validate;

pub use formatter::Format;

/// Process exit status when errors were reported
pub const EXIT_VALIDATION_FAILED: i32 = 1;
/// Process exit status when the run could not start
pub const EXIT_USAGE: i32 = 2;

#[derive(Clone)]
pub struct Context {
    pub logger: Option<Logger>,
}

impl Context {
    pub fn try_log<F>(&self, closure: F)
    where
        F: FnOnce(&Logger),
    {
        if let Some(ref logger) = self.logger {
            closure(logger)
        }
    }
}

/// Validate PlayScript documents and their cross-file references
#[derive(Parser, PartialEq, Clone, Debug)]
#[clap(name = "playscript", author, version, about, long_about = None)]
pub struct Opts {
    /// File or directory to validate, relative to the playbook directory
    pub target: Option<String>,
    /// Only run single-document checks
    #[arg(long = "syntax-only", conflicts_with = "cross_file")]
    pub syntax_only: bool,
    /// Only report cross-file reference problems
    #[arg(long = "cross-file")]
    pub cross_file: bool,
    /// Root of the PlayScript project
    #[arg(long = "playbook-dir", short = 'd', default_value = ".")]
    pub playbook_dir: String,
    /// Output format (defaults to the configuration file value, then stylish)
    #[arg(long = "format", short = 'f', value_enum)]
    pub format: Option<Format>,
    /// Path to a configuration file (defaults to .playscript.yml in the playbook directory)
    #[arg(long = "config", short = 'c')]
    pub config_path: Option<String>,
}

pub fn main() {
    let logger = hiro_system_kit::log::setup_logger();
    let _guard = hiro_system_kit::log::setup_global_logger(logger.clone());
    let ctx = Context { logger: Some(logger) };

    let opts: Opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(e) => e.exit(),
    };

    match handle_command(opts, &ctx) {
        Ok(true) => {}
        Ok(false) => process::exit(EXIT_VALIDATION_FAILED),
        Err(e) => {
            ctx.try_log(|logger| error!(logger, "{e}"));
            eprintln!("{}", e);
            process::exit(EXIT_USAGE);
        }
    }
}

/// Returns whether the run passed; `Err` means it never started
fn handle_command(opts: Opts, ctx: &Context) -> Result<bool, String> {
    validate::handle_validate_command(&opts, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn parse_args(args: Vec<&str>) -> Opts {
        Opts::parse_from(args)
    }

    #[test]
    fn test_default_values() {
        let result = parse_args(vec!["playscript"]);
        assert_eq!(result.target, None);
        assert_eq!(result.syntax_only, false);
        assert_eq!(result.cross_file, false);
        assert_eq!(result.playbook_dir, ".");
        assert_eq!(result.format, None);
        assert_eq!(result.config_path, None);
    }

    #[test]
    fn test_target_and_mode() {
        let result = parse_args(vec!["playscript", "actions/", "--syntax-only"]);
        assert_eq!(result.target, Some(String::from("actions/")));
        assert!(result.syntax_only);
    }

    #[test_case("stylish", Format::Stylish)]
    #[test_case("compact", Format::Compact)]
    #[test_case("json", Format::Json)]
    #[test_case("quickfix", Format::Quickfix)]
    fn test_format_values(value: &str, expected: Format) {
        let result = parse_args(vec!["playscript", "--format", value]);
        assert_eq!(result.format, Some(expected));
    }

    #[test]
    fn test_playbook_dir_and_config() {
        let result = parse_args(vec![
            "playscript",
            "--playbook-dir",
            "crm",
            "--config",
            "ci/playscript.yml",
        ]);
        assert_eq!(result.playbook_dir, "crm");
        assert_eq!(result.config_path, Some(String::from("ci/playscript.yml")));
    }

    #[test_case("--syntax-only", "--cross-file")]
    #[test_case("--cross-file", "--syntax-only")]
    fn test_conflicting_arguments(arg1: &str, arg2: &str) {
        let err = Opts::try_parse_from(vec!["playscript", arg1, arg2]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let err = Opts::try_parse_from(vec!["playscript", "--format", "xml"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }
}
