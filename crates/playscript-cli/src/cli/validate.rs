use playscript_core::{ValidationMode, Validator};
use std::path::Path;

use super::config::{ConfigFile, Settings};
use super::formatter::get_formatter;
use super::{Context, Opts};

fn describe_mode(mode: ValidationMode) -> &'static str {
    match mode {
        ValidationMode::Full => "syntax and cross-file",
        ValidationMode::SyntaxOnly => "syntax only",
        ValidationMode::CrossFileOnly => "cross-file only",
    }
}

/// Validate the project described by `opts` and print the report
///
/// Returns whether the run passed. Errors are reserved for runs that could
/// not start, such as an unreadable configuration file.
pub fn handle_validate_command(opts: &Opts, ctx: &Context) -> Result<bool, String> {
    let root = Path::new(&opts.playbook_dir);
    let config_file = ConfigFile::load(root, opts.config_path.as_deref().map(Path::new))
        .map_err(|e| e.to_string())?;
    let settings = Settings::resolve(opts, config_file).map_err(|e| e.to_string())?;

    let target = opts.target.as_deref().unwrap_or("all files");
    ctx.try_log(|logger| {
        info!(
            logger,
            "Validating {} in {} ({})",
            target,
            root.display(),
            describe_mode(settings.validator.mode)
        )
    });

    let report = Validator::new(settings.validator).run();

    ctx.try_log(|logger| {
        info!(
            logger,
            "Validated {} files: {} errors, {} warnings",
            report.summary.files_validated,
            report.result.error_count(),
            report.result.warning_count()
        )
    });

    print!("{}", get_formatter(settings.format).format(&report));
    Ok(report.is_success())
}
