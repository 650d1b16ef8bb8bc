use crate::cli::config::{AppConfig, Cli, build_merge_options};
use crate::error::MergeError;
use crate::merge::aggregate::run_merge;
use crate::merge::options::resolve_options;
use crate::report::console::format_console_summary;
use crate::report::renderer::build_renderer;

// ============================================================================
// merge command
// ============================================================================

/// Merge the reports and write the snapshot and rendered document.
///
/// With an explicit `--report-dir` the output location is announced on
/// stdout; otherwise the rendered document itself goes to stdout.
pub fn cmd_merge(cli: &Cli, config: &AppConfig) -> Result<(), MergeError> {
    let options = resolve_options(build_merge_options(cli, config));

    if cli.verbose > 0 {
        eprintln!(
            "Merging {} pattern(s) into {}...",
            options.files.len(),
            options.report_dir.display()
        );
    }

    let renderer = build_renderer(options.format);
    let output = run_merge(&options, renderer.as_ref())?;

    if !cli.quiet {
        eprint!("{}", format_console_summary(&output.aggregate));
    }

    if cli.report_dir.is_some() {
        let path = options.report_dir.join(renderer.file_name());
        println!("Reports merged to {}", path.display());
    } else {
        print!("{}", output.document);
    }

    Ok(())
}
