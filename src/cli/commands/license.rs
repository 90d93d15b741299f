use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use license_updater::{Config, License, LicenseSources, LicenseUpdater, UpdateSummary};

use crate::cli::utils::{display_relative, format_duration, pluralize};

/// Bind the `license` subcommand's flags onto `command`
pub fn license_command(command: Command) -> Command {
    command
        .about("Add license info to project")
        .long_about(
            "The license command will add a LICENSE file in the root of the project \
             as well as licensing text at the beginning of every source code file.",
        )
        .arg(
            Arg::new("project-license")
                .short('p')
                .long("project-license")
                .help("path to project license file")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("source-code-license")
                .short('s')
                .long("source-code-license")
                .help("path to file with source code license text")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .help("Summary output format")
                .value_parser(["plain", "json"])
                .default_value("plain"),
        )
}

pub fn sources_from_matches(matches: &ArgMatches) -> LicenseSources {
    LicenseSources {
        project_license: matches.get_one::<PathBuf>("project-license").cloned(),
        source_header: matches.get_one::<PathBuf>("source-code-license").cloned(),
    }
}

pub fn handle_license(matches: &ArgMatches, config: &Config) -> Result<()> {
    let root = std::env::current_dir()?;
    let stdout = std::io::stdout();
    license_in(matches, config, &root, &mut stdout.lock())?;
    Ok(())
}

/// Apply the licenses named in `matches` to `root`, reporting to `out`
pub fn license_in(
    matches: &ArgMatches,
    config: &Config,
    root: &Path,
    out: &mut impl Write,
) -> Result<UpdateSummary> {
    let sources = sources_from_matches(matches);
    let format = matches
        .get_one::<String>("format")
        .map(|s| s.as_str())
        .unwrap_or("plain");

    let license = License::load(&sources)?;
    let updater = LicenseUpdater::from_config(root, config);

    let start_time = Instant::now();
    let summary = updater.update(&license)?;
    let elapsed = start_time.elapsed();

    match format {
        "json" => writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?,
        _ => write_summary(out, &summary, root, !license.source_header().is_empty(), elapsed)?,
    }

    Ok(summary)
}

fn write_summary(
    out: &mut impl Write,
    summary: &UpdateSummary,
    root: &Path,
    headers_requested: bool,
    elapsed: std::time::Duration,
) -> std::io::Result<()> {
    if let Some(license_file) = &summary.license_file {
        writeln!(out, "✅ Wrote {}", display_relative(license_file, root))?;
    }

    if headers_requested {
        writeln!(
            out,
            "✅ Added license header to {} ({} existing replaced) in {}",
            pluralize("source file", summary.files_rewritten()),
            summary.headers_replaced,
            format_duration(elapsed)
        )?;
    }

    Ok(())
}
