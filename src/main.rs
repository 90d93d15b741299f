use clap::{Arg, ArgMatches, Command};
use dotenv::dotenv;
use license_updater::{logging, Config};
use std::path::PathBuf;
use std::process;

mod cli;

fn main() {
    // Load environment variables from .env file
    dotenv().ok();

    let matches = build_cli().get_matches();

    if let Err(e) = run_command(matches) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn build_cli() -> Command {
    Command::new("license-updater")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Add license info to a generated project")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .subcommand(cli::commands::license::license_command(Command::new("license")))
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a license-updater.toml file")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<Config> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

fn run_command(matches: ArgMatches) -> anyhow::Result<()> {
    let config = load_config(&matches)?;
    logging::init_tracing(&config.logging, matches.get_flag("verbose"))?;

    match matches.subcommand() {
        Some(("license", sub_matches)) => {
            cli::commands::license::handle_license(sub_matches, &config)?
        }
        Some((name, _)) => anyhow::bail!("Unknown command: {}", name),
        None => anyhow::bail!("No command given, see --help"),
    }

    Ok(())
}
