use clap::{Arg, ArgAction, Command};
use dotenv::dotenv;
use rebrand::config::LoggingConfig;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::CommandContext;

fn main() {
    // Load environment variables from .env file
    dotenv().ok();

    let matches = build_cli().get_matches();

    if let Err(e) = run_command(matches) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn build_cli() -> Command {
    Command::new("rebrand")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rebrand a template app for a customer and verify no template defaults remain")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("rewrite")
                .about("Replace template defaults with the business profile's values")
                .long_about("Updates the app/package/build manifests, then rewrites every source, config and documentation file under the root.")
                .arg(
                    Arg::new("profile")
                        .short('p')
                        .long("profile")
                        .help("Business profile (YAML or JSON)")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                )
                .arg(
                    Arg::new("preview")
                        .long("preview")
                        .visible_alias("dry-run")
                        .help("Show what would change without writing")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("skip-manifests")
                        .long("skip-manifests")
                        .help("Leave app.json, package.json, eas.json and the theme untouched")
                        .action(ArgAction::SetTrue)
                )
                .arg(verbose_arg())
        )
        .subcommand(
            Command::new("check")
                .about("Scan for leftover template defaults and missing required files")
                .long_about("Exits with status 1 when any legacy value is found or a required file is missing.")
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .help("Output format")
                        .value_parser(["text", "json"])
                        .default_value("text")
                )
                .arg(verbose_arg())
        )
        .subcommand(
            Command::new("rules")
                .about("Print the substitution rules generated from a profile")
                .arg(
                    Arg::new("profile")
                        .short('p')
                        .long("profile")
                        .help("Business profile (YAML or JSON)")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                )
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .help("Output format")
                        .value_parser(["text", "json"])
                        .default_value("text")
                )
                .arg(verbose_arg())
        )
        .subcommand(
            Command::new("normalize-phone")
                .about("Print a phone number in E.164 form")
                .arg(
                    Arg::new("phone")
                        .help("Phone number in any separator style")
                        .required(true)
                        .index(1)
                )
                .arg(
                    Arg::new("region")
                        .long("region")
                        .help("Dialing region (defaults to the configured one)")
                        .value_parser(["IL", "OTHER", "il", "other"])
                )
                .arg(verbose_arg())
        )
        .arg(
            Arg::new("root")
                .long("root")
                .help("Project root directory (defaults to the current directory)")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Configuration file (defaults to <root>/rebrand.toml)")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
        )
}

fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help("Show detailed output")
        .action(ArgAction::SetTrue)
}

fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let default_level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Reports go to stdout; keep logs on stderr
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match logging.format.as_str() {
        "json" => builder.json().init(),
        "compact" => builder.compact().init(),
        _ => builder.pretty().init(),
    }
}

fn run_command(matches: clap::ArgMatches) -> anyhow::Result<()> {
    let Some((name, sub_matches)) = matches.subcommand() else {
        unreachable!("Command parsing should ensure we never reach this");
    };

    let ctx = CommandContext::from_matches(sub_matches)?;
    init_tracing(&ctx.config.logging, sub_matches.get_flag("verbose"));

    match name {
        "rewrite" => cli::commands::rewrite::handle_rewrite(sub_matches, &ctx)?,
        "check" => cli::commands::check::handle_check(sub_matches, &ctx)?,
        "rules" => cli::commands::rules::handle_rules(sub_matches, &ctx)?,
        "normalize-phone" => cli::commands::phone::handle_normalize_phone(sub_matches, &ctx)?,
        _ => unreachable!("Command parsing should ensure we never reach this"),
    }

    Ok(())
}
