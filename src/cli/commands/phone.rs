use anyhow::{Context, Result};
use clap::ArgMatches;

use rebrand::{normalize_to_e164, Region};

use crate::cli::CommandContext;

pub fn handle_normalize_phone(matches: &ArgMatches, ctx: &CommandContext) -> Result<()> {
    let phone = matches
        .get_one::<String>("phone")
        .context("phone argument is required")?;

    let region = match matches.get_one::<String>("region") {
        Some(region) => region.parse::<Region>()?,
        None => ctx.config.phone.region,
    };

    let normalized = normalize_to_e164(phone, region)
        .with_context(|| format!("Cannot normalize '{}' for region {}", phone, region))?;
    println!("{}", normalized);

    Ok(())
}
