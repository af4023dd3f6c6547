use anyhow::{Context, Result};
use clap::ArgMatches;
use std::path::PathBuf;

use rebrand::{load_profile, RuleGenerator};

use crate::cli::utils::pluralize;
use crate::cli::CommandContext;

/// Print the ordered substitution rules a profile produces
pub fn handle_rules(matches: &ArgMatches, ctx: &CommandContext) -> Result<()> {
    let profile_path = matches
        .get_one::<PathBuf>("profile")
        .context("--profile is required")?;
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");

    let profile = load_profile(profile_path)
        .with_context(|| format!("Failed to load profile {}", profile_path.display()))?;
    let rule_set = RuleGenerator::new(ctx.config.phone.region).generate(&profile);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&rule_set)?);
        return Ok(());
    }

    println!("📐 {} (applied in this order):", pluralize("substitution rule", rule_set.len()));
    for (index, rule) in rule_set.iter().enumerate() {
        println!("  {:>2}. [{:?}] {}", index + 1, rule.category, rule.name);
        println!("      {} → {}", rule.pattern, rule.replacement);
    }

    Ok(())
}
