use anyhow::{Context, Result};
use clap::ArgMatches;
use std::path::PathBuf;
use std::time::Instant;

use rebrand::{load_profile, update_manifests, ManifestReport, ManifestStatus, ReplacementResult, RewriteEngine, RuleGenerator};

use crate::cli::utils::{format_duration, pluralize};
use crate::cli::CommandContext;

pub fn handle_rewrite(matches: &ArgMatches, ctx: &CommandContext) -> Result<()> {
    let profile_path = matches
        .get_one::<PathBuf>("profile")
        .context("--profile is required")?;
    let preview = matches.get_flag("preview");
    let skip_manifests = matches.get_flag("skip-manifests");
    let verbose = matches.get_flag("verbose");

    let profile = load_profile(profile_path)
        .with_context(|| format!("Failed to load profile {}", profile_path.display()))?;

    println!("🔄 Rebranding {} as \"{}\"", ctx.root.display(), profile.business_name);
    if preview {
        println!("📋 PREVIEW MODE - No files will be modified");
    }

    let start_time = Instant::now();

    if !skip_manifests {
        let manifests = update_manifests(&ctx.root, &profile, preview);
        display_manifest_report(&manifests, verbose);
    }

    let rule_set = RuleGenerator::new(ctx.config.phone.region).generate(&profile);
    if verbose {
        println!("📐 Generated {}", pluralize("substitution rule", rule_set.len()));
    }

    let engine = RewriteEngine::new(&rule_set, ctx.config.scan.enumerator())?
        .with_preview_limits(ctx.config.preview.limits());
    let result = engine.rewrite_tree(&ctx.root, preview)?;

    display_rewrite_result(&result);
    println!("⏱️  Finished in {}", format_duration(start_time.elapsed()));

    Ok(())
}

fn display_manifest_report(report: &ManifestReport, verbose: bool) {
    for update in &report.updates {
        match &update.status {
            ManifestStatus::Updated if report.preview => println!("  📝 Would update {}", update.path.display()),
            ManifestStatus::Updated => println!("  ✓ Updated {}", update.path.display()),
            ManifestStatus::Failed(reason) => println!("  ⚠️  Could not update {}: {}", update.path.display(), reason),
            ManifestStatus::Unchanged if verbose => println!("  • {} already up to date", update.path.display()),
            ManifestStatus::Skipped if verbose => println!("  • {} not present, skipped", update.path.display()),
            _ => {}
        }
    }
}

fn display_rewrite_result(result: &ReplacementResult) {
    println!("🔍 Scanned {}", pluralize("file", result.files_scanned));

    for change in &result.changes {
        println!("  ✏️  {}: {}", change.path.display(), pluralize("replacement", change.replacements));
    }

    for preview in &result.previews {
        println!();
        print!("{}", preview.diff);
        if !preview.diff.ends_with('\n') {
            println!();
        }
    }

    for error in &result.errors {
        println!("  ⚠️  Error processing {}: {}", error.path.display(), error.message);
    }

    println!("\n📊 Summary:");
    println!("  Files touched: {}", result.files_touched);
    println!("  Total replacements: {}", result.total_replacements);
    println!("  Files skipped with errors: {}", result.errors.len());

    if result.preview {
        println!(
            "\n📋 PREVIEW: Would make {} in {}",
            pluralize("replacement", result.total_replacements),
            pluralize("file", result.files_touched)
        );
    } else {
        println!(
            "\n✅ Content replacement complete: {} in {}",
            pluralize("replacement", result.total_replacements),
            pluralize("file", result.files_touched)
        );
    }
}
