use anyhow::Result;
use clap::ArgMatches;
use std::process;

use rebrand::{check_project, CheckReport, FileStatus};

use crate::cli::utils::{pluralize, title_case, truncate};
use crate::cli::CommandContext;

const MAX_LINE_CHARS: usize = 100;

pub fn handle_check(matches: &ArgMatches, ctx: &CommandContext) -> Result<()> {
    let verbose = matches.get_flag("verbose");
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");

    let report = check_project(&ctx.root, &ctx.config)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => display_check_report(&report, ctx.config.check.max_listed, verbose),
    }

    // Exit with appropriate code for scripted pipelines
    if report.passed() {
        Ok(())
    } else {
        process::exit(1);
    }
}

fn display_check_report(report: &CheckReport, max_listed: usize, verbose: bool) {
    println!("🧪 Post-Generation Checks");
    println!("{}", "=".repeat(50));

    println!("\n📁 File Structure:");
    for file in &report.file_status {
        let marker = match file.status {
            FileStatus::Exists => "✅ EXISTS",
            FileStatus::Missing => "❌ MISSING",
        };
        if verbose {
            println!("  {} {} ({})", marker, file.path.display(), file.description);
        } else {
            println!("  {} {}", marker, file.path.display());
        }
    }

    println!("\n🔍 Legacy Content Scan:");
    if report.findings.is_empty() {
        println!("  ✅ No legacy brand strings found!");
    } else {
        println!("  ❌ Found {}:", pluralize("legacy content issue", report.total_findings()));

        for group in &report.findings {
            println!("\n  📍 {} ({} matches):", title_case(&group.detector), group.findings.len());
            if verbose {
                println!("     {}", group.description);
            }

            let listed = if verbose { group.findings.len() } else { max_listed };
            for finding in group.findings.iter().take(listed) {
                println!(
                    "    {}:{} → {}",
                    finding.file_path.display(),
                    finding.line_number,
                    truncate(&finding.line_content, MAX_LINE_CHARS)
                );
            }

            if group.findings.len() > listed {
                println!("    ... and {} more", group.findings.len() - listed);
            }
        }
    }

    for error in &report.errors {
        println!("  ⚠️  Error checking {}: {}", error.path.display(), error.message);
    }

    println!("\n📊 Summary:");
    println!("  Files checked: {}", report.files_checked);
    println!("  Missing required files: {}", report.missing_files().len());
    println!("  Legacy content issues: {}", report.total_findings());

    if report.passed() {
        println!("\n✅ All checks passed - template is clean!");
    } else {
        println!("\n❌ Checks failed - please fix issues above");
    }
}
