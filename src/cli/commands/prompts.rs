//! Prompts command implementation.
//!
//! Parses a ChatGPT conversations export and renders the year-in-review
//! prompt report.

use crate::categorize::CategoryTable;
use crate::cli::{Cli, OutputFormat, PromptsArgs};
use crate::config::Config;
use crate::error::Result;
use crate::prompts::{parse_conversations, PromptAnalyzer, PromptReport};
use crate::util::{atomic_write, format_count, read_file_capped, sparkline};

use super::bucket_offset;

/// Run the prompts command.
pub fn run(cli: &Cli, config: &Config, args: &PromptsArgs) -> Result<()> {
    let max_file_size = cli.max_file_size.unwrap_or(config.analysis.max_file_size);
    let raw = read_file_capped(&args.file, max_file_size)?;
    let prompts = parse_conversations(&raw)?;

    if cli.verbose && !cli.quiet {
        eprintln!("Extracted {} user prompts", prompts.len());
    }

    let mut analyzer = PromptAnalyzer::new(CategoryTable::default_taxonomy())
        .with_offset(bucket_offset(args.utc))
        .with_top_prompts(config.analysis.top_prompts)
        .with_top_keywords(config.analysis.top_keywords);
    if let Some(year) = args.year {
        analyzer = analyzer.with_year(year);
    }
    let report = analyzer.analyze(&prompts)?;

    if let Some(out) = &args.out {
        let json = serde_json::to_vec_pretty(&report)?;
        atomic_write(out, &json)?;
        if !cli.quiet {
            eprintln!("Report written to {}", out.display());
        }
    }

    match cli.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Tsv => output_tsv(&report),
        OutputFormat::Compact => output_compact(&report),
        OutputFormat::Text => output_text(&report, config),
    }

    Ok(())
}

fn output_tsv(report: &PromptReport) {
    println!("metric\tvalue");
    println!("target_year\t{}", report.target_year);
    println!("total_prompts\t{}", report.total_prompts);
    println!("unique_keywords\t{}", report.unique_keywords);
    println!("top_topic\t{}", report.top_topic);
    println!("top_topic_percentage\t{}", report.top_topic_percentage);
    println!("chronotype\t{}", report.chronotype);
    println!("mbti\t{}", report.mbti);
    for keyword in &report.top_keywords {
        println!("keyword:{}\t{}", keyword.keyword, keyword.count);
    }
}

fn output_compact(report: &PromptReport) {
    println!(
        "year:{} prompts:{} topic:{} mbti:{} {}",
        report.target_year,
        report.total_prompts,
        report.top_topic,
        report.mbti,
        report.chronotype.to_lowercase().replace(' ', "-")
    );
}

fn output_text(report: &PromptReport, config: &Config) {
    println!("ChatGPT Wrapped ({})", report.target_year);
    println!("=======================");
    println!();
    println!("Prompts:         {}", format_count(report.total_prompts));
    println!("Unique Keywords: {}", format_count(report.unique_keywords));
    println!(
        "Top Topic:       {} ({}%)",
        report.top_topic, report.top_topic_percentage
    );
    println!("Personality:     {}", report.mbti);
    println!("Chronotype:      {}", report.chronotype);
    println!();

    if !report.top_prompts.is_empty() {
        println!("Top Prompts:");
        for (rank, prompt) in report.top_prompts.iter().enumerate() {
            println!("  {:>2}. {}", rank + 1, truncated(prompt, 70));
        }
        println!();
    }

    if !report.top_keywords.is_empty() {
        println!("Top Keywords:");
        for keyword in &report.top_keywords {
            println!(
                "  {:<20} {:>6}",
                keyword.keyword,
                format_count(keyword.count)
            );
        }
        println!();
    }

    if config.display.unicode {
        println!("Monthly Activity:");
        let monthly: Vec<usize> = report.months.iter().map(|m| m.count).collect();
        println!("  {}", sparkline(&monthly));
        println!("  Jan       Dec");
        println!();

        println!("Hourly Activity:");
        let hourly: Vec<usize> = report.hours.iter().map(|h| h.count).collect();
        println!("  {}", sparkline(&hourly));
        println!("  0           12          23");
    }
}

/// Truncate long prompt text for display, character-aware.
fn truncated(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let prefix: String = text.chars().take(max_chars).collect();
        format!("{prefix}...")
    }
}
