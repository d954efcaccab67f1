//! Analyze command implementation.
//!
//! Parses a browser-history export and renders the full analytics
//! summary in the selected output format.

use crate::analytics::Aggregator;
use crate::categorize::CategoryTable;
use crate::cli::{AnalyzeArgs, Cli, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::model::AnalyticsSummary;
use crate::parser::HistoryParser;
use crate::util::{atomic_write, bar, format_count, sparkline};

use super::bucket_offset;

/// Run the analyze command.
pub fn run(cli: &Cli, config: &Config, args: &AnalyzeArgs) -> Result<()> {
    let max_file_size = cli.max_file_size.unwrap_or(config.analysis.max_file_size);
    let mut parser = HistoryParser::new().with_max_file_size(max_file_size);
    let events = parser.parse_file(&args.file)?;

    if cli.verbose && !cli.quiet {
        let stats = parser.stats();
        eprintln!(
            "Scanned {} entries ({} tier), extracted {} searches",
            stats.entries_scanned,
            stats.tier.unwrap_or("none"),
            stats.events_extracted
        );
    }

    let top_n = args.top.unwrap_or(config.analysis.top_searches);
    let aggregator = Aggregator::new(CategoryTable::default_taxonomy())
        .with_top_n(top_n)
        .with_offset(bucket_offset(args.utc));
    let summary = aggregator.aggregate(events)?;

    if let Some(out) = &args.out {
        let json = serde_json::to_vec_pretty(&summary)?;
        atomic_write(out, &json)?;
        if !cli.quiet {
            eprintln!("Summary written to {}", out.display());
        }
    }

    match cli.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Tsv => output_tsv(&summary),
        OutputFormat::Compact => output_compact(&summary),
        OutputFormat::Text => output_text(&summary, config),
    }

    Ok(())
}

fn output_tsv(summary: &AnalyticsSummary) {
    println!("metric\tvalue");
    println!("total_searches\t{}", summary.total_searches);
    println!("unique_queries\t{}", summary.unique_queries);
    println!(
        "date_range_start\t{}",
        summary.date_range.start.format("%Y-%m-%d")
    );
    println!(
        "date_range_end\t{}",
        summary.date_range.end.format("%Y-%m-%d")
    );
    if let Some(category) = summary.top_category() {
        println!("top_category\t{}", category.category);
    }
    if let Some(hour) = summary.busiest_hour() {
        println!("busiest_hour\t{}", hour.hour);
    }
    if let Some(day) = summary.busiest_day() {
        println!("busiest_day\t{}", day.day);
    }
    for ranked in &summary.top_searches {
        println!("query:{}\t{}", ranked.query, ranked.count);
    }
}

fn output_compact(summary: &AnalyticsSummary) {
    let top = summary
        .top_searches
        .first()
        .map(|q| q.query.as_str())
        .unwrap_or("-");
    let category = summary
        .top_category()
        .map(|c| c.category.as_str())
        .unwrap_or("-");
    println!(
        "searches:{} unique:{} top:{} category:{}",
        summary.total_searches, summary.unique_queries, top, category
    );
}

fn output_text(summary: &AnalyticsSummary, config: &Config) {
    println!("Search Wrapped");
    println!("==============");
    println!();
    println!("Total Searches: {}", format_count(summary.total_searches));
    println!("Unique Queries: {}", format_count(summary.unique_queries));
    println!(
        "Date Range:     {} to {}",
        summary.date_range.start.format("%Y-%m-%d"),
        summary.date_range.end.format("%Y-%m-%d")
    );
    println!();

    if !summary.top_searches.is_empty() {
        println!("Top Searches:");
        for (rank, ranked) in summary.top_searches.iter().enumerate() {
            println!(
                "  {:>2}. {} ({})",
                rank + 1,
                ranked.query,
                format_count(ranked.count)
            );
        }
        println!();
    }

    println!("Categories:");
    let max_count = summary.categories.first().map_or(0, |c| c.count);
    for category in &summary.categories {
        println!(
            "  {:<24} {:>7} ({:>5.1}%) {}",
            category.category,
            format_count(category.count),
            category.percentage,
            scaled_bar(category.count, max_count, 20, config)
        );
    }
    println!();

    println!("Hourly Activity:");
    let hourly: Vec<usize> = summary.time_distribution.iter().map(|h| h.count).collect();
    if config.display.unicode {
        println!("  {}", sparkline(&hourly));
        println!("  0           12          23");
    }
    if let Some(hour) = summary.busiest_hour() {
        println!(
            "  Busiest hour: {:02}:00 ({} searches)",
            hour.hour,
            format_count(hour.count)
        );
    }
    println!();

    println!("Weekday Activity:");
    let max_day = summary.day_distribution.iter().map(|d| d.count).max().unwrap_or(0);
    for day in &summary.day_distribution {
        println!(
            "  {:<10} {:>7} {}",
            day.day,
            format_count(day.count),
            scaled_bar(day.count, max_day, 20, config)
        );
    }
}

fn scaled_bar(value: usize, max: usize, width: usize, config: &Config) -> String {
    let rendered = bar(value, max, width);
    if config.display.unicode {
        rendered
    } else {
        "#".repeat(rendered.chars().count())
    }
}
