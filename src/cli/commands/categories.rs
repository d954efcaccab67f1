//! Categories command implementation.
//!
//! Prints the active category taxonomy in declaration order, which is
//! also the match-priority order.

use crate::categorize::{CategoryTable, OTHER_CATEGORY};
use crate::cli::{CategoriesArgs, Cli, OutputFormat};
use crate::error::Result;

/// Run the categories command.
pub fn run(cli: &Cli, _args: &CategoriesArgs) -> Result<()> {
    let table = CategoryTable::default_taxonomy();

    match cli.output {
        OutputFormat::Json => {
            let rules: Vec<serde_json::Value> = table
                .rules()
                .iter()
                .map(|rule| {
                    serde_json::json!({
                        "label": rule.label,
                        "keywords": rule.keywords,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rules)?);
        }
        OutputFormat::Tsv => {
            println!("category\tkeywords");
            for rule in table.rules() {
                println!("{}\t{}", rule.label, rule.keywords.join(","));
            }
        }
        OutputFormat::Compact => {
            let labels: Vec<&str> = table.rules().iter().map(|r| r.label.as_str()).collect();
            println!("{}", labels.join(","));
        }
        OutputFormat::Text => {
            println!("Category Taxonomy (match priority order)");
            println!("========================================");
            println!();
            for (position, rule) in table.rules().iter().enumerate() {
                println!("{:>2}. {}", position + 1, rule.label);
                println!("    {}", rule.keywords.join(", "));
            }
            println!();
            println!("Unmatched queries fall back to \"{OTHER_CATEGORY}\".");
        }
    }

    Ok(())
}
