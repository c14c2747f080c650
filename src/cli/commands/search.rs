use crate::config::Config;
use crate::models::drug::SummaryText;
use crate::services::SearchOutcome;
use crate::state::SharedState;

fn print_section(title: &str, text: &SummaryText) {
    println!("{title}:");
    match text {
        SummaryText::Text(s) => println!("  {s}"),
        SummaryText::List(items) => {
            for item in items {
                println!("  • {item}");
            }
        }
    }
    println!();
}

pub async fn cmd_search(config: Config, query: &str) -> anyhow::Result<()> {
    println!("Searching for: {query}");

    let state = SharedState::new(config).await?;
    let outcome = state.drug_search.search(query).await?;

    let cached = matches!(outcome, SearchOutcome::CacheHit(_));
    let Some(summary) = outcome.into_summary() else {
        println!("No drugs found matching '{query}'");
        return Ok(());
    };

    println!();
    println!("{} ({})", summary.brand_name, summary.generic_name);
    println!("{:-<60}", "");
    println!(
        "Source: {}{} | Class: {}",
        summary.source,
        if cached { " [cached]" } else { "" },
        summary.pharmacologic_class
    );
    if !summary.brand_names_list.is_empty() {
        println!("Brands: {}", summary.brand_names_list.join(", "));
    }
    println!();

    print_section("Purpose", &summary.purpose);
    print_section("Dosage", &summary.dosage);
    print_section("Side effects", &summary.side_effects);
    print_section("Warnings", &summary.warnings);
    print_section("Interactions", &summary.interactions);
    if let Some(storage) = &summary.storage {
        println!("Storage:\n  {storage}");
    }

    Ok(())
}
