//! Example: capture an intent and print ranked recommendations
//!
//! ```bash
//! cargo run --example recommend -- notebook 3000-5000 office,programming "16GB RAM"
//! cargo run --example recommend -- --json desktop 0-1500 office
//! ```
//!
//! Reads `config.toml` when present and the demo catalog under `demos/`.

use purchase_intent_engine::prelude::*;
use purchase_intent_engine::metrics::METRICS;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let config = if Path::new("config.toml").exists() {
        Config::from_file("config.toml")?
    } else {
        Config::default().from_env()
    };
    config.validate()?;
    init_tracing(&config.logging)?;

    let (flags, positional): (Vec<String>, Vec<String>) =
        std::env::args().skip(1).partition(|arg| arg.starts_with("--"));
    let as_json = flags.iter().any(|flag| flag == "--json");
    let mut args = positional.into_iter();
    let category = args.next().unwrap_or_else(|| "notebook".to_string());
    let budget = args.next().unwrap_or_else(|| "3000-5000".to_string());
    let usages = args.next().unwrap_or_else(|| "office,programming".to_string());
    let specs = args.next().unwrap_or_default();

    // Walk the four steps
    let mut capture = IntentCapture::new()
        .select_category(&category)?
        .select_budget(&budget)?;
    for usage in usages.split(',').filter(|u| !u.trim().is_empty()) {
        capture = capture.toggle_usage(usage)?;
    }
    let capture = capture.confirm_usages()?.set_specs(&specs)?.complete()?;
    let intent = capture
        .intent()
        .ok_or_else(|| anyhow::anyhow!("intent capture did not complete"))?;

    let catalog_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/catalog.json");
    let catalog = Catalog::from_json_file(&catalog_path)?;

    let engine = ScoringEngine::from_config(&config.scoring)?;
    let pipeline = RankingPipeline::new(engine, config.ranking.clone());
    let cache = RecommendationCache::new(&config.cache);

    let results = cache.get_or_rank(&pipeline, intent, &catalog, config.ranking.default_sort);
    let page = results.page(0, None, &config.ranking);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    println!(
        "{} match(es) for {} / {} ({} outside budget, {} other category)",
        page.total_items,
        intent.category(),
        intent.budget_range().label(),
        results.excluded_by_budget,
        results.excluded_by_category
    );

    for (rank, item) in page.items.iter().enumerate() {
        let discount = item
            .product
            .discount_percent()
            .map(|d| format!(" (-{}%)", d))
            .unwrap_or_default();
        println!(
            "\n#{} {} | R$ {:.2}{} | score {} ({:?})",
            rank + 1,
            item.product.name,
            item.price(),
            discount,
            item.aggregate_score,
            item.grade
        );
        for (usage, score) in item.compatibility.iter() {
            if intent.usages().contains(usage) {
                println!("   {:<14} {:>3}", usage.as_str(), score);
            }
        }
        if !item.strengths.is_empty() {
            println!("   + {}", item.strengths.join(", "));
        }
        if !item.weaknesses.is_empty() {
            println!("   - {}", item.weaknesses.join(", "));
        }
        for warning in &item.warnings {
            println!("   ! {}", warning);
        }
        for unmet in &item.unmet_requirements {
            println!("   ? {}", unmet);
        }
    }

    if std::env::var("SHOW_METRICS").is_ok() {
        println!("\n{}", METRICS.gather_text());
    }

    Ok(())
}
