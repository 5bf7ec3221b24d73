use std::sync::Arc;

use anyhow::Result;
use catalog_core::{
    hero_slides, load_settings, CatalogBrowser, HttpCatalogSource, PriceRange, QueryContext,
    SortKey,
};
use clap::Parser;
use tracing::warn;

/// Terminal front end for the catalog core: fetches one listing, applies
/// the requested filter and sort, and prints the snapshot.
#[derive(Parser, Debug)]
struct Args {
    /// Catalog API base url, e.g. http://localhost:5000/api
    #[arg(long)]
    api_url: Option<String>,
    /// Category slug to browse; omit for the featured strip.
    #[arg(long)]
    category: Option<String>,
    /// How many featured products to request.
    #[arg(long, default_value_t = 8)]
    limit: u32,
    #[arg(long)]
    min_price: Option<f64>,
    #[arg(long)]
    max_price: Option<f64>,
    /// One of: default, price-low, price-high, name.
    #[arg(long, default_value = "default")]
    sort: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }

    let source = Arc::new(HttpCatalogSource::from_settings(&settings)?);
    let browser = CatalogBrowser::new(source);

    let sort_key = match args.sort.as_str() {
        "price-low" => SortKey::PriceLowToHigh,
        "price-high" => SortKey::PriceHighToLow,
        "name" => SortKey::NameAscending,
        _ => SortKey::Default,
    };
    browser.set_sort_key(sort_key).await;

    let price_range = match (args.min_price, args.max_price) {
        (Some(min), Some(max)) => PriceRange::Between { min, max },
        (Some(min), None) => PriceRange::AtLeast { min },
        (None, Some(max)) => PriceRange::Between { min: 0.0, max },
        (None, None) => PriceRange::All,
    };
    browser.set_price_range(price_range).await;

    let context = match args.category {
        Some(slug) => QueryContext::Category { slug },
        None => QueryContext::Featured { limit: args.limit },
    };
    browser.set_context(context).await;

    let snapshot = browser.snapshot().await;
    println!(
        "{} — {}",
        snapshot.category_info.name, snapshot.category_info.description
    );
    println!("{} products found", snapshot.items.len());
    for product in &snapshot.items {
        println!("  [{:>5}] {:>10.2}  {}", product.id.0, product.price, product.title);
    }

    match browser.sections().await {
        Ok(sections) => {
            println!("\nSections:");
            for section in sections {
                println!("  {} ({})", section.name, section.slug);
            }
        }
        Err(err) => warn!(error = %err, "failed to list sections"),
    }

    println!("\nHero slides:");
    for slide in hero_slides() {
        println!("  [{}] {} — {}", slide.badge, slide.title, slide.cta);
    }

    Ok(())
}
