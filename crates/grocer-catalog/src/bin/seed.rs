//! # Demo Catalog Generator
//!
//! Fills a catalog database with demo items for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./catalog.db
//! cargo run -p grocer-catalog --bin seed
//!
//! # Specify the database path
//! cargo run -p grocer-catalog --bin seed -- --db ./data/catalog.db
//!
//! # Import a JSON snapshot instead of the demo items, then export a copy
//! cargo run -p grocer-catalog --bin seed -- --snapshot ./prices.json --export ./out.json
//! ```
//!
//! ## Generated Items
//! - Beers from every discount country plus one without a pack rebate
//! - Breads baked today, 3 days ago and 5 days ago, so each freshness band
//!   is represented on the day the database is seeded
//! - Vegetables at different prices per 100 g

use std::env;
use std::path::PathBuf;

use chrono::{Duration, Local};
use grocer_catalog::migrations::migration_status;
use grocer_catalog::{BeerDraft, BreadDraft, Catalog, CatalogConfig, VegetableDraft};
use grocer_core::{Country, Money};

/// (name, origin, price in cents)
const BEERS: &[(&str, &str, i64)] = &[
    ("Duvel", "BELGIUM", 500),
    ("Westmalle Tripel", "BELGIUM", 450),
    ("Heineken", "NETHERLANDS", 400),
    ("Grolsch", "NETHERLANDS", 380),
    ("Paulaner", "GERMANY", 420),
    ("Guinness", "IRELAND", 450),
];

/// (name, days since baking, price in cents)
const BREADS: &[(&str, i64, i64)] = &[
    ("Baguette", 0, 250),
    ("White Bread", 3, 500),
    ("Rye Bread", 5, 700),
];

/// (name, price per 100 g in cents)
const VEGETABLES: &[(&str, i64)] = &[
    ("Broccoli", 150),
    ("Carrot", 100),
    ("Tomato", 220),
    ("Potato", 50),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = PathBuf::from("./catalog.db");
    let mut snapshot: Option<PathBuf> = None;
    let mut export: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--snapshot" | "-s" => {
                if i + 1 < args.len() {
                    snapshot = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--export" | "-e" => {
                if i + 1 < args.len() {
                    export = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Grocer Demo Catalog Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>        Database file path (default: ./catalog.db)");
                println!("  -s, --snapshot <PATH>  Import a JSON snapshot instead of demo items");
                println!("  -e, --export <PATH>    Write the seeded catalog to a JSON snapshot");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Grocer Demo Catalog Generator");
    println!("================================");
    println!("Database: {}", db_path.display());
    println!();

    let catalog = Catalog::open(CatalogConfig::new(&db_path)).await?;

    let (total, applied) = migration_status(catalog.pool()).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied ({}/{})", applied, total);

    let existing = catalog.item_count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        catalog.close().await;
        return Ok(());
    }

    println!();
    match &snapshot {
        Some(path) => {
            println!("Importing {}...", path.display());
            let added = catalog.import(path).await?;
            println!("  Imported {} items", added);
        }
        None => {
            println!("Generating demo items...");
            seed_demo_items(&catalog).await?;
        }
    }

    println!();
    println!("✓ {} beers", catalog.beers().count().await?);
    println!("✓ {} breads", catalog.breads().count().await?);
    println!("✓ {} vegetables", catalog.vegetables().count().await?);

    if let Some(path) = &export {
        catalog.export(path).await?;
        println!("✓ Exported to {}", path.display());
    }

    catalog.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

async fn seed_demo_items(catalog: &Catalog) -> Result<(), Box<dyn std::error::Error>> {
    let today = Local::now().date_naive();

    for (name, country, cents) in BEERS {
        let draft = BeerDraft::new(*name, Country::from(*country), Money::from_cents(*cents));
        if let Err(e) = catalog.beers().insert(draft).await {
            eprintln!("Failed to insert {}: {}", name, e);
        }
    }

    for (name, days_ago, cents) in BREADS {
        let draft =
            BreadDraft::new(*name, today - Duration::days(*days_ago), Money::from_cents(*cents));
        catalog.breads().insert_on(draft, today).await?;
    }

    for (name, cents) in VEGETABLES {
        catalog
            .vegetables()
            .insert(VegetableDraft::new(*name, Money::from_cents(*cents)))
            .await?;
    }

    Ok(())
}
