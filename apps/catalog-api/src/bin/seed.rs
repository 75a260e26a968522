//! Replace the catalog with the bundled sample products.
//!
//! Usage: `seed [path/to/products.json]`. Without an argument the sample
//! catalog compiled into the binary is used.

use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use database::mongodb::{connect_from_config, database_for, MongoConfig};
use domain_products::{format_price, MongoProductRepository, NewProduct, Product};
use eyre::WrapErr;
use tracing::info;
use validator::Validate;

const SAMPLE_PRODUCTS: &str = include_str!("../../data/sample_products.json");

/// Parse and validate every record; the first invalid one aborts the load.
fn load_products(raw: &str) -> eyre::Result<Vec<Product>> {
    let records: Vec<NewProduct> =
        serde_json::from_str(raw).wrap_err("Sample catalog is not valid JSON")?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .validate()
                .wrap_err_with(|| format!("Invalid product at index {} ({})", index, record.name))?;
            Ok(record.into_product())
        })
        .collect()
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();
    init_tracing(&Environment::from_env());

    let raw = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("Failed to read {}", path))?,
        None => SAMPLE_PRODUCTS.to_string(),
    };
    let products = load_products(&raw)?;

    let config = MongoConfig::from_env()?;
    let client = connect_from_config(&config).await?;
    let db = database_for(&client, &config);
    info!("Connected to MongoDB database: {}", db.name());

    let repository = MongoProductRepository::new(&db);
    let summary: Vec<(String, f64)> = products.iter().map(|p| (p.name.clone(), p.price)).collect();

    let inserted = repository.replace_all(products).await?;
    repository.init_indexes().await?;
    info!("Seeded {} products successfully", inserted);

    for (name, price) in summary {
        info!("  {} - {}", name, format_price(price));
    }

    client.shutdown().await;
    Ok(())
}
