//! # Command Line
//!
//! ```text
//! checkout [OPTIONS] <ORDER_FILE>     price an order
//! checkout --prices                   print the catalog price list
//! checkout --rules                    print the active discount rules
//! ```
//!
//! Arguments are parsed by hand; there are few enough of them.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use tracing::info;

use grocer_catalog::Catalog;
use grocer_core::{DiscountRule, DiscountStrategy, OrderPricingEngine};

use crate::config::CheckoutConfig;
use crate::error::AppError;
use crate::order::read_order;
use crate::receipt::{render_price_list, render_receipt};

pub const USAGE: &str = "\
Grocer Checkout

Usage: checkout [OPTIONS] <ORDER_FILE>
       checkout --prices
       checkout --rules

Options:
      --json           Print the summary as JSON instead of a receipt
      --on <DATE>      Price as of DATE (YYYY-MM-DD) instead of today
      --prices         Print the catalog price list
      --rules          Print the active discount rules
  -h, --help           Show this help message

Environment:
  GROCER_CATALOG, GROCER_STORE_NAME, GROCER_CURRENCY_SYMBOL,
  GROCER_RECEIPT_WIDTH, RUST_LOG";

/// What the operator asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Price {
        order: PathBuf,
        json: bool,
        on: Option<NaiveDate>,
    },
    Prices {
        json: bool,
    },
    Rules,
    Help,
}

impl Command {
    /// Parses arguments, excluding the program name.
    pub fn parse<I, S>(args: I) -> Result<Command, AppError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();

        let mut order = None;
        let mut json = false;
        let mut on = None;
        let mut prices = false;
        let mut rules = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--help" | "-h" => return Ok(Command::Help),
                "--json" => json = true,
                "--prices" => prices = true,
                "--rules" => rules = true,
                "--on" => {
                    let raw = args
                        .get(i + 1)
                        .ok_or_else(|| AppError::validation("--on needs a date (YYYY-MM-DD)"))?;
                    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                        AppError::validation(format!("Invalid date for --on: {}", raw))
                    })?;
                    on = Some(date);
                    i += 1;
                }
                flag if flag.starts_with('-') => {
                    return Err(AppError::validation(format!("Unknown option: {}", flag)));
                }
                path => {
                    if order.is_some() {
                        return Err(AppError::validation("Only one order file may be given"));
                    }
                    order = Some(PathBuf::from(path));
                }
            }
            i += 1;
        }

        if rules {
            return Ok(Command::Rules);
        }
        if prices {
            return Ok(Command::Prices { json });
        }
        match order {
            Some(order) => Ok(Command::Price { order, json, on }),
            None => Err(AppError::validation("Missing order file (see --help)")),
        }
    }
}

/// Parses `args`, loads configuration from the environment and executes.
pub async fn run<I, S>(args: I) -> Result<String, AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let command = Command::parse(args)?;
    if command == Command::Help {
        return Ok(USAGE.to_string());
    }
    let config = CheckoutConfig::from_env()?;
    execute(&command, &config).await
}

/// Executes a parsed command and returns what should be printed.
///
/// The catalog database is opened per command and closed before output is
/// rendered. Orders are priced against the items prefetched for them.
pub async fn execute(command: &Command, config: &CheckoutConfig) -> Result<String, AppError> {
    match command {
        Command::Help => Ok(USAGE.to_string()),
        Command::Rules => Ok(describe_rules(&DiscountRule::standard())),
        Command::Prices { json } => {
            let catalog = Catalog::open(config.catalog_config()).await?;
            let prices = catalog.price_list().await;
            catalog.close().await;
            let prices = prices?;

            if *json {
                to_json(&prices)
            } else {
                Ok(render_price_list(
                    &prices.beers,
                    &prices.breads,
                    &prices.vegetables,
                    config,
                ))
            }
        }
        Command::Price { order, json, on } => {
            let requests = read_order(order)?;
            let today = on.unwrap_or_else(|| Local::now().date_naive());

            let catalog = Catalog::open(config.catalog_config()).await?;
            let items = catalog.prefetch(&requests).await;
            catalog.close().await;
            let items = items?;

            let engine = OrderPricingEngine::new(&items);
            let summary = engine.price_order_on(&requests, today)?;
            info!(order = %order.display(), total = %summary.total, "Checkout complete");

            if *json {
                to_json(&summary)
            } else {
                Ok(render_receipt(&summary, today, config))
            }
        }
    }
}

fn describe_rules(rules: &[DiscountRule]) -> String {
    rules
        .iter()
        .map(|rule| {
            let summary = match rule {
                DiscountRule::BeerPack => {
                    "per six-pack by origin: Belgium 3.00, Netherlands 2.00, Germany 4.00"
                }
                DiscountRule::BreadFreshness => {
                    "2-3 days old: 1 free loaf per 2; 4-6 days old: 2 free per 3"
                }
                DiscountRule::VegetableWeight => {
                    "by pooled weight: up to 100g 5%, up to 500g 7%, above 10%"
                }
            };
            format!("{:<24} {}\n", rule.name(), summary)
        })
        .collect()
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::internal(format!("Could not serialize output: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::Duration;
    use grocer_catalog::{BeerDraft, BreadDraft, CatalogConfig, VegetableDraft};
    use grocer_core::{Beer, Bread, Money, Vegetable};
    use std::fs;

    struct Fixture {
        dir: PathBuf,
        config: CheckoutConfig,
        duvel: Beer,
        bread: Bread,
        broccoli: Vegetable,
        today: NaiveDate,
    }

    impl Fixture {
        async fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("grocer-cli-{}", uuid::Uuid::new_v4()));
            fs::create_dir_all(&dir).unwrap();
            let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

            let catalog_path = dir.join("catalog.db");
            let catalog = Catalog::open(CatalogConfig::new(&catalog_path)).await.unwrap();
            let duvel = catalog
                .beers()
                .insert(BeerDraft::new("Duvel", "BELGIUM", Money::from_cents(500)))
                .await
                .unwrap();
            let bread = catalog
                .breads()
                .insert_on(
                    BreadDraft::new("White Bread", today - Duration::days(3), Money::from_cents(500)),
                    today,
                )
                .await
                .unwrap();
            let broccoli = catalog
                .vegetables()
                .insert(VegetableDraft::new("Broccoli", Money::from_cents(150)))
                .await
                .unwrap();
            catalog.close().await;

            let config = CheckoutConfig {
                catalog_path,
                store_name: "Test Store".to_string(),
                currency_symbol: "€".to_string(),
                receipt_width: 42,
            };

            Fixture {
                dir,
                config,
                duvel,
                bread,
                broccoli,
                today,
            }
        }

        fn write_order(&self, json: &str) -> PathBuf {
            let path = self.dir.join("order.json");
            fs::write(&path, json).unwrap();
            path
        }

        fn mixed_order(&self) -> PathBuf {
            self.write_order(&format!(
                r#"[
                    {{"category": "BEER", "itemId": "{}", "quantity": 6}},
                    {{"category": "BREAD", "itemId": "{}", "quantity": 4}},
                    {{"category": "VEGETABLE", "itemId": "{}", "quantity": 300}}
                ]"#,
                self.duvel.id, self.bread.id, self.broccoli.id
            ))
        }
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.dir);
        }
    }

    #[test]
    fn test_parse_price_command() {
        let command = Command::parse(["order.json", "--json", "--on", "2024-03-10"]).unwrap();
        assert_eq!(
            command,
            Command::Price {
                order: PathBuf::from("order.json"),
                json: true,
                on: NaiveDate::from_ymd_opt(2024, 3, 10),
            }
        );
    }

    #[test]
    fn test_parse_modes() {
        assert_eq!(Command::parse(["--rules"]).unwrap(), Command::Rules);
        assert_eq!(
            Command::parse(["--prices", "--json"]).unwrap(),
            Command::Prices { json: true }
        );
        assert_eq!(Command::parse(["-h"]).unwrap(), Command::Help);
    }

    #[test]
    fn test_parse_errors() {
        let empty: [&str; 0] = [];
        assert_eq!(
            Command::parse(empty).unwrap_err().code,
            ErrorCode::ValidationError
        );
        assert!(Command::parse(["--verbose"]).unwrap_err().message.contains("--verbose"));
        assert!(Command::parse(["a.json", "--on", "10/03/2024"]).is_err());
        assert!(Command::parse(["a.json", "--on"]).is_err());
        assert!(Command::parse(["a.json", "b.json"]).is_err());
    }

    #[tokio::test]
    async fn test_price_receipt() {
        let fx = Fixture::new().await;
        let command = Command::Price {
            order: fx.mixed_order(),
            json: false,
            on: Some(fx.today),
        };
        let receipt = execute(&command, &fx.config).await.unwrap();

        assert!(receipt.contains("Test Store"));
        assert!(receipt.contains("6 x Duvel (BELGIUM)"));
        assert!(receipt.contains("€27.00"));
        assert!(receipt.contains("€10.00"));
        assert!(receipt.lines().last().unwrap().ends_with("€41.19"));
    }

    #[tokio::test]
    async fn test_price_json() {
        let fx = Fixture::new().await;
        let command = Command::Price {
            order: fx.mixed_order(),
            json: true,
            on: Some(fx.today),
        };
        let output = execute(&command, &fx.config).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["total"], "41.19");
        assert_eq!(value["lines"].as_array().unwrap().len(), 3);
        assert_eq!(value["lines"][0]["description"], "6 x Duvel (BELGIUM)");
    }

    #[tokio::test]
    async fn test_stale_bread_rejected_at_checkout() {
        let fx = Fixture::new().await;
        let command = Command::Price {
            order: fx.mixed_order(),
            json: false,
            on: Some(fx.today + Duration::days(4)),
        };
        let err = execute(&command, &fx.config).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("White Bread"));
    }

    #[tokio::test]
    async fn test_unknown_item() {
        let fx = Fixture::new().await;
        let order = fx.write_order(r#"[{"category": "BEER", "itemId": "nope", "quantity": 1}]"#);
        let command = Command::Price {
            order,
            json: false,
            on: Some(fx.today),
        };
        let err = execute(&command, &fx.config).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.code.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_missing_catalog() {
        let fx = Fixture::new().await;
        let mut config = fx.config.clone();
        config.catalog_path = fx.dir.join("missing.db");
        let err = execute(&Command::Prices { json: false }, &config).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogError);
        assert!(!config.catalog_path.exists());
    }

    #[tokio::test]
    async fn test_price_list() {
        let fx = Fixture::new().await;
        let text = execute(&Command::Prices { json: false }, &fx.config).await.unwrap();
        assert!(text.contains("Duvel (BELGIUM)"));
        assert!(text.contains("White Bread"));
        assert!(text.contains("Broccoli"));
        assert!(text.contains("€1.50"));
    }

    #[tokio::test]
    async fn test_rules() {
        let text = execute(&Command::Rules, &CheckoutConfig {
            catalog_path: PathBuf::from("unused.db"),
            store_name: String::new(),
            currency_symbol: "€".to_string(),
            receipt_width: 42,
        })
        .await
        .unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("BeerPackDiscount"));
    }
}
