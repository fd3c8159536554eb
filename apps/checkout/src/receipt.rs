//! # Receipt Rendering
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │             Grocer Dev Store             │
//! │           Priced on 2024-03-10           │
//! │------------------------------------------│
//! │6 x Duvel (BELGIUM)                 €27.00│
//! │4 x White Bread                     €10.00│
//! │300g Broccoli                        €4.19│
//! │------------------------------------------│
//! │You saved                           €13.32│
//! │TOTAL                               €41.19│
//! └──────────────────────────────────────────┘
//! ```
//!
//! Line amounts are each line's net value rounded to cents for display.
//! TOTAL is the engine's total, so the printed lines may differ from it by
//! a cent of rounding.

use chrono::NaiveDate;
use grocer_core::{Money, OrderSummary};

use crate::config::CheckoutConfig;

/// Renders a priced order as plain text, one row per line.
pub fn render_receipt(summary: &OrderSummary, today: NaiveDate, config: &CheckoutConfig) -> String {
    let width = config.receipt_width;
    let rule = "-".repeat(width);
    let mut out = String::new();

    out.push_str(&centered(&config.store_name, width));
    out.push_str(&centered(&format!("Priced on {}", today), width));
    out.push_str(&rule);
    out.push('\n');

    if summary.is_empty() {
        out.push_str(&centered("(no items)", width));
    }
    for line in &summary.lines {
        out.push_str(&row(&line.description, &config.format_money(line.net), width));
    }

    out.push_str(&rule);
    out.push('\n');

    let saved = summary.discount_total();
    if saved.is_positive() {
        out.push_str(&row("You saved", &config.format_money(saved), width));
    }
    out.push_str(&row("TOTAL", &config.format_money(summary.total), width));
    out
}

/// Renders the catalog price list.
pub fn render_price_list(
    beers: &[grocer_core::Beer],
    breads: &[grocer_core::Bread],
    vegetables: &[grocer_core::Vegetable],
    config: &CheckoutConfig,
) -> String {
    let width = config.receipt_width;
    let mut out = String::new();

    let mut section = |title: &str, rows: Vec<(String, Money)>| {
        out.push_str(title);
        out.push('\n');
        for (label, price) in rows {
            out.push_str(&row(&format!("  {}", label), &config.format_money(price), width));
        }
    };

    section(
        "BEER (per unit)",
        beers
            .iter()
            .map(|b| (format!("{} ({})", b.name, b.origin_country), b.unit_price))
            .collect(),
    );
    section(
        "BREAD (per loaf)",
        breads
            .iter()
            .map(|b| (format!("{} [{}]", b.name, b.baking_date), b.unit_price))
            .collect(),
    );
    section(
        "VEGETABLE (per 100 g)",
        vegetables
            .iter()
            .map(|v| (v.name.clone(), v.price_per_100_grams))
            .collect(),
    );

    out
}

fn centered(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let pad = (width - text.chars().count()) / 2;
    format!("{}{}\n", " ".repeat(pad), text)
}

/// One receipt row: label left, amount right, truncating the label if needed.
fn row(label: &str, amount: &str, width: usize) -> String {
    let amount_len = amount.chars().count();
    let room = width.saturating_sub(amount_len + 1);
    let label = truncate(label, room);
    let gap = width.saturating_sub(label.chars().count() + amount_len).max(1);
    format!("{}{}{}\n", label, " ".repeat(gap), amount)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(1);
    let mut short: String = text.chars().take(keep).collect();
    short.push('…');
    short
}
