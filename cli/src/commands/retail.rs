//! Retail display commands

use moracat_pricing::retail::{all_tier_prices, annual_savings, savings_vs_current_spend, tier_features};
use moracat_pricing::{calculate_retail_price, format_price, CatType, RetailConfig, Tier};
use rust_decimal::Decimal;
use tabled::{settings::Style, Table, Tabled};

use super::Context;

#[derive(Tabled)]
struct TierRow {
    #[tabled(rename = "Tier")]
    tier: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Retail value")]
    retail_value: String,
    #[tabled(rename = "Savings")]
    savings: String,
    #[tabled(rename = "Savings %")]
    savings_percentage: String,
}

fn tier_row(ctx: &Context, tier: Tier, cat: CatType) -> TierRow {
    let b = calculate_retail_price(&RetailConfig::new(tier, cat));
    let label = if tier.is_popular() {
        format!("{} *", tier.label(ctx.language))
    } else {
        tier.label(ctx.language).to_string()
    };
    TierRow {
        tier: label,
        price: format_price(b.fixed_price, ctx.language),
        retail_value: format_price(b.retail_value, ctx.language),
        savings: format_price(b.savings, ctx.language),
        savings_percentage: format!("{}%", b.savings_percentage),
    }
}

pub fn retail(ctx: &Context, tier: Tier, cat: CatType) -> anyhow::Result<()> {
    let config = RetailConfig::new(tier, cat);
    let breakdown = calculate_retail_price(&config);
    let yearly = annual_savings(&config);

    ctx.format.print(&breakdown, || {
        format!(
            "{}\nAnnual savings: {}",
            Table::new([tier_row(ctx, tier, cat)]).with(Style::rounded()),
            format_price(yearly, ctx.language)
        )
    })
}

pub fn tiers(ctx: &Context, cat: CatType) -> anyhow::Result<()> {
    let prices = all_tier_prices(cat);
    ctx.format.print(&prices, || {
        let rows = prices.keys().map(|&tier| tier_row(ctx, tier, cat));
        Table::new(rows).with(Style::rounded()).to_string()
    })
}

pub fn savings(ctx: &Context, spend: Decimal, tier: Tier, cat: CatType) -> anyhow::Result<()> {
    let comparison = savings_vs_current_spend(spend, tier, cat);
    ctx.format.print(&comparison, || {
        format!(
            "Current spend {} vs {}: save {} per month, {} per year ({}%)",
            format_price(spend, ctx.language),
            tier.label(ctx.language),
            format_price(comparison.monthly, ctx.language),
            format_price(comparison.annual, ctx.language),
            comparison.percentage
        )
    })
}

pub fn features(ctx: &Context, tier: Tier) -> anyhow::Result<()> {
    let features = tier_features(tier, ctx.language);
    ctx.format.print(&features, || {
        let mut out = format!("{}: {}", tier.label(ctx.language), tier.description(ctx.language));
        for feature in &features {
            out.push_str("\n  - ");
            out.push_str(feature);
        }
        out
    })
}
