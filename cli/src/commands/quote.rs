//! Cost-plus quote command

use anyhow::{anyhow, bail};
use colored::Colorize;
use moracat_pricing::cost_plus::{AddOn, CatProfile, Duration, PriceBreakdown};
use moracat_pricing::{format_price, Language, SubscriptionConfig, Tier};
use tabled::{settings::Style, Table, Tabled};

use super::Context;

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

pub fn handle(
    ctx: &Context,
    tier: Tier,
    cat: CatProfile,
    months: u32,
    add_ons: &[String],
    allow_invalid: bool,
) -> anyhow::Result<()> {
    let mut config = SubscriptionConfig::new(tier, cat).with_duration(Duration::try_from(months)?);
    for arg in add_ons {
        let (add_on, quantity) = parse_add_on(arg)?;
        config = config.with_add_on(add_on, quantity);
    }

    let breakdown = ctx.engine.calculate(&config);
    if !breakdown.is_valid_config && !allow_invalid {
        bail!(
            "margin {}% is below the {}% floor (use --allow-invalid to print anyway)",
            breakdown.margin_percentage,
            ctx.engine.config().margin_floor_percent
        );
    }

    ctx.format.print(&breakdown, || render(&breakdown, ctx.language))
}

/// Parse `id=quantity`
fn parse_add_on(arg: &str) -> anyhow::Result<(AddOn, u32)> {
    let (id, quantity) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("expected <add-on>=<quantity>, got {:?}", arg))?;
    let quantity: u32 = quantity
        .trim()
        .parse()
        .map_err(|_| anyhow!("invalid quantity in {:?}", arg))?;
    Ok((id.trim().parse()?, quantity))
}

fn render(b: &PriceBreakdown, lang: Language) -> String {
    let price = |amount| format_price(amount, lang);

    let mut rows: Vec<Row> = b
        .line_items
        .iter()
        .map(|line| Row {
            item: format!("{:?}", line.category),
            quantity: line.quantity.normalize().to_string(),
            amount: price(line.amount),
        })
        .collect();
    rows.extend(b.add_ons.iter().map(|line| Row {
        item: line.add_on.spec().label.to_string(),
        quantity: line.quantity.to_string(),
        amount: price(line.amount),
    }));

    let summary = [
        ("Product cost", b.product_cost),
        ("Overhead", b.overhead),
        ("Operations", b.operations),
        ("Cost before profit", b.cost_before_profit),
        ("Profit", b.profit),
        ("Monthly price", b.monthly_price),
        ("Discount", b.discount_amount),
        ("Final monthly price", b.final_monthly_price),
        ("Total", b.total_price),
    ];
    rows.extend(summary.into_iter().map(|(item, amount)| Row {
        item: item.to_string(),
        quantity: String::new(),
        amount: price(amount),
    }));

    let margin = format!("{}%", b.margin_percentage);
    let verdict = if b.is_valid_config {
        format!("margin {} (valid)", margin.green())
    } else {
        format!("margin {} (below floor)", margin.red().bold())
    };

    let duration = match Duration::try_from(b.duration_months) {
        Ok(d) => d.label(lang).to_string(),
        Err(_) if b.duration_months == 1 => "1 month".to_string(),
        Err(_) => format!("{} months", b.duration_months),
    };

    format!(
        "{}\n{}, {}",
        Table::new(rows).with(Style::rounded()),
        duration,
        verdict
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_on() {
        assert_eq!(parse_add_on("toy=2").unwrap(), (AddOn::Toy, 2));
        assert_eq!(parse_add_on(" treat_pack = 1 ").unwrap(), (AddOn::TreatPack, 1));
        assert!(parse_add_on("toy").is_err());
        assert!(parse_add_on("toy=-1").is_err());
        assert!(parse_add_on("catnip=1").is_err());
    }

    #[test]
    fn test_render_duration_label() {
        colored::control::set_override(false);
        let engine = moracat_pricing::CostPlusEngine::new();

        let monthly = engine.calculate(&SubscriptionConfig::new(Tier::Basic, CatProfile::Adult));
        let out = render(&monthly, Language::En);
        assert!(out.contains("\nMonthly, margin"));
        assert!(!out.contains("1 months"));

        let annual = engine.calculate(
            &SubscriptionConfig::new(Tier::Basic, CatProfile::Adult).with_duration(Duration::Annual),
        );
        assert!(render(&annual, Language::En).contains("\n12 Months, margin"));
    }
}
