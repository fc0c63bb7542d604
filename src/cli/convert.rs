use super::ui;
use crate::core::config::AppConfig;
use crate::core::{Converter, UNAVAILABLE};
use anyhow::Result;
use tracing::info;

/// Converts `amount` between two configured currency codes and renders the
/// result together with the route it took.
pub fn run(
    config: &AppConfig,
    converter: &Converter,
    amount: f64,
    from: &str,
    to: &str,
) -> Result<String> {
    let from_id = config.currency_id(from)?;
    let to_id = config.currency_id(to)?;
    let from = config.currency_code(from_id);
    let to = config.currency_code(to_id);
    info!(amount, from, to, strategy = %converter.strategy(), "Converting");

    let converted = converter.convert(amount, from_id, to_id)?;
    let Some(route) = converter.route(from_id, to_id)? else {
        return Ok(format!(
            "{} {from} -> {to}: {}",
            ui::format_amount(amount),
            ui::style_text("unavailable (no conversion path)", ui::StyleType::Error)
        ));
    };

    let path = route
        .iter()
        .map(|&id| config.currency_code(id))
        .collect::<Vec<_>>()
        .join(" -> ");
    let hops = route.len() - 1;
    let route_line = ui::style_text(
        &format!("Route: {path} ({hops} hop{})", if hops == 1 { "" } else { "s" }),
        ui::StyleType::Subtle,
    );

    if converted == UNAVAILABLE && amount != 0.0 {
        return Ok(format!(
            "{} {from} -> {to}: {}\n{route_line}",
            ui::format_amount(amount),
            ui::style_text("unavailable (rate not quoted)", ui::StyleType::Error)
        ));
    }

    Ok(format!(
        "{} {from} = {} {to}\n{route_line}",
        ui::format_amount(amount),
        ui::style_text(&ui::format_amount(converted), ui::StyleType::Amount)
    ))
}
