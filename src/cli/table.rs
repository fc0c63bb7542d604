use super::ui;
use crate::core::config::AppConfig;
use crate::core::{CurrencyId, Converter, UNAVAILABLE};
use anyhow::Result;
use tracing::{debug, info};

/// Converted amounts for every configured pair; `None` where unavailable.
pub fn conversion_matrix(
    config: &AppConfig,
    converter: &Converter,
    amount: f64,
) -> Result<Vec<Vec<Option<f64>>>> {
    let count = config.currencies.len() as CurrencyId;
    let mut matrix = Vec::with_capacity(count as usize);
    for from in 0..count {
        let mut row = Vec::with_capacity(count as usize);
        for to in 0..count {
            let converted = converter.convert(amount, from, to)?;
            row.push((converted != UNAVAILABLE || amount == 0.0).then_some(converted));
        }
        matrix.push(row);
    }
    Ok(matrix)
}

/// Renders a grid where row `FROM`, column `TO` holds `amount` FROM in TO.
pub fn run(config: &AppConfig, converter: &Converter, amount: f64) -> Result<String> {
    info!(
        amount,
        currencies = config.currencies.len(),
        "Building conversion table"
    );
    let matrix = conversion_matrix(config, converter, amount)?;
    let unavailable = matrix.iter().flatten().filter(|v| v.is_none()).count();
    debug!(unavailable, "Conversion table ready");

    let mut table = ui::new_styled_table();
    let mut header = vec![ui::header_cell(&format!("{} from \\ to", ui::format_amount(amount)))];
    header.extend(config.currencies.iter().map(|code| ui::header_cell(code)));
    table.set_header(header);

    for (code, row) in config.currencies.iter().zip(&matrix) {
        let mut cells = vec![ui::header_cell(code)];
        cells.extend(row.iter().map(|value| ui::amount_cell(*value)));
        table.add_row(cells);
    }

    let mut output = format!(
        "Conversion table ({} strategy)\n\n",
        ui::style_text(&converter.strategy().to_string(), ui::StyleType::Title)
    );
    output.push_str(&table.to_string());
    if unavailable > 0 {
        output.push_str(&format!(
            "\n\n{}",
            ui::style_text(
                &format!("{unavailable} pair(s) unavailable"),
                ui::StyleType::Subtle
            )
        ));
    }
    Ok(output)
}
