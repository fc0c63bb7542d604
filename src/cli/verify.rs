use super::ui;
use crate::core::config::AppConfig;
use crate::core::{Converter, CurrencyId, Strategy};
use anyhow::{Result, bail};
use tracing::{info, warn};

const RELATIVE_TOLERANCE: f64 = 1e-9;

/// Outcome of checking both strategies against the same configuration.
#[derive(Debug, Default)]
pub struct VerifyReport {
    pub pairs_checked: usize,
    /// Pairs where the strategies disagree on reachability or hop count.
    pub mismatches: Vec<String>,
    /// Pairs routed through different, equally short paths whose quotes
    /// do not multiply out to the same rate.
    pub rate_differences: Vec<String>,
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= RELATIVE_TOLERANCE * a.abs().max(b.abs())
}

pub fn compare(config: &AppConfig) -> Result<VerifyReport> {
    let edges = config.rate_edges()?;
    let dense = Converter::with_edges(Strategy::Dense, config.universe(), edges.clone())?;
    let bfs = Converter::with_edges(Strategy::Bfs, config.universe(), edges)?;

    let mut report = VerifyReport::default();
    let count = config.currencies.len() as CurrencyId;
    for from in 0..count {
        for to in 0..count {
            report.pairs_checked += 1;
            let label = format!(
                "{} -> {}",
                config.currency_code(from),
                config.currency_code(to)
            );

            let dense_hops = dense.hops(from, to)?;
            let bfs_hops = bfs.hops(from, to)?;
            if dense_hops != bfs_hops {
                let describe = |hops: Option<usize>| {
                    hops.map_or("unreachable".to_string(), |h| format!("{h} hops"))
                };
                report.mismatches.push(format!(
                    "{label}: dense {}, bfs {}",
                    describe(dense_hops),
                    describe(bfs_hops)
                ));
                continue;
            }

            let dense_rate = dense.convert(1.0, from, to)?;
            let bfs_rate = bfs.convert(1.0, from, to)?;
            if !approx_eq(dense_rate, bfs_rate) {
                report
                    .rate_differences
                    .push(format!("{label}: dense {dense_rate}, bfs {bfs_rate}"));
            }
        }
    }
    Ok(report)
}

pub fn run(config: &AppConfig) -> Result<String> {
    info!(currencies = config.currencies.len(), "Verifying strategies agree");
    let report = compare(config)?;

    if !report.mismatches.is_empty() {
        bail!(
            "Strategies disagree on {} pair(s):\n{}",
            report.mismatches.len(),
            report.mismatches.join("\n")
        );
    }
    for difference in &report.rate_differences {
        warn!(%difference, "Equal-length routes quote different rates");
    }

    let mut output = format!(
        "{} {} pairs checked, dense and bfs routes agree",
        ui::style_text("OK", ui::StyleType::Amount),
        report.pairs_checked
    );
    if !report.rate_differences.is_empty() {
        output.push_str(&format!(
            "\n{}\n{}",
            ui::style_text(
                &format!(
                    "{} pair(s) take different routes with inconsistent quotes:",
                    report.rate_differences.len()
                ),
                ui::StyleType::Error
            ),
            report.rate_differences.join("\n")
        ));
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consistent_quotes_agree() {
        let config = AppConfig::from_yaml(
            r#"
universe: 8
currencies: [A, B, C, D, E]
rates:
  - { from: A, to: B, rate: 2 }
  - { from: B, to: C, rate: 3 }
  - { from: C, to: D, rate: 4 }
  - { from: E, to: D, rate: 5 }
  - { from: A, to: E, rate: 6 }
"#,
        )
        .unwrap();
        let report = compare(&config).unwrap();
        assert_eq!(report.pairs_checked, 25);
        assert!(report.mismatches.is_empty());
        assert!(report.rate_differences.is_empty());
        assert!(run(&config).unwrap().contains("25 pairs checked"));
    }

    #[test]
    fn test_inconsistent_quotes_reported() {
        // Square A-B-D / A-C-D with quotes that do not agree around the loop.
        // Dense keeps A-B-D (completed first), BFS starts from C (A's first neighbour).
        let config = AppConfig::from_yaml(
            r#"
universe: 4
currencies: [A, B, C, D]
rates:
  - { from: A, to: C, rate: 5 }
  - { from: A, to: B, rate: 2 }
  - { from: B, to: D, rate: 3 }
  - { from: C, to: D, rate: 7 }
"#,
        )
        .unwrap();
        let report = compare(&config).unwrap();
        assert!(report.mismatches.is_empty());
        assert!(
            report
                .rate_differences
                .iter()
                .any(|line| line.starts_with("A -> D")),
            "{:?}",
            report.rate_differences
        );
        assert!(run(&config).unwrap().contains("inconsistent quotes"));
    }
}
