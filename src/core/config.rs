use crate::core::currency::{CurrencyId, MAX_CURRENCIES, Universe};
use crate::core::graph::Strategy;
use crate::core::rate::RateEdge;
use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::{fs, path::PathBuf};
use tracing::debug;

/// A directly quoted rate between two configured currency codes.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct QuotedRate {
    pub from: String,
    pub to: String,
    /// Units of `to` per unit of `from`; `0` marks the quote as unavailable.
    pub rate: f64,
}

fn default_universe() -> u32 {
    MAX_CURRENCIES
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default = "default_universe")]
    pub universe: u32,
    /// Currency codes; a code's position is its identifier.
    pub currencies: Vec<String>,
    #[serde(default)]
    pub rates: Vec<QuotedRate>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "fxroute", "fxroute")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config = Self::from_yaml(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!(
            currencies = config.currencies.len(),
            rates = config.rates.len(),
            "Successfully loaded config"
        );
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.universe > MAX_CURRENCIES {
            bail!(
                "Universe of {} currencies exceeds the limit of {}",
                self.universe,
                MAX_CURRENCIES
            );
        }
        if self.currencies.len() > self.universe as usize {
            bail!(
                "{} currencies configured but the universe only holds {}",
                self.currencies.len(),
                self.universe
            );
        }
        let mut seen = HashSet::new();
        for code in &self.currencies {
            if !seen.insert(code.to_ascii_uppercase()) {
                bail!("Currency {} is listed more than once", code);
            }
        }
        Ok(())
    }

    pub fn universe(&self) -> Universe {
        Universe::new(self.universe)
    }

    pub fn currency_id(&self, code: &str) -> Result<CurrencyId> {
        self.currencies
            .iter()
            .position(|c| c.eq_ignore_ascii_case(code))
            .map(|index| index as CurrencyId)
            .ok_or_else(|| anyhow!("Unknown currency: {}", code))
    }

    pub fn currency_code(&self, id: CurrencyId) -> &str {
        self.currencies
            .get(id as usize)
            .map_or("?", String::as_str)
    }

    /// Resolves the configured quotes into fixed-rate edges, in file order.
    pub fn rate_edges(&self) -> Result<Vec<RateEdge>> {
        self.rates
            .iter()
            .map(|quote| {
                let from = self.currency_id(&quote.from)?;
                let to = self.currency_id(&quote.to)?;
                Ok(RateEdge::fixed(from, to, quote.rate))
            })
            .collect::<Result<Vec<_>>>()
            .context("Invalid rate in config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rate::RateProvider;

    const YAML: &str = r#"
strategy: dense
universe: 10
currencies: [USD, EUR, GBP, JPY]
rates:
  - from: USD
    to: EUR
    rate: 0.9
  - from: GBP
    to: usd
    rate: 1.25
  - from: JPY
    to: USD
    rate: 0
"#;

    #[test]
    fn test_config_deserialization() {
        let config = AppConfig::from_yaml(YAML).expect("Failed to deserialize");
        assert_eq!(config.strategy, Strategy::Dense);
        assert_eq!(config.universe().size(), 10);
        assert_eq!(config.currencies.len(), 4);
        assert_eq!(config.rates.len(), 3);
        assert_eq!(
            config.rates[1],
            QuotedRate {
                from: "GBP".to_string(),
                to: "usd".to_string(),
                rate: 1.25
            }
        );
        assert_eq!(config.currency_id("gbp").unwrap(), 2);
        assert_eq!(config.currency_code(3), "JPY");
        assert_eq!(config.currency_code(9), "?");
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_yaml("currencies: [USD]").unwrap();
        assert_eq!(config.strategy, Strategy::Bfs);
        assert_eq!(config.universe, MAX_CURRENCIES);
        assert!(config.rates.is_empty());
        assert!(config.rate_edges().unwrap().is_empty());
    }

    #[test]
    fn test_rate_edges_resolve_codes() {
        let config = AppConfig::from_yaml(YAML).unwrap();
        let edges = config.rate_edges().unwrap();
        assert_eq!(edges.len(), 3);
        assert_eq!((edges[0].from, edges[0].to), (0, 1));
        assert_eq!((edges[1].from, edges[1].to), (2, 0));
        assert_eq!(edges[1].provider.rate(), 1.25);
        assert_eq!(edges[2].provider.rate(), 0.0);
    }

    #[test]
    fn test_unknown_currency_in_rates() {
        let config = AppConfig::from_yaml(
            r#"
currencies: [USD, EUR]
rates:
  - { from: USD, to: CHF, rate: 0.8 }
"#,
        )
        .unwrap();
        let err = config.rate_edges().unwrap_err();
        assert!(format!("{err:#}").contains("Unknown currency: CHF"));
    }

    #[test]
    fn test_validation() {
        let too_many = AppConfig::from_yaml("universe: 1\ncurrencies: [USD, EUR]");
        assert!(too_many.unwrap_err().to_string().contains("universe"));

        let duplicate = AppConfig::from_yaml("currencies: [USD, EUR, usd]");
        assert!(duplicate.unwrap_err().to_string().contains("more than once"));

        let oversized = AppConfig::from_yaml("universe: 3000000000\ncurrencies: [USD]");
        assert!(oversized.unwrap_err().to_string().contains("exceeds the limit"));
        assert!(AppConfig::from_yaml("universe: 2000\ncurrencies: [USD]").is_ok());
    }

    #[test]
    fn test_load_from_path() -> Result<()> {
        let file = tempfile::NamedTempFile::new()?;
        fs::write(file.path(), YAML)?;
        let config = AppConfig::load_from_path(file.path())?;
        assert_eq!(config.currencies[1], "EUR");

        let missing = AppConfig::load_from_path(file.path().with_extension("missing"));
        assert!(missing.unwrap_err().to_string().contains("Failed to read"));
        Ok(())
    }
}
