use std::env;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::value_objects::{Money, NegativeBalancePolicy, DEFAULT_CURRENCY};

/// Upper bound for a requested page size
pub const MAX_PAGE_SIZE: u32 = 100;

/// Monthly contributions used by goal projections, in the goal's currency
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioContributions {
    pub conservative: Decimal,
    pub moderate: Decimal,
    pub aggressive: Decimal,
}

impl Default for ScenarioContributions {
    fn default() -> Self {
        Self {
            conservative: dec!(500),
            moderate: dec!(1000),
            aggressive: dec!(2000),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Currency assumed when a caller does not name one
    pub default_currency: String,
    pub negative_balance_policy: NegativeBalancePolicy,
    pub default_page_size: u32,
    pub contributions: ScenarioContributions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
            negative_balance_policy: NegativeBalancePolicy::default(),
            default_page_size: 20,
            contributions: ScenarioContributions::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Self {
            default_currency: parse_currency(
                "CARTEIRA_DEFAULT_CURRENCY",
                defaults.default_currency,
            ),
            negative_balance_policy: parse_var(
                "CARTEIRA_NEGATIVE_BALANCE",
                defaults.negative_balance_policy,
            ),
            default_page_size: parse_var("CARTEIRA_PAGE_SIZE", defaults.default_page_size)
                .clamp(1, MAX_PAGE_SIZE),
            contributions: ScenarioContributions {
                conservative: parse_var(
                    "CARTEIRA_CONTRIBUTION_CONSERVATIVE",
                    defaults.contributions.conservative,
                ),
                moderate: parse_var(
                    "CARTEIRA_CONTRIBUTION_MODERATE",
                    defaults.contributions.moderate,
                ),
                aggressive: parse_var(
                    "CARTEIRA_CONTRIBUTION_AGGRESSIVE",
                    defaults.contributions.aggressive,
                ),
            },
        }
    }
}

/// Read and parse an env var, falling back to `default` when unset or malformed
fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, value = %raw, "Ignoring malformed configuration value");
                default
            }
        },
        Err(_) => default,
    }
}

/// Read a currency code, keeping `default` unless `Money` accepts the value
fn parse_currency(key: &str, default: String) -> String {
    match env::var(key) {
        Ok(raw) => match Money::zero_in(&raw) {
            Ok(zero) => zero.currency().to_string(),
            Err(e) => {
                tracing::warn!(key, value = %raw, error = %e, "Ignoring malformed currency");
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_disallow_negative_balances() {
        let config = Config::default();
        assert_eq!(config.default_currency, "BRL");
        assert_eq!(
            config.negative_balance_policy,
            NegativeBalancePolicy::Disallow
        );
        assert_eq!(config.default_page_size, 20);
    }

    #[test]
    fn default_contributions_are_increasing() {
        let c = ScenarioContributions::default();
        assert!(c.conservative < c.moderate);
        assert!(c.moderate < c.aggressive);
    }

    #[test]
    fn parse_var_falls_back_on_garbage() {
        env::set_var("CARTEIRA_TEST_PAGE_SIZE", "not-a-number");
        assert_eq!(parse_var("CARTEIRA_TEST_PAGE_SIZE", 7u32), 7);
        env::remove_var("CARTEIRA_TEST_PAGE_SIZE");
    }

    #[test]
    fn parse_var_reads_policy() {
        env::set_var("CARTEIRA_TEST_POLICY", "allow");
        assert_eq!(
            parse_var("CARTEIRA_TEST_POLICY", NegativeBalancePolicy::Disallow),
            NegativeBalancePolicy::Allow
        );
        env::remove_var("CARTEIRA_TEST_POLICY");
    }

    #[test]
    fn parse_currency_validates_code() {
        env::set_var("CARTEIRA_TEST_CURRENCY_BAD", "R$1");
        assert_eq!(
            parse_currency("CARTEIRA_TEST_CURRENCY_BAD", "BRL".to_string()),
            "BRL"
        );
        env::remove_var("CARTEIRA_TEST_CURRENCY_BAD");

        env::set_var("CARTEIRA_TEST_CURRENCY_OK", " usd ");
        assert_eq!(
            parse_currency("CARTEIRA_TEST_CURRENCY_OK", "BRL".to_string()),
            "USD"
        );
        env::remove_var("CARTEIRA_TEST_CURRENCY_OK");
    }

    #[test]
    fn parse_var_unset_uses_default() {
        assert_eq!(parse_var("CARTEIRA_TEST_UNSET_KEY", 42u32), 42);
    }
}
