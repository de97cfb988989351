//! Asset domain entity
//!
//! A tradable instrument that transactions and alerts refer to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, UniqueEntityId};
use crate::domain::value_objects::Money;
use crate::error::ValidationError;

const MAX_SYMBOL_LENGTH: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    Stock,
    RealEstateFund,
    FixedIncome,
    Etf,
    Crypto,
    Other,
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetType::Stock => write!(f, "stock"),
            AssetType::RealEstateFund => write!(f, "real_estate_fund"),
            AssetType::FixedIncome => write!(f, "fixed_income"),
            AssetType::Etf => write!(f, "etf"),
            AssetType::Crypto => write!(f, "crypto"),
            AssetType::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stock" => Ok(AssetType::Stock),
            "real_estate_fund" | "fii" => Ok(AssetType::RealEstateFund),
            "fixed_income" => Ok(AssetType::FixedIncome),
            "etf" => Ok(AssetType::Etf),
            "crypto" => Ok(AssetType::Crypto),
            "other" => Ok(AssetType::Other),
            _ => Err(format!("Unknown asset type: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssetProps {
    pub symbol: String,
    pub name: String,
    pub asset_type: AssetType,
    pub currency: String,
    pub sector: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Asset {
    id: UniqueEntityId,
    props: AssetProps,
}

impl Asset {
    /// Validates the symbol and currency; symbols are stored upper-cased
    pub fn create(mut props: AssetProps, id: Option<UniqueEntityId>) -> Result<Self, ValidationError> {
        props.symbol = normalize_symbol(&props.symbol)?;

        props.name = props.name.trim().to_string();
        if props.name.is_empty() {
            return Err(ValidationError::InvalidAsset(
                "asset name cannot be empty".to_string(),
            ));
        }

        props.currency = Money::zero_in(&props.currency)?.currency().to_string();

        Ok(Self {
            id: UniqueEntityId::or_new(id),
            props,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.props.symbol
    }

    pub fn name(&self) -> &str {
        &self.props.name
    }

    pub fn asset_type(&self) -> AssetType {
        self.props.asset_type
    }

    pub fn currency(&self) -> &str {
        &self.props.currency
    }

    pub fn sector(&self) -> Option<&str> {
        self.props.sector.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.props.created_at
    }
}

impl Entity for Asset {
    fn id(&self) -> &UniqueEntityId {
        &self.id
    }
}

/// Ticker symbols: letters, digits and `.`/`-`, upper-cased
pub fn normalize_symbol(raw: &str) -> Result<String, ValidationError> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() || symbol.len() > MAX_SYMBOL_LENGTH {
        return Err(ValidationError::InvalidAsset(format!(
            "symbol must have between 1 and {} characters",
            MAX_SYMBOL_LENGTH
        )));
    }
    if !symbol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ValidationError::InvalidAsset(format!(
            "symbol contains invalid characters: '{}'",
            raw
        )));
    }
    Ok(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(symbol: &str) -> AssetProps {
        AssetProps {
            symbol: symbol.to_string(),
            name: "Petrobras PN".to_string(),
            asset_type: AssetType::Stock,
            currency: "brl".to_string(),
            sector: Some("Energy".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn create_normalizes_symbol_and_currency() {
        let asset = Asset::create(props(" petr4 "), None).unwrap();
        assert_eq!(asset.symbol(), "PETR4");
        assert_eq!(asset.currency(), "BRL");
        assert_eq!(asset.sector(), Some("Energy"));
    }

    #[test]
    fn create_rejects_bad_symbol() {
        assert!(Asset::create(props(""), None).is_err());
        assert!(Asset::create(props("PETR 4"), None).is_err());
        assert!(Asset::create(props("ABCDEFGHIJKLM"), None).is_err());
        assert!(Asset::create(props("BRK.B"), None).is_ok());
    }

    #[test]
    fn create_rejects_empty_name() {
        let mut p = props("VALE3");
        p.name = "  ".to_string();
        assert!(Asset::create(p, None).is_err());
    }

    #[test]
    fn asset_type_from_str() {
        assert_eq!("FII".parse::<AssetType>().unwrap(), AssetType::RealEstateFund);
        assert_eq!(AssetType::FixedIncome.to_string(), "fixed_income");
        assert!("bond".parse::<AssetType>().is_err());
    }
}
