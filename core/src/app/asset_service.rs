//! Asset service
//!
//! Registry of tradable instruments, keyed by ticker symbol.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::asset::normalize_symbol;
use crate::domain::entities::{Asset, AssetProps, AssetType, Entity, UniqueEntityId};
use crate::domain::ports::AssetRepository;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct RegisterAsset {
    pub symbol: String,
    pub name: String,
    pub asset_type: AssetType,
    /// Falls back to the configured default currency
    pub currency: Option<String>,
    pub sector: Option<String>,
}

/// Service for managing assets
pub struct AssetService<AR: AssetRepository> {
    assets: Arc<AR>,
    default_currency: String,
}

impl<AR: AssetRepository> AssetService<AR> {
    pub fn new(assets: Arc<AR>, default_currency: String) -> Self {
        Self {
            assets,
            default_currency,
        }
    }

    /// Register an asset; symbols are unique after upper-casing
    pub async fn register_asset(&self, input: RegisterAsset) -> Result<Asset, AppError> {
        let asset = Asset::create(
            AssetProps {
                symbol: input.symbol,
                name: input.name,
                asset_type: input.asset_type,
                currency: input
                    .currency
                    .unwrap_or_else(|| self.default_currency.clone()),
                sector: input.sector,
                created_at: Utc::now(),
            },
            None,
        )?;

        if self.assets.find_by_symbol(asset.symbol()).await?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "Asset '{}' already exists",
                asset.symbol()
            )));
        }

        self.assets.create(&asset).await?;

        tracing::info!(
            asset_id = %asset.id(),
            symbol = %asset.symbol(),
            asset_type = %asset.asset_type(),
            "Asset registered"
        );

        Ok(asset)
    }

    pub async fn find_by_symbol(&self, symbol: &str) -> Result<Asset, AppError> {
        let symbol = normalize_symbol(symbol)?;
        self.assets
            .find_by_symbol(&symbol)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Asset {}", symbol)))
    }

    pub async fn get_asset(&self, asset_id: &UniqueEntityId) -> Result<Asset, AppError> {
        self.assets
            .find_by_id(asset_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Asset {}", asset_id)))
    }
}
