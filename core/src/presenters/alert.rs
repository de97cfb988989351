use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::entities::{Alert, AlertType, Entity};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertView {
    pub id: String,
    pub user_id: String,
    pub asset_id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub threshold: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub fn present(alert: &Alert) -> AlertView {
    AlertView {
        id: alert.id().to_string(),
        user_id: alert.user_id().to_string(),
        asset_id: alert.asset_id().to_string(),
        alert_type: alert.alert_type(),
        threshold: alert.threshold(),
        is_active: alert.is_active(),
        created_at: alert.created_at(),
        updated_at: alert.updated_at(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_alert;
    use rust_decimal_macros::dec;

    #[test]
    fn serializes_type_and_threshold() {
        let alert = test_alert(&"user-1".into(), &"asset-1".into(), AlertType::PriceBelow, dec!(21.7));
        let json = serde_json::to_value(present(&alert)).unwrap();
        assert_eq!(json["type"], "price_below");
        assert_eq!(json["threshold"], "21.7");
        assert_eq!(json["isActive"], true);
        assert_eq!(json["userId"], "user-1");
    }
}
