//! Polynance REST API request and response bodies.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{MarketRef, PositionRef, Side, TraderPosition};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOrderRequest<'a> {
    pub provider: &'a str,
    pub market_id_or_slug: &'a str,
    pub position_id_or_name: &'a str,
    pub buy_or_sell: Side,
    pub usdc_flow_abs: Decimal,
    pub trader: String,
    /// Idempotency key for the venue; one per built order.
    pub client_order_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct BuildOrderResponse {
    pub order: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct ExecuteOrderRequest {
    pub order: serde_json::Value,
    pub signature: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteOrderResponse {
    pub order_id: String,
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PositionsResponse {
    #[serde(default)]
    pub positions: Vec<PositionDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionDto {
    #[serde(alias = "marketIdOrSlug", alias = "slug")]
    pub market: String,
    #[serde(alias = "positionIdOrName", alias = "outcome")]
    pub position: String,
    pub size: Decimal,
    #[serde(default, alias = "avgPrice")]
    pub average_price: Option<Decimal>,
}

impl From<PositionDto> for TraderPosition {
    fn from(dto: PositionDto) -> Self {
        Self {
            market: MarketRef::new(dto.market),
            position: PositionRef::new(dto.position),
            size: dto.size,
            average_price: dto.average_price,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingPriceResponse {
    pub ready: bool,
    #[serde(default)]
    pub order_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct VerifyPriceRequest {
    pub trader: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPriceResponse {
    #[serde(default)]
    pub submitted: bool,
    #[serde(default)]
    pub tx_hash: Option<String>,
}
