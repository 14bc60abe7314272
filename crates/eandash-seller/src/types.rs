use eandash_core::{Dimensions, MarketplaceAttributes, Weight};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Seller API credentials, stored per installation and passed opaquely into
/// each request. The import engine never inspects these.
#[derive(Clone, Serialize, Deserialize)]
pub struct SellerCredentials {
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    pub marketplace_id: String,
    pub merchant_id: String,
}

impl std::fmt::Debug for SellerCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SellerCredentials")
            .field("access_key", &"[redacted]")
            .field("secret_key", &"[redacted]")
            .field("region", &self.region)
            .field("marketplace_id", &self.marketplace_id)
            .field("merchant_id", &self.merchant_id)
            .finish()
    }
}

/// One product entry from a batch lookup response, as the seller API
/// serializes it (camelCase keys).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerProduct {
    pub title: String,
    pub description: String,
    pub asin: Option<String>,
    pub price: Decimal,
    pub dimensions: Dimensions,
    pub weight: Weight,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub browse_nodes: Vec<String>,
    pub sales_rank: Option<i64>,
    pub brand: Option<String>,
    pub list_price: Option<Decimal>,
    pub product_group: Option<String>,
    pub product_type: Option<String>,
}

impl From<SellerProduct> for MarketplaceAttributes {
    fn from(p: SellerProduct) -> Self {
        MarketplaceAttributes {
            title: p.title,
            description: p.description,
            asin: p.asin,
            price: p.price,
            dimensions: p.dimensions,
            weight: p.weight,
            images: p.images,
            browse_nodes: p.browse_nodes,
            sales_rank: p.sales_rank,
            brand: p.brand,
            list_price: p.list_price,
            product_group: p.product_group,
            product_type: p.product_type,
        }
    }
}

/// Result of a credential connection test against the seller API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionTest {
    pub success: bool,
    pub message: String,
    pub marketplace: Option<String>,
    pub rate_limit: Option<RateLimitInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitInfo {
    pub remaining: u32,
    pub total: u32,
    pub reset_time: Option<String>,
}
