//! Catalog product types.
//!
//! A product enters the catalog either through the form path (already
//! complete) or through the EAN import pipeline, where a minimal
//! [`NewProduct::placeholder`] is persisted first and later merged with the
//! marketplace attributes returned by the seller API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a catalog product.
///
/// `Pending` marks a placeholder awaiting enrichment; the transition to
/// `Active` happens when marketplace attributes are merged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Pending,
    Active,
    Inactive,
}

impl ProductStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProductStatus::Pending => "pending",
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
        }
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ProductStatus::Pending),
            "active" => Ok(ProductStatus::Active),
            "inactive" => Ok(ProductStatus::Inactive),
            other => Err(format!("unknown product status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Cm,
    In,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    Lb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: Decimal,
    pub width: Decimal,
    pub height: Decimal,
    pub unit: LengthUnit,
}

impl Dimensions {
    /// Zero-sized centimetre dimensions, used for placeholders.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            length: Decimal::ZERO,
            width: Decimal::ZERO,
            height: Decimal::ZERO,
            unit: LengthUnit::Cm,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    pub value: Decimal,
    pub unit: WeightUnit,
}

impl Weight {
    /// Zero kilogram weight, used for placeholders.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            value: Decimal::ZERO,
            unit: WeightUnit::Kg,
        }
    }
}

/// Marketplace attributes for one EAN code, as normalized from the seller
/// API response. Absence of an EAN from a batch response means the
/// marketplace could not resolve it — not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceAttributes {
    pub title: String,
    pub description: String,
    pub asin: Option<String>,
    pub price: Decimal,
    pub dimensions: Dimensions,
    pub weight: Weight,
    pub images: Vec<String>,
    pub browse_nodes: Vec<String>,
    pub sales_rank: Option<i64>,
    pub brand: Option<String>,
    pub list_price: Option<Decimal>,
    pub product_group: Option<String>,
    pub product_type: Option<String>,
}

/// A product record as written through the persistence gateway. The EAN code
/// is the natural key: writing the same code twice converges on one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub ean_code: String,
    pub asin: Option<String>,
    pub category: Option<String>,
    pub price: Decimal,
    pub dimensions: Dimensions,
    pub weight: Weight,
    pub images: Vec<String>,
    pub status: ProductStatus,
    pub browse_nodes: Vec<String>,
    pub sales_rank: Option<i64>,
    pub brand: Option<String>,
    pub list_price: Option<Decimal>,
    pub product_group: Option<String>,
    pub product_type: Option<String>,
}

impl NewProduct {
    /// Builds the minimal pending record persisted before enrichment, so a
    /// row exists for the EAN even if the marketplace lookup fails.
    #[must_use]
    pub fn placeholder(ean_code: &str) -> Self {
        Self {
            title: format!("Product {ean_code}"),
            description: "Fetching product details...".to_string(),
            ean_code: ean_code.to_string(),
            asin: None,
            category: None,
            price: Decimal::ZERO,
            dimensions: Dimensions::zero(),
            weight: Weight::zero(),
            images: Vec::new(),
            status: ProductStatus::Pending,
            browse_nodes: Vec::new(),
            sales_rank: None,
            brand: None,
            list_price: None,
            product_group: None,
            product_type: None,
        }
    }

    /// Merges marketplace attributes over a placeholder, transitioning the
    /// record to `Active`. The EAN code and category are kept as-is.
    #[must_use]
    pub fn enriched(ean_code: &str, attrs: &MarketplaceAttributes) -> Self {
        Self {
            title: attrs.title.clone(),
            description: attrs.description.clone(),
            ean_code: ean_code.to_string(),
            asin: attrs.asin.clone(),
            category: None,
            price: attrs.price,
            dimensions: attrs.dimensions.clone(),
            weight: attrs.weight.clone(),
            images: attrs.images.clone(),
            status: ProductStatus::Active,
            browse_nodes: attrs.browse_nodes.clone(),
            sales_rank: attrs.sales_rank,
            brand: attrs.brand.clone(),
            list_price: attrs.list_price,
            product_group: attrs.product_group.clone(),
            product_type: attrs.product_type.clone(),
        }
    }
}
