use domain_products::Product;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Body of `POST /orders/checkout`
///
/// Ids are kept as strings; one that is not a UUID cannot name a stored
/// product and fails checkout like any other unknown id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub product_ids: Vec<String>,
}

/// Short form of a product bought in a checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PurchasedProduct {
    pub id: Uuid,
    pub name: String,
}

impl From<&Product> for PurchasedProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub success: bool,
    pub message: String,
    pub purchased_products: Vec<PurchasedProduct>,
}

impl CheckoutResponse {
    pub fn new(purchased_products: Vec<PurchasedProduct>) -> Self {
        Self {
            success: true,
            message: "Checkout successful".to_string(),
            purchased_products,
        }
    }
}

/// Body of `GET /orders/purchased`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PurchasedResponse {
    pub success: bool,
    pub products: Vec<Product>,
}

/// Parse every id, or `None` if any of them is not a UUID.
pub fn parse_ids(raw: &[String]) -> Option<Vec<Uuid>> {
    raw.iter().map(|id| Uuid::parse_str(id.trim()).ok()).collect()
}

/// Drop repeated ids, keeping the first occurrence of each.
pub fn dedupe_ids(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}
