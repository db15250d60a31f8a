use chrono::{DateTime, Utc};
use domain_vector::VectorMetadata;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Sales counters carried on every product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SalesData {
    #[serde(default)]
    pub units_sold: u64,
    #[serde(default)]
    pub last_month_revenue: f64,
}

/// Product entity - represents a product stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id", with = "database::mongodb::serde_uuid")]
    #[schema(value_type = String, format = Uuid)]
    pub id: Uuid,
    /// Product name
    pub name: String,
    /// Product category, e.g. "tea" or "tincture"
    #[serde(rename = "type")]
    pub product_type: String,
    /// Free-text description
    pub description: String,
    /// Effects such as "calm" or "focus"
    #[serde(default)]
    pub effects: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub price: f64,
    #[serde(default)]
    pub sales_data: SalesData,
    /// Creation timestamp
    #[serde(rename = "createdAt", with = "database::mongodb::serde_timestamp")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    #[serde(rename = "updatedAt", with = "database::mongodb::serde_timestamp")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

/// Rejects strings that are empty after trimming.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// DTO for creating a new product
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(custom(function = "not_blank"))]
    pub product_type: String,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[validate(length(min = 1, message = "at least one effect is required"))]
    #[serde(default)]
    pub effects: Vec<String>,
    #[validate(length(min = 1, message = "at least one ingredient is required"))]
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[validate(range(exclusive_min = 0.0, message = "price must be greater than 0"))]
    pub price: f64,
    #[serde(default)]
    pub sales_data: Option<SalesData>,
}

/// DTO for updating an existing product
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[validate(custom(function = "not_blank"))]
    pub product_type: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "at least one effect is required"))]
    pub effects: Option<Vec<String>>,
    #[validate(length(min = 1, message = "at least one ingredient is required"))]
    pub ingredients: Option<Vec<String>>,
    #[validate(range(exclusive_min = 0.0, message = "price must be greater than 0"))]
    pub price: Option<f64>,
    pub sales_data: Option<SalesData>,
}

/// Body of `POST /products` and `POST /products/bulk-upload`.
///
/// Items stay raw so one malformed entry cannot reject the whole batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateProductsRequest {
    #[serde(default)]
    #[schema(value_type = Vec<CreateProduct>)]
    pub products: Vec<serde_json::Value>,
}

impl CreateProduct {
    /// Decode one raw bulk item. The error names the offending field and
    /// carries the item's `name` when it has one.
    pub fn from_item(item: serde_json::Value) -> Result<Self, BulkItemError> {
        let name = item
            .get("name")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("Unknown")
            .to_string();

        serde_json::from_value(item).map_err(|e| BulkItemError {
            name,
            error: e.to_string(),
        })
    }
}

/// Per-item success in a bulk insert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BulkItemSuccess {
    #[schema(value_type = String, format = Uuid)]
    pub id: Uuid,
    pub name: String,
    /// Always "success"
    pub status: String,
}

/// Per-item failure in a bulk insert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BulkItemError {
    pub name: String,
    pub error: String,
}

/// Outcome of a bulk insert; `errors` is omitted when every item succeeded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BulkInsertResult {
    pub message: String,
    pub results: Vec<BulkItemSuccess>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<BulkItemError>>,
}

impl BulkInsertResult {
    pub fn new(results: Vec<BulkItemSuccess>, errors: Vec<BulkItemError>) -> Self {
        Self {
            message: format!(
                "Successfully processed {} products with {} errors",
                results.len(),
                errors.len()
            ),
            results,
            errors: (!errors.is_empty()).then_some(errors),
        }
    }
}

pub const DEFAULT_SEARCH_LIMIT: usize = 10;
pub const MAX_SEARCH_LIMIT: usize = 100;
pub const DEFAULT_RECOMMEND_LIMIT: usize = 5;

/// Query parameters for semantic search
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Natural-language query
    pub q: Option<String>,
    /// Maximum number of results (default 10, capped at 100)
    pub limit: Option<usize>,
}

/// Query parameters for recommendations
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct RecommendationQuery {
    /// Desired effect, e.g. "relaxing"
    pub effect: Option<String>,
    /// Product type, e.g. "tea"
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    /// Maximum number of results (default 5, capped at 100)
    pub limit: Option<usize>,
}

/// Query text sent to the embedding model for recommendations.
pub fn recommendation_query(effect: Option<&str>, product_type: Option<&str>) -> String {
    let mut text = String::from("Recommend products");
    if let Some(effect) = effect.map(str::trim).filter(|e| !e.is_empty()) {
        text.push_str(&format!(" with {} effect", effect));
    }
    if let Some(product_type) = product_type.map(str::trim).filter(|t| !t.is_empty()) {
        text.push_str(&format!(" of type {}", product_type));
    }
    text
}

impl Product {
    /// Create a new product from CreateProduct DTO
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            product_type: input.product_type,
            description: input.description,
            effects: input.effects,
            ingredients: input.ingredients,
            price: input.price,
            sales_data: input.sales_data.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from UpdateProduct DTO
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(product_type) = update.product_type {
            self.product_type = product_type;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(effects) = update.effects {
            self.effects = effects;
        }
        if let Some(ingredients) = update.ingredients {
            self.ingredients = ingredients;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(sales_data) = update.sales_data {
            self.sales_data = sales_data;
        }
        self.updated_at = Utc::now();
    }

    /// Text projection that is embedded for the vector index
    pub fn embedding_text(&self) -> String {
        format!(
            "Product: {}\nType: {}\nDescription: {}\nEffects: {}\nIngredients: {}",
            self.name,
            self.product_type,
            self.description,
            self.effects.join(", "),
            self.ingredients.join(", ")
        )
    }

    /// Denormalized fields stored next to the vector
    pub fn vector_metadata(&self) -> VectorMetadata {
        VectorMetadata {
            name: self.name.clone(),
            product_type: self.product_type.clone(),
            effects: self.effects.join(","),
            ingredients: self.ingredients.join(","),
            product_id: self.id.to_string(),
        }
    }
}
