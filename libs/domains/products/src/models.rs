use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};
use utoipa::ToSchema;
use validator::Validate;

/// Product category
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantNames,
    ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ProductCategory {
    Scarves,
    Hats,
    Bags,
    HomeDecor,
    Amigurumi,
    Blankets,
}

/// Yarn weight class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum YarnWeight {
    Lace,
    Sport,
    Dk,
    Worsted,
    Chunky,
    SuperChunky,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DimensionUnit {
    #[default]
    Cm,
    Inches,
}

/// How hard the piece is to make
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

/// One yarn used in a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Material {
    #[validate(custom(function = "validate_not_blank"))]
    pub yarn: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<YarnWeight>,
}

/// Physical size; every measurement is optional
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Dimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub height: Option<f64>,
    #[serde(default)]
    pub unit: DimensionUnit,
}

fn default_true() -> bool {
    true
}

fn default_quantity() -> u32 {
    1
}

/// Product document as stored in the `products` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: ProductCategory,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to_make: Option<String>,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

/// `$` followed by the price with exactly two decimals.
///
/// Prices exactly halfway between two cents round up.
pub fn format_price(price: f64) -> String {
    // Only odd multiples of 1/8 land exactly on a half cent.
    let eighths = price * 8.0;
    if eighths.fract() == 0.0 && eighths.rem_euclid(2.0) == 1.0 {
        return format!("${:.2}", (price * 100.0).ceil() / 100.0);
    }
    format!("${:.2}", price)
}

/// Product as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    /// 24-character hex ObjectId
    #[schema(example = "65f1c0ffee0000000000beef")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Price with currency prefix, computed on read
    #[schema(example = "$45.00")]
    pub formatted_price: String,
    pub category: ProductCategory,
    pub images: Vec<String>,
    pub materials: Vec<Material>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to_make: Option<String>,
    pub in_stock: bool,
    pub quantity: u32,
    pub featured: bool,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn to_chrono(timestamp: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(timestamp.timestamp_millis()).unwrap_or_default()
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_hex(),
            formatted_price: format_price(product.price),
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            images: product.images,
            materials: product.materials,
            dimensions: product.dimensions,
            difficulty: product.difficulty,
            time_to_make: product.time_to_make,
            in_stock: product.in_stock,
            quantity: product.quantity,
            featured: product.featured,
            tags: product.tags,
            created_at: to_chrono(product.created_at),
            updated_at: to_chrono(product.updated_at),
        }
    }
}

fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), validator::ValidationError> {
    validate_not_blank(name)?;
    if name.trim().chars().count() > 100 {
        return Err(validator::ValidationError::new("name_too_long")
            .with_message("Product name cannot exceed 100 characters".into()));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), validator::ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(validator::ValidationError::new("invalid_price")
            .with_message("Price cannot be negative".into()));
    }
    Ok(())
}

fn validate_image_urls(images: &[String]) -> Result<(), validator::ValidationError> {
    if images
        .iter()
        .any(|url| !(url.starts_with("http://") || url.starts_with("https://")))
    {
        return Err(validator::ValidationError::new("invalid_image_url"));
    }
    Ok(())
}

/// Catalog entry as written by the seeding process
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(length(min = 1, max = 500))]
    pub description: String,
    #[validate(custom(function = "validate_price"))]
    pub price: f64,
    pub category: ProductCategory,
    #[serde(default)]
    #[validate(custom(function = "validate_image_urls"))]
    pub images: Vec<String>,
    #[serde(default)]
    #[validate(nested)]
    pub materials: Vec<Material>,
    #[serde(default)]
    #[validate(nested)]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub time_to_make: Option<String>,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewProduct {
    /// Normalize into a storable document: trimmed name, lowercase tags,
    /// fresh id and timestamps. Call `validate()` first.
    pub fn into_product(self) -> Product {
        let now = bson::DateTime::now();
        Product {
            id: ObjectId::new(),
            name: self.name.trim().to_string(),
            description: self.description,
            price: self.price,
            category: self.category,
            images: self.images,
            materials: self.materials,
            dimensions: self.dimensions,
            difficulty: self.difficulty,
            time_to_make: self.time_to_make,
            in_stock: self.in_stock,
            quantity: self.quantity,
            featured: self.featured,
            tags: self
                .tags
                .iter()
                .map(|tag| tag.trim().to_lowercase())
                .filter(|tag| !tag.is_empty())
                .collect(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn scarf() -> NewProduct {
        serde_json::from_value(json!({
            "name": "  Cozy Winter Scarf ",
            "description": "Super soft merino wool scarf in sage green.",
            "price": 45.0,
            "category": "scarves",
            "images": ["https://images.example.com/scarf.jpg"],
            "materials": [{"yarn": "Merino Wool", "color": "Sage Green", "weight": "worsted"}],
            "dimensions": {"length": 180, "width": 25},
            "tags": ["Winter", "COZY", " wool "]
        }))
        .unwrap()
    }

    #[test]
    fn test_category_round_trips_kebab_case() {
        assert_eq!(
            ProductCategory::from_str("home-decor").unwrap(),
            ProductCategory::HomeDecor
        );
        assert_eq!(ProductCategory::HomeDecor.to_string(), "home-decor");
        assert_eq!(
            serde_json::to_value(ProductCategory::HomeDecor).unwrap(),
            json!("home-decor")
        );
    }

    #[test]
    fn test_category_parse_is_case_sensitive() {
        assert!(ProductCategory::from_str("Hats").is_err());
        assert!(ProductCategory::from_str("hat").is_err());
    }

    #[test]
    fn test_category_variants_in_declaration_order() {
        assert_eq!(
            ProductCategory::VARIANTS,
            &["scarves", "hats", "bags", "home-decor", "amigurumi", "blankets"]
        );
    }

    #[test]
    fn test_yarn_weight_super_chunky() {
        let weight: YarnWeight = serde_json::from_value(json!("super-chunky")).unwrap();
        assert_eq!(weight, YarnWeight::SuperChunky);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(45.0), "$45.00");
        assert_eq!(format_price(12.5), "$12.50");
        assert_eq!(format_price(0.0), "$0.00");
        assert_eq!(format_price(19.999), "$20.00");
    }

    #[test]
    fn test_format_price_rounds_half_cent_up() {
        assert_eq!(format_price(0.125), "$0.13");
        assert_eq!(format_price(2.375), "$2.38");
        assert_eq!(format_price(10.625), "$10.63");
        assert_eq!(format_price(7.875), "$7.88");
        // 1.005 is stored just below the half cent
        assert_eq!(format_price(1.005), "$1.00");
    }

    #[test]
    fn test_new_product_defaults() {
        let product = scarf();
        assert!(product.in_stock);
        assert_eq!(product.quantity, 1);
        assert!(!product.featured);
        assert_eq!(product.difficulty, Difficulty::Intermediate);
        assert_eq!(product.dimensions.unwrap().unit, DimensionUnit::Cm);
    }

    #[test]
    fn test_valid_product_passes_validation() {
        assert!(scarf().validate().is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut product = scarf();
        product.price = -1.0;
        let errors = product.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn test_overlong_name_rejected() {
        let mut product = scarf();
        product.name = "x".repeat(101);
        assert!(product.validate().is_err());

        product.name = format!("  {}  ", "x".repeat(100));
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_blank_name_and_description_rejected() {
        let mut product = scarf();
        product.name = "   ".into();
        product.description = String::new();
        let errors = product.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("description"));
    }

    #[test]
    fn test_non_http_image_rejected() {
        let mut product = scarf();
        product.images.push("ftp://images.example.com/scarf.jpg".into());
        assert!(product.validate().is_err());
    }

    #[test]
    fn test_nested_material_and_dimensions_validated() {
        let mut product = scarf();
        product.materials[0].color = " ".into();
        assert!(product.validate().is_err());

        let mut product = scarf();
        product.dimensions = Some(Dimensions {
            length: Some(-3.0),
            width: None,
            height: None,
            unit: DimensionUnit::Inches,
        });
        assert!(product.validate().is_err());
    }

    #[test]
    fn test_into_product_normalizes() {
        let product = scarf().into_product();
        assert_eq!(product.name, "Cozy Winter Scarf");
        assert_eq!(product.tags, vec!["winter", "cozy", "wool"]);
        assert_eq!(product.created_at, product.updated_at);
    }

    #[test]
    fn test_response_carries_formatted_price_and_hex_id() {
        let product = scarf().into_product();
        let id = product.id;
        let response = ProductResponse::from(product);

        assert_eq!(response.id, id.to_hex());
        assert_eq!(response.id.len(), 24);
        assert_eq!(response.formatted_price, "$45.00");

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["formattedPrice"], "$45.00");
        assert_eq!(body["inStock"], true);
        assert!(body.get("_id").is_none());
    }

    #[test]
    fn test_product_document_uses_mongo_field_names() {
        let product = scarf().into_product();
        let doc = bson::to_document(&product).unwrap();
        assert!(doc.get_object_id("_id").is_ok());
        assert!(doc.get_datetime("createdAt").is_ok());
        assert!(doc.contains_key("inStock"));
        assert_eq!(doc.get_str("category").unwrap(), "scarves");
    }
}
