//! Product representations.

use hsl_persistence::mapping::PRODUCT_VIEW;
use hsl_persistence::types::{FieldAccessors, FieldValue, Product, Shaped};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{Validate, ValidationErrors, check_required_name};

const NAME_TOO_LONG: &str = "The name shouldn't be longer than 50 characters.";

/// A product as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: Uuid,
    pub name: String,
}

impl From<&Product> for ProductDto {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
        }
    }
}

impl Shaped for ProductDto {
    const TYPE_NAME: &'static str = PRODUCT_VIEW;

    fn accessors() -> FieldAccessors<Self> {
        FieldAccessors::<Self>::new(Self::TYPE_NAME)
            .field("id", |p| FieldValue::text(p.id.to_string()))
            .field("name", |p| FieldValue::text(&p.name))
    }
}

/// Body of a product creation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForCreation {
    #[serde(default)]
    pub name: Option<String>,
}

impl ProductForCreation {
    /// Builds the stored product for a company.
    pub fn into_product(self, company_id: Uuid) -> Product {
        Product::new(company_id, self.name.unwrap_or_default().trim())
    }
}

impl Validate for ProductForCreation {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_required_name(
            &mut errors,
            "name",
            self.name.as_deref(),
            "The product needs a name.",
            NAME_TOO_LONG,
        );
        errors.into_result()
    }
}

/// Body of a product update, and the document a JSON Patch applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForUpdate {
    #[serde(default)]
    pub name: Option<String>,
}

impl ProductForUpdate {
    /// Copies the updatable fields onto a stored product.
    pub fn apply_to(&self, product: &mut Product) {
        product.name = self.name.as_deref().unwrap_or_default().trim().to_string();
    }
}

impl From<&Product> for ProductForUpdate {
    fn from(product: &Product) -> Self {
        Self {
            name: Some(product.name.clone()),
        }
    }
}

impl Validate for ProductForUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_required_name(
            &mut errors,
            "name",
            self.name.as_deref(),
            "You must enter a name.",
            NAME_TOO_LONG,
        );
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation_requires_name() {
        let errors = ProductForCreation::default().validate().unwrap_err();
        assert_eq!(
            errors.get("name"),
            Some(&["The product needs a name.".to_string()][..])
        );
    }

    #[test]
    fn test_update_requires_name() {
        let errors = ProductForUpdate { name: None }.validate().unwrap_err();
        assert_eq!(
            errors.get("name"),
            Some(&["You must enter a name.".to_string()][..])
        );
    }

    #[test]
    fn test_long_name_rejected() {
        let body = ProductForCreation {
            name: Some("n".repeat(51)),
        };
        let errors = body.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some(&[NAME_TOO_LONG.to_string()][..]));
    }

    #[test]
    fn test_into_product_trims() {
        let company_id = Uuid::new_v4();
        let product = ProductForCreation {
            name: Some("  Ward Manager ".to_string()),
        }
        .into_product(company_id);
        assert_eq!(product.name, "Ward Manager");
        assert_eq!(product.company_id, company_id);
    }

    #[test]
    fn test_dto_accessor_order() {
        let names: Vec<_> = ProductDto::accessors().names().collect();
        assert_eq!(names, vec!["id", "name"]);
    }
}
