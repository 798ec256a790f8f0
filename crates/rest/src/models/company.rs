//! Company representations.
//!
//! Creation requests come in several shapes, chosen by the request's
//! content type. They all deserialize into [`CompanyForCreation`]; the
//! [`CompanyRepresentation`] decides which members are required.

use chrono::{DateTime, Utc};
use hsl_persistence::mapping::COMPANY_VIEW;
use hsl_persistence::types::{Company, FieldAccessors, FieldValue, Shaped};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::product::ProductForCreation;
use super::validation::{
    Validate, ValidationErrors, check_max_length, check_required_name, validate_each,
};

const NAME_TOO_LONG: &str = "The name shouldn't be longer than 50 characters.";
const LOCATION_TOO_LONG: &str = "The location shouldn't be longer than 50 characters.";

/// A company as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDto {
    pub id: Uuid,
    pub name: String,
    pub age: i64,
    pub location: Option<String>,
}

impl From<&Company> for CompanyDto {
    fn from(company: &Company) -> Self {
        Self {
            id: company.id,
            name: company.name.clone(),
            age: company.age(),
            location: company.location.clone(),
        }
    }
}

impl Shaped for CompanyDto {
    const TYPE_NAME: &'static str = COMPANY_VIEW;

    fn accessors() -> FieldAccessors<Self> {
        FieldAccessors::<Self>::new(Self::TYPE_NAME)
            .field("id", |c| FieldValue::text(c.id.to_string()))
            .field("name", |c| FieldValue::text(&c.name))
            .field("age", |c| FieldValue::Integer(c.age))
            .field("location", |c| FieldValue::optional_text(c.location.as_deref()))
    }
}

/// The payload variant of a company creation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyRepresentation {
    /// Name, start date, optional location and products.
    Full,
    /// As [`Full`](Self::Full), plus a required date of demise.
    WithDateOfDemise,
    /// A company that has ceased trading; the date of demise is required.
    Demised,
    /// As [`Full`](Self::Full), with the location required.
    WithLocation,
}

impl CompanyRepresentation {
    /// Content types accepted for company creation, with their variant.
    pub const MEDIA_TYPES: &'static [(&'static str, CompanyRepresentation)] = &[
        ("application/json", CompanyRepresentation::Full),
        (
            "application/vnd.marvin.company.full+json",
            CompanyRepresentation::Full,
        ),
        (
            "application/vnd.marvin.companywithdateofdemise.full+json",
            CompanyRepresentation::WithDateOfDemise,
        ),
        (
            "application/vnd.marvin.demisedcompany.full+json",
            CompanyRepresentation::Demised,
        ),
        (
            "application/vnd.marvin.companywithlocation.full+json",
            CompanyRepresentation::WithLocation,
        ),
    ];

    /// Looks up the variant for an essence string (`type/subtype`, no parameters).
    pub fn from_media_type(essence: &str) -> Option<Self> {
        Self::MEDIA_TYPES
            .iter()
            .find(|(media_type, _)| media_type.eq_ignore_ascii_case(essence))
            .map(|(_, representation)| *representation)
    }

    fn requires_date_of_demise(self) -> bool {
        matches!(
            self,
            CompanyRepresentation::WithDateOfDemise | CompanyRepresentation::Demised
        )
    }
}

/// Body of a company creation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyForCreation {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub date_of_demise: Option<DateTime<Utc>>,
    #[serde(default)]
    pub products: Vec<ProductForCreation>,
}

impl CompanyForCreation {
    /// Validates the body for the given representation.
    pub fn validate_as(&self, representation: CompanyRepresentation) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        check_required_name(
            &mut errors,
            "name",
            self.name.as_deref(),
            "The company needs a name.",
            NAME_TOO_LONG,
        );

        if self.start_date.is_none() {
            errors.add("startDate", "The company needs a start date.");
        }

        if representation == CompanyRepresentation::WithLocation
            && self.location.as_deref().is_none_or(|l| l.trim().is_empty())
        {
            errors.add("location", "The company needs a location.");
        }
        check_max_length(&mut errors, "location", self.location.as_deref(), LOCATION_TOO_LONG);

        if representation.requires_date_of_demise() {
            match (self.start_date, self.date_of_demise) {
                (_, None) => errors.add("dateOfDemise", "A demised company needs a date of demise."),
                (Some(start), Some(demise)) if demise < start => errors.add(
                    "dateOfDemise",
                    "The date of demise can't be earlier than the start date.",
                ),
                _ => {}
            }
        }

        errors.merge_nested("products", validate_each(&self.products));
        errors.into_result()
    }

    /// Builds the stored company. Call only after validation succeeds.
    pub fn into_company(self, representation: CompanyRepresentation) -> Company {
        let mut company = Company::new(
            self.name.unwrap_or_default().trim(),
            self.start_date.unwrap_or_else(Utc::now),
        );
        company.location = clean_optional(self.location);
        if representation.requires_date_of_demise() {
            company.date_of_demise = self.date_of_demise;
        }
        let products = self
            .products
            .into_iter()
            .map(|p| p.into_product(company.id))
            .collect();
        company.with_products(products)
    }
}

impl Validate for CompanyForCreation {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.validate_as(CompanyRepresentation::Full)
    }
}

/// Body of a company update, and the document a JSON Patch applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyForUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_of_demise: Option<DateTime<Utc>>,
}

impl CompanyForUpdate {
    /// Copies the updatable fields onto a stored company.
    pub fn apply_to(&self, company: &mut Company) {
        company.name = self.name.as_deref().unwrap_or_default().trim().to_string();
        company.location = clean_optional(self.location.clone());
        if let Some(start) = self.start_date {
            company.start_date = start;
        }
        company.date_of_demise = self.date_of_demise;
    }
}

impl From<&Company> for CompanyForUpdate {
    fn from(company: &Company) -> Self {
        Self {
            name: Some(company.name.clone()),
            location: company.location.clone(),
            start_date: Some(company.start_date),
            date_of_demise: company.date_of_demise,
        }
    }
}

impl Validate for CompanyForUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_required_name(
            &mut errors,
            "name",
            self.name.as_deref(),
            "You must enter a name.",
            NAME_TOO_LONG,
        );
        check_max_length(&mut errors, "location", self.location.as_deref(), LOCATION_TOO_LONG);
        if self.start_date.is_none() {
            errors.add("startDate", "You must enter a start date.");
        }
        if let (Some(start), Some(demise)) = (self.start_date, self.date_of_demise) {
            if demise < start {
                errors.add(
                    "dateOfDemise",
                    "The date of demise can't be earlier than the start date.",
                );
            }
        }
        errors.into_result()
    }
}

fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
