//! Test fixtures for persistence layer testing.
//!
//! Provides a view type standing in for the REST layer's company DTO, plus
//! ready-made company sets.

use chrono::{DateTime, TimeZone, Utc};

use hsl_persistence::mapping::{COMPANY_VIEW, PRODUCT_VIEW};
use hsl_persistence::types::{Company, FieldAccessors, FieldValue, Product, Shaped};

/// Client-facing company view.
#[derive(Debug, Clone)]
pub struct CompanyView {
    pub id: String,
    pub name: String,
    pub age: i64,
    pub location: Option<String>,
}

impl Shaped for CompanyView {
    const TYPE_NAME: &'static str = COMPANY_VIEW;

    fn accessors() -> FieldAccessors<Self> {
        FieldAccessors::<Self>::new(Self::TYPE_NAME)
            .field("id", |c| FieldValue::text(&c.id))
            .field("name", |c| FieldValue::text(&c.name))
            .field("age", |c| FieldValue::Integer(c.age))
            .field("location", |c| FieldValue::optional_text(c.location.as_deref()))
    }
}

/// Client-facing product view.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
}

impl Shaped for ProductView {
    const TYPE_NAME: &'static str = PRODUCT_VIEW;

    fn accessors() -> FieldAccessors<Self> {
        FieldAccessors::<Self>::new(Self::TYPE_NAME)
            .field("id", |p| FieldValue::text(&p.id))
            .field("name", |p| FieldValue::text(&p.name))
    }
}

/// Returns midnight on 1 June of the given year.
pub fn founded(year: i32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, 6, 1, 0, 0, 0).unwrap()
}

/// Twenty-five companies named `Company 01` to `Company 25`, inserted in
/// reverse name order so that sorting is observable.
pub fn numbered_companies() -> Vec<Company> {
    (1..=25)
        .rev()
        .map(|n| Company::new(format!("Company {:02}", n), founded(1970 + n)))
        .collect()
}

/// A small, varied set of companies with products.
pub fn sample_companies() -> Vec<Company> {
    vec![
        Company::new("MediSoft", founded(1998))
            .with_location("Leeds")
            .with_products(vec![
                Product::new(uuid::Uuid::nil(), "Ward Manager"),
                Product::new(uuid::Uuid::nil(), "Bed Planner"),
            ]),
        Company::new("CareCode", founded(2012)).with_location("York"),
        Company::new("Clinical Care Systems", founded(1985))
            .with_location("leeds")
            .with_date_of_demise(founded(2019)),
        Company::new("NHS Digital Partners", founded(2005)),
    ]
}
