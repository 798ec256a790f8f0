//! Test fixtures for REST API testing.
//!
//! Provides seeded company sets and request bodies.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Value, json};

use hsl_persistence::types::{Company, Product};
use uuid::Uuid;

/// Returns midnight on 1 June of the given year.
pub fn founded(year: i32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, 6, 1, 0, 0, 0).unwrap()
}

/// Twenty-five companies named `Company 01` to `Company 25`, inserted in
/// reverse name order. `Company 25` is the youngest.
pub fn numbered_companies() -> Vec<Company> {
    (1..=25)
        .rev()
        .map(|n| Company::new(format!("Company {:02}", n), founded(1970 + n)))
        .collect()
}

/// A small, varied set of companies. The first one has two products.
pub fn sample_companies() -> Vec<Company> {
    vec![
        Company::new("MediSoft", founded(1998))
            .with_location("Leeds")
            .with_products(vec![
                Product::new(Uuid::nil(), "Ward Manager"),
                Product::new(Uuid::nil(), "Bed Planner"),
            ]),
        Company::new("CareCode", founded(2012)).with_location("York"),
        Company::new("Clinical Care Systems", founded(1985))
            .with_location("leeds")
            .with_date_of_demise(founded(2019)),
        Company::new("NHS Digital Partners", founded(2005)),
    ]
}

/// A company with the given products, for product tests.
pub fn company_with_products(name: &str, products: &[&str]) -> Company {
    Company::new(name, founded(2001)).with_products(
        products
            .iter()
            .map(|p| Product::new(Uuid::nil(), *p))
            .collect(),
    )
}

/// A valid company creation body.
pub fn company_body(name: &str) -> Value {
    json!({
        "name": name,
        "startDate": "2001-03-15T00:00:00Z",
        "location": "Sheffield"
    })
}
