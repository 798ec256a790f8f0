//! Stored company and product records.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{FieldAccessors, FieldValue, Shaped};

/// Maximum length of a company, product or location name.
pub const MAX_NAME_LENGTH: usize = 50;

/// A software company as held by the storage backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Unique identifier.
    pub id: Uuid,
    /// Company name.
    pub name: String,
    /// Where the company is based.
    pub location: Option<String>,
    /// When the company was founded.
    pub start_date: DateTime<Utc>,
    /// When the company ceased trading, if it has.
    pub date_of_demise: Option<DateTime<Utc>>,
    /// Products supplied with the company on creation.
    ///
    /// Backends store products separately and return companies with this
    /// list empty.
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Company {
    /// Creates a company with a fresh identifier.
    pub fn new(name: impl Into<String>, start_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            location: None,
            start_date,
            date_of_demise: None,
            products: Vec::new(),
        }
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the date of demise.
    pub fn with_date_of_demise(mut self, date: DateTime<Utc>) -> Self {
        self.date_of_demise = Some(date);
        self
    }

    /// Attaches products, re-parenting them onto this company.
    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        let id = self.id;
        self.products = products
            .into_iter()
            .map(|mut p| {
                p.company_id = id;
                p
            })
            .collect();
        self
    }

    /// Age in whole years as of now.
    pub fn age(&self) -> i64 {
        self.age_at(Utc::now())
    }

    /// Age in whole years at `now`, or at the date of demise when one is set.
    ///
    /// The count drops by one when the anniversary of the start date has not
    /// yet been reached in the final year.
    pub fn age_at(&self, now: DateTime<Utc>) -> i64 {
        let end = self.date_of_demise.unwrap_or(now);
        let start = self.start_date;
        let mut age = i64::from(end.year() - start.year());

        let end_key = (end.month(), end.day(), end.num_seconds_from_midnight());
        let start_key = (start.month(), start.day(), start.num_seconds_from_midnight());
        if end_key < start_key {
            age -= 1;
        }
        age
    }
}

impl Shaped for Company {
    const TYPE_NAME: &'static str = "Company";

    fn accessors() -> FieldAccessors<Self> {
        FieldAccessors::<Self>::new(Self::TYPE_NAME)
            .field("Id", |c| FieldValue::text(c.id.to_string()))
            .field("Name", |c| FieldValue::text(&c.name))
            .field("Location", |c| FieldValue::optional_text(c.location.as_deref()))
            .field("StartDate", |c| FieldValue::Timestamp(c.start_date))
            .field("DateOfDemise", |c| {
                FieldValue::optional_timestamp(c.date_of_demise)
            })
    }
}

/// A product supplied by a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier.
    pub id: Uuid,
    /// Owning company.
    pub company_id: Uuid,
    /// Product name.
    pub name: String,
}

impl Product {
    /// Creates a product with a fresh identifier.
    pub fn new(company_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_id,
            name: name.into(),
        }
    }

    /// Creates a product with a caller-chosen identifier.
    pub fn with_id(id: Uuid, company_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            company_id,
            name: name.into(),
        }
    }
}

impl Shaped for Product {
    const TYPE_NAME: &'static str = "Product";

    fn accessors() -> FieldAccessors<Self> {
        FieldAccessors::<Self>::new(Self::TYPE_NAME)
            .field("Id", |p| FieldValue::text(p.id.to_string()))
            .field("CompanyId", |p| FieldValue::text(p.company_id.to_string()))
            .field("Name", |p| FieldValue::text(&p.name))
    }
}
