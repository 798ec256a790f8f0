//! Request and response models.
//!
//! - [`CompanyDto`], [`ProductDto`] - Client-facing views, projected by field
//! - [`CompanyForCreation`], [`CompanyForUpdate`] - Company request bodies
//! - [`ProductForCreation`], [`ProductForUpdate`] - Product request bodies
//! - [`ValidationErrors`] - Collected input failures (HTTP 422)

mod company;
mod product;
mod validation;

pub use company::{CompanyDto, CompanyForCreation, CompanyForUpdate, CompanyRepresentation};
pub use product::{ProductDto, ProductForCreation, ProductForUpdate};
pub use validation::{Validate, ValidationErrors, validate_each};
