//! ListingStorage implementation for SQLite.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, Row, params};
use uuid::Uuid;

use crate::core::{ListingStorage, already_exists, company_not_found, product_not_found};
use crate::error::{BackendError, StorageError, StorageResult};
use crate::types::{Company, CompanyFilter, Product, Shaped};

use super::SqliteBackend;

const COMPANY_COLUMNS: &str = "id, name, location, start_date, date_of_demise";
const PRODUCT_COLUMNS: &str = "id, company_id, name";

fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "sqlite".to_string(),
        message,
        source: None,
    })
}

fn serialization_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::SerializationError { message })
}

fn parse_uuid(value: &str) -> StorageResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| serialization_error(format!("Invalid id '{}': {}", value, e)))
}

fn parse_timestamp(value: &str) -> StorageResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| serialization_error(format!("Invalid timestamp '{}': {}", value, e)))
}

/// Raw company columns, decoded after the statement finishes.
struct CompanyRow {
    id: String,
    name: String,
    location: Option<String>,
    start_date: String,
    date_of_demise: Option<String>,
}

impl CompanyRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            location: row.get(2)?,
            start_date: row.get(3)?,
            date_of_demise: row.get(4)?,
        })
    }

    fn into_company(self) -> StorageResult<Company> {
        Ok(Company {
            id: parse_uuid(&self.id)?,
            name: self.name,
            location: self.location,
            start_date: parse_timestamp(&self.start_date)?,
            date_of_demise: self
                .date_of_demise
                .as_deref()
                .map(parse_timestamp)
                .transpose()?,
            products: Vec::new(),
        })
    }
}

struct ProductRow {
    id: String,
    company_id: String,
    name: String,
}

impl ProductRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            company_id: row.get(1)?,
            name: row.get(2)?,
        })
    }

    fn into_product(self) -> StorageResult<Product> {
        Ok(Product {
            id: parse_uuid(&self.id)?,
            company_id: parse_uuid(&self.company_id)?,
            name: self.name,
        })
    }
}

fn insert_product(conn: &rusqlite::Connection, product: &Product) -> StorageResult<()> {
    conn.execute(
        "INSERT INTO products (id, company_id, name) VALUES (?1, ?2, ?3)",
        params![
            product.id.to_string(),
            product.company_id.to_string(),
            product.name
        ],
    )
    .map_err(|e| internal_error(format!("Failed to insert product: {}", e)))?;
    Ok(())
}

fn product_id_exists(conn: &rusqlite::Connection, id: Uuid) -> StorageResult<bool> {
    conn.query_row(
        "SELECT 1 FROM products WHERE id = ?1",
        params![id.to_string()],
        |_| Ok(()),
    )
    .optional()
    .map(|found| found.is_some())
    .map_err(|e| internal_error(format!("Failed to check product existence: {}", e)))
}

fn company_id_exists(conn: &rusqlite::Connection, id: Uuid) -> StorageResult<bool> {
    conn.query_row(
        "SELECT 1 FROM companies WHERE id = ?1",
        params![id.to_string()],
        |_| Ok(()),
    )
    .optional()
    .map(|found| found.is_some())
    .map_err(|e| internal_error(format!("Failed to check company existence: {}", e)))
}

#[async_trait]
impl ListingStorage for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn filter_companies(&self, filter: &CompanyFilter) -> StorageResult<Vec<Company>> {
        let filter = filter.normalized();
        let conn = self.get_connection()?;

        let sql = format!(
            "SELECT {} FROM companies
             WHERE (?1 IS NULL OR lower(trim(name)) = lower(?1))
               AND (?2 IS NULL OR lower(trim(location)) = lower(?2))
               AND (?3 IS NULL OR instr(lower(name), lower(?3)) > 0)
             ORDER BY seq",
            COMPANY_COLUMNS
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| internal_error(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map(
                params![filter.name, filter.location, filter.search_query],
                CompanyRow::read,
            )
            .map_err(|e| internal_error(format!("Failed to query companies: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| internal_error(format!("Failed to read company row: {}", e)))?;

        rows.into_iter().map(CompanyRow::into_company).collect()
    }

    async fn get_company(&self, id: Uuid) -> StorageResult<Option<Company>> {
        let conn = self.get_connection()?;

        let row = conn
            .query_row(
                &format!("SELECT {} FROM companies WHERE id = ?1", COMPANY_COLUMNS),
                params![id.to_string()],
                CompanyRow::read,
            )
            .optional()
            .map_err(|e| internal_error(format!("Failed to read company: {}", e)))?;

        row.map(CompanyRow::into_company).transpose()
    }

    async fn get_companies(&self, ids: &[Uuid]) -> StorageResult<Vec<Company>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.get_connection()?;
        let placeholders: Vec<String> = (1..=ids.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "SELECT {} FROM companies WHERE id IN ({}) ORDER BY seq",
            COMPANY_COLUMNS,
            placeholders.join(", ")
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| internal_error(format!("Failed to prepare query: {}", e)))?;

        let id_strings: Vec<String> = ids.iter().map(Uuid::to_string).collect();
        let rows = stmt
            .query_map(
                rusqlite::params_from_iter(id_strings.iter()),
                CompanyRow::read,
            )
            .map_err(|e| internal_error(format!("Failed to query companies: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| internal_error(format!("Failed to read company row: {}", e)))?;

        rows.into_iter().map(CompanyRow::into_company).collect()
    }

    async fn add_company(&self, mut company: Company) -> StorageResult<Company> {
        let mut conn = self.get_connection()?;

        if company_id_exists(&conn, company.id)? {
            return Err(already_exists(Company::TYPE_NAME, company.id));
        }
        for product in &company.products {
            if product_id_exists(&conn, product.id)? {
                return Err(already_exists(Product::TYPE_NAME, product.id));
            }
        }

        let tx = conn
            .transaction()
            .map_err(|e| internal_error(format!("Failed to begin transaction: {}", e)))?;

        tx.execute(
            "INSERT INTO companies (id, name, location, start_date, date_of_demise)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                company.id.to_string(),
                company.name,
                company.location,
                company.start_date.to_rfc3339(),
                company.date_of_demise.map(|d| d.to_rfc3339()),
            ],
        )
        .map_err(|e| internal_error(format!("Failed to insert company: {}", e)))?;

        for mut product in std::mem::take(&mut company.products) {
            product.company_id = company.id;
            insert_product(&tx, &product)?;
        }

        tx.commit()
            .map_err(|e| internal_error(format!("Failed to commit transaction: {}", e)))?;

        Ok(company)
    }

    async fn update_company(&self, company: &Company) -> StorageResult<Company> {
        let conn = self.get_connection()?;

        let updated = conn
            .execute(
                "UPDATE companies
                 SET name = ?2, location = ?3, start_date = ?4, date_of_demise = ?5
                 WHERE id = ?1",
                params![
                    company.id.to_string(),
                    company.name,
                    company.location,
                    company.start_date.to_rfc3339(),
                    company.date_of_demise.map(|d| d.to_rfc3339()),
                ],
            )
            .map_err(|e| internal_error(format!("Failed to update company: {}", e)))?;

        if updated == 0 {
            return Err(company_not_found(company.id));
        }

        let mut stored = company.clone();
        stored.products.clear();
        Ok(stored)
    }

    async fn delete_company(&self, id: Uuid) -> StorageResult<()> {
        let conn = self.get_connection()?;

        let deleted = conn
            .execute(
                "DELETE FROM companies WHERE id = ?1",
                params![id.to_string()],
            )
            .map_err(|e| internal_error(format!("Failed to delete company: {}", e)))?;

        if deleted == 0 {
            return Err(company_not_found(id));
        }
        Ok(())
    }

    async fn delete_companies(&self) -> StorageResult<usize> {
        let conn = self.get_connection()?;

        conn.execute("DELETE FROM products", [])
            .map_err(|e| internal_error(format!("Failed to delete products: {}", e)))?;
        conn.execute("DELETE FROM companies", [])
            .map_err(|e| internal_error(format!("Failed to delete companies: {}", e)))
    }

    async fn get_products_for_company(&self, company_id: Uuid) -> StorageResult<Vec<Product>> {
        let conn = self.get_connection()?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM products WHERE company_id = ?1 ORDER BY seq",
                PRODUCT_COLUMNS
            ))
            .map_err(|e| internal_error(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map(params![company_id.to_string()], ProductRow::read)
            .map_err(|e| internal_error(format!("Failed to query products: {}", e)))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| internal_error(format!("Failed to read product row: {}", e)))?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    async fn get_product(&self, company_id: Uuid, id: Uuid) -> StorageResult<Option<Product>> {
        let conn = self.get_connection()?;

        let row = conn
            .query_row(
                &format!(
                    "SELECT {} FROM products WHERE id = ?1 AND company_id = ?2",
                    PRODUCT_COLUMNS
                ),
                params![id.to_string(), company_id.to_string()],
                ProductRow::read,
            )
            .optional()
            .map_err(|e| internal_error(format!("Failed to read product: {}", e)))?;

        row.map(ProductRow::into_product).transpose()
    }

    async fn add_product(&self, product: Product) -> StorageResult<Product> {
        let conn = self.get_connection()?;

        if !company_id_exists(&conn, product.company_id)? {
            return Err(company_not_found(product.company_id));
        }
        if product_id_exists(&conn, product.id)? {
            return Err(already_exists(Product::TYPE_NAME, product.id));
        }

        insert_product(&conn, &product)?;
        Ok(product)
    }

    async fn update_product(&self, product: &Product) -> StorageResult<Product> {
        let conn = self.get_connection()?;

        let updated = conn
            .execute(
                "UPDATE products SET name = ?3 WHERE id = ?1 AND company_id = ?2",
                params![
                    product.id.to_string(),
                    product.company_id.to_string(),
                    product.name
                ],
            )
            .map_err(|e| internal_error(format!("Failed to update product: {}", e)))?;

        if updated == 0 {
            return Err(product_not_found(product.id));
        }
        Ok(product.clone())
    }

    async fn delete_product(&self, company_id: Uuid, id: Uuid) -> StorageResult<()> {
        let conn = self.get_connection()?;

        let deleted = conn
            .execute(
                "DELETE FROM products WHERE id = ?1 AND company_id = ?2",
                params![id.to_string(), company_id.to_string()],
            )
            .map_err(|e| internal_error(format!("Failed to delete product: {}", e)))?;

        if deleted == 0 {
            return Err(product_not_found(id));
        }
        Ok(())
    }
}
