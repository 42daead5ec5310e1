//! Persistence module split across logical submodules.

mod connection;
mod customers;
mod error;
mod schema;

pub use connection::{create_customers_table, ensure_schema, CustomerStore};
pub use customers::{fetch_customers, insert_customer};
pub use error::StoreError;
pub use schema::{headers, writable_columns, Column, CUSTOMERS_TABLE, CUSTOMER_COLUMNS};
