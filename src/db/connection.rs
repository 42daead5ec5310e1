use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};
use tracing::{debug, info};

use super::customers::{fetch_customers, insert_customer};
use super::error::StoreError;
use super::schema::{create_table_sql, CUSTOMERS_TABLE};
use crate::models::{Customer, NewCustomer};

/// Ensure the database file and the `customers` table exist. Safe to call any
/// number of times; the connection is closed before returning.
pub fn ensure_schema(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let conn = open_read_write(path)?;
    create_customers_table(&conn)?;
    info!(path = %path.display(), table = CUSTOMERS_TABLE, "schema ensured");
    Ok(())
}

/// Run the idempotent `CREATE TABLE IF NOT EXISTS` on an open connection.
pub fn create_customers_table(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(&create_table_sql(), [])?;
    Ok(())
}

fn open_read_write(path: &Path) -> Result<Connection, StoreError> {
    Connection::open(path).map_err(|source| StoreError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Open without the create flag so a missing file surfaces as an error rather
/// than an empty database.
fn open_read_only(path: &Path) -> Result<Connection, StoreError> {
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| StoreError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Handle on the storage file. Every operation opens its own connection and
/// drops it before returning, so two processes can share the file.
#[derive(Debug, Clone)]
pub struct CustomerStore {
    path: PathBuf,
}

impl CustomerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        ensure_schema(&self.path)
    }

    /// Append one record and return it with its assigned id.
    pub fn append(&self, customer: &NewCustomer) -> Result<Customer, StoreError> {
        let conn = open_read_write(&self.path)?;
        let stored = insert_customer(&conn, customer)?;
        debug!(id = stored.id, "connection released after append");
        Ok(stored)
    }

    /// Read every record in id order through a read-only connection.
    pub fn load_all(&self) -> Result<Vec<Customer>, StoreError> {
        let conn = open_read_only(&self.path)?;
        fetch_customers(&conn)
    }
}
