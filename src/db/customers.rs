use rusqlite::{params, Connection, Row};
use tracing::info;

use super::error::StoreError;
use super::schema::{insert_sql, select_all_sql};
use crate::models::{Customer, NewCustomer};

/// Insert a new customer row, returning the hydrated struct so callers can
/// report the assigned id without re-querying.
pub fn insert_customer(conn: &Connection, customer: &NewCustomer) -> Result<Customer, StoreError> {
    conn.execute(
        &insert_sql(),
        params![
            customer.name,
            customer.birthday,
            customer.email,
            customer.phone,
            customer.address,
            customer.contact_method.as_str(),
        ],
    )?;

    let id = conn.last_insert_rowid();
    info!(id, "customer record appended");
    Ok(Customer::from_new(id, customer))
}

/// Retrieve every customer in id order. Columns are read by name from the
/// descriptor-built SELECT; nullable text columns come back as empty strings
/// so rows written by other tools still render.
pub fn fetch_customers(conn: &Connection) -> Result<Vec<Customer>, StoreError> {
    let mut stmt = conn.prepare(&select_all_sql())?;

    let customers = stmt
        .query_map([], customer_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(customers)
}

fn customer_from_row(row: &Row<'_>) -> rusqlite::Result<Customer> {
    let text = |column: &str| -> rusqlite::Result<String> {
        Ok(row.get::<_, Option<String>>(column)?.unwrap_or_default())
    };

    Ok(Customer {
        id: row.get("id")?,
        name: text("name")?,
        birthday: text("birthday")?,
        email: text("email")?,
        phone: text("phone")?,
        address: text("address")?,
        contact_method: text("contact_method")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_customers_table;
    use crate::models::ContactMethod;

    fn memory_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_customers_table(&conn).unwrap();
        conn
    }

    fn ada() -> NewCustomer {
        NewCustomer {
            name: "Ada Lovelace".into(),
            birthday: "1815-12-10".into(),
            email: "ada@example.com".into(),
            phone: String::new(),
            address: String::new(),
            contact_method: ContactMethod::Mail,
        }
    }

    #[test]
    fn insert_stores_exact_values() {
        let conn = memory_conn();

        let stored = insert_customer(&conn, &ada()).unwrap();

        assert_eq!(stored.id, 1);
        let fetched = fetch_customers(&conn).unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0], stored);
        assert_eq!(fetched[0].contact_method, "Mail");
        assert_eq!(fetched[0].phone, "");
    }

    #[test]
    fn ids_increase_with_each_insert() {
        let conn = memory_conn();
        let first = insert_customer(&conn, &ada()).unwrap();
        let second = insert_customer(
            &conn,
            &NewCustomer {
                name: "Charles Babbage".into(),
                ..NewCustomer::default()
            },
        )
        .unwrap();

        assert_eq!(second.id, first.id + 1);
        assert_eq!(second.contact_method, "Email");
    }

    #[test]
    fn fetch_maps_null_columns_to_empty_text() {
        let conn = memory_conn();
        conn.execute("INSERT INTO customers (name) VALUES ('Only Name')", [])
            .unwrap();

        let fetched = fetch_customers(&conn).unwrap();

        assert_eq!(fetched[0].name, "Only Name");
        assert_eq!(fetched[0].birthday, "");
        assert_eq!(fetched[0].contact_method, "");
    }

    #[test]
    fn fetch_fails_when_table_is_missing() {
        let conn = Connection::open_in_memory().unwrap();

        let err = fetch_customers(&conn).unwrap_err();

        assert!(err.to_string().contains("no such table"));
    }
}
