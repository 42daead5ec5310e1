//! Single description of the `customers` table. The writer, the reader, and
//! the viewer's headers are all derived from `CUSTOMER_COLUMNS`, so the column
//! order lives in exactly one place.

/// Name of the only table the application touches.
pub const CUSTOMERS_TABLE: &str = "customers";

/// One column of the persisted layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static str,
    /// Extra column constraint, empty when the column has none.
    pub constraint: &'static str,
    /// Whether SQLite assigns the value on insert.
    pub generated: bool,
}

impl Column {
    const fn text(name: &'static str) -> Self {
        Self {
            name,
            sql_type: "TEXT",
            constraint: "",
            generated: false,
        }
    }

    /// Header shown above the column: first letter uppercased, the rest
    /// lowercased (`contact_method` becomes `Contact_method`).
    pub fn header(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => String::new(),
        }
    }

    fn definition(&self) -> String {
        if self.constraint.is_empty() {
            format!("{} {}", self.name, self.sql_type)
        } else {
            format!("{} {} {}", self.name, self.sql_type, self.constraint)
        }
    }
}

/// Persisted layout of the `customers` table, in column order.
pub static CUSTOMER_COLUMNS: [Column; 7] = [
    Column {
        name: "id",
        sql_type: "INTEGER",
        constraint: "PRIMARY KEY AUTOINCREMENT",
        generated: true,
    },
    Column {
        name: "name",
        sql_type: "TEXT",
        constraint: "NOT NULL",
        generated: false,
    },
    Column::text("birthday"),
    Column::text("email"),
    Column::text("phone"),
    Column::text("address"),
    Column::text("contact_method"),
];

/// Columns the writer supplies values for.
pub fn writable_columns() -> impl Iterator<Item = &'static Column> {
    CUSTOMER_COLUMNS.iter().filter(|column| !column.generated)
}

/// Capitalized headers for every column.
pub fn headers() -> Vec<String> {
    CUSTOMER_COLUMNS.iter().map(Column::header).collect()
}

pub(crate) fn create_table_sql() -> String {
    let columns = CUSTOMER_COLUMNS
        .iter()
        .map(|column| format!("    {}", column.definition()))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("CREATE TABLE IF NOT EXISTS {CUSTOMERS_TABLE} (\n{columns}\n)")
}

pub(crate) fn insert_sql() -> String {
    let names: Vec<&str> = writable_columns().map(|column| column.name).collect();
    let placeholders: Vec<String> = (1..=names.len()).map(|idx| format!("?{idx}")).collect();
    format!(
        "INSERT INTO {CUSTOMERS_TABLE} ({}) VALUES ({})",
        names.join(", "),
        placeholders.join(", ")
    )
}

pub(crate) fn select_all_sql() -> String {
    let names: Vec<&str> = CUSTOMER_COLUMNS.iter().map(|column| column.name).collect();
    format!("SELECT {} FROM {CUSTOMERS_TABLE} ORDER BY id", names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_capitalize_column_names() {
        assert_eq!(
            headers(),
            vec!["Id", "Name", "Birthday", "Email", "Phone", "Address", "Contact_method"]
        );
    }

    #[test]
    fn create_statement_lists_columns_in_order() {
        let sql = create_table_sql();
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS customers ("));
        assert!(sql.contains("id INTEGER PRIMARY KEY AUTOINCREMENT"));
        assert!(sql.contains("name TEXT NOT NULL"));
        let birthday = sql.find("birthday TEXT").unwrap();
        let contact = sql.find("contact_method TEXT").unwrap();
        assert!(birthday < contact);
    }

    #[test]
    fn insert_statement_skips_generated_id() {
        assert_eq!(
            insert_sql(),
            "INSERT INTO customers (name, birthday, email, phone, address, contact_method) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
        );
    }

    #[test]
    fn select_statement_reads_every_column() {
        assert_eq!(
            select_all_sql(),
            "SELECT id, name, birthday, email, phone, address, contact_method FROM customers ORDER BY id"
        );
    }
}
