//! Domain models that mirror the `customers` table. They stay plain data
//! holders so the persistence layer and the two screens can share them without
//! dragging UI or SQL concerns along.

use std::fmt;

use crate::db::CUSTOMER_COLUMNS;

/// Preferred channel for reaching a customer. The form offers exactly these
/// three choices and starts on `Email`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactMethod {
    #[default]
    Email,
    Phone,
    Mail,
}

impl ContactMethod {
    /// Every option in the order the form cycles through them.
    pub const ALL: [ContactMethod; 3] = [ContactMethod::Email, ContactMethod::Phone, ContactMethod::Mail];

    /// Text stored in the `contact_method` column.
    pub fn as_str(self) -> &'static str {
        match self {
            ContactMethod::Email => "Email",
            ContactMethod::Phone => "Phone",
            ContactMethod::Mail => "Mail",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ContactMethod::Email => ContactMethod::Phone,
            ContactMethod::Phone => ContactMethod::Mail,
            ContactMethod::Mail => ContactMethod::Email,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            ContactMethod::Email => ContactMethod::Mail,
            ContactMethod::Phone => ContactMethod::Email,
            ContactMethod::Mail => ContactMethod::Phone,
        }
    }
}

impl fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six values collected by the entry form. Everything except the contact
/// method is free-form text and is written exactly as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub birthday: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub contact_method: ContactMethod,
}

/// A stored row. `contact_method` keeps the raw column text so rows edited by
/// hand outside the application still display as they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Primary key assigned by SQLite on insert.
    pub id: i64,
    pub name: String,
    pub birthday: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub contact_method: String,
}

impl Customer {
    /// Hydrate a stored record from the values that were just inserted.
    pub fn from_new(id: i64, new: &NewCustomer) -> Self {
        Self {
            id,
            name: new.name.clone(),
            birthday: new.birthday.clone(),
            email: new.email.clone(),
            phone: new.phone.clone(),
            address: new.address.clone(),
            contact_method: new.contact_method.as_str().to_string(),
        }
    }

    /// Value of the named column, or `None` for a name outside the schema.
    pub fn field(&self, column: &str) -> Option<String> {
        let value = match column {
            "id" => return Some(self.id.to_string()),
            "name" => &self.name,
            "birthday" => &self.birthday,
            "email" => &self.email,
            "phone" => &self.phone,
            "address" => &self.address,
            "contact_method" => &self.contact_method,
            _ => return None,
        };
        Some(value.clone())
    }

    /// Row values in the order of `db::CUSTOMER_COLUMNS`.
    pub fn cells(&self) -> Vec<String> {
        CUSTOMER_COLUMNS
            .iter()
            .map(|column| self.field(column.name).unwrap_or_default())
            .collect()
    }
}
