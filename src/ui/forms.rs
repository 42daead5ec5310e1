use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use thiserror::Error;

use crate::models::{ContactMethod, NewCustomer};

/// Width of the label column so every input starts at the same x offset.
pub(crate) const LABEL_WIDTH: usize = 28;

/// Fields available within the customer form, in tab order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum CustomerField {
    #[default]
    Name,
    Birthday,
    Email,
    Phone,
    Address,
    ContactMethod,
}

impl CustomerField {
    pub(crate) const ALL: [CustomerField; 6] = [
        CustomerField::Name,
        CustomerField::Birthday,
        CustomerField::Email,
        CustomerField::Phone,
        CustomerField::Address,
        CustomerField::ContactMethod,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            CustomerField::Name => "Full Name",
            CustomerField::Birthday => "Birthday (YYYY-MM-DD)",
            CustomerField::Email => "Email",
            CustomerField::Phone => "Phone Number",
            CustomerField::Address => "Address",
            CustomerField::ContactMethod => "Preferred Contact Method",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            CustomerField::Name => "<required>",
            CustomerField::Birthday => "YYYY-MM-DD",
            _ => "<optional>",
        }
    }

    fn index(self) -> usize {
        CustomerField::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or_default()
    }

    fn next(self) -> Self {
        CustomerField::ALL[(self.index() + 1) % CustomerField::ALL.len()]
    }

    fn previous(self) -> Self {
        let len = CustomerField::ALL.len();
        CustomerField::ALL[(self.index() + len - 1) % len]
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ValidationError {
    #[error("Full Name is a required field.")]
    MissingName,
}

/// Internal representation of the customer entry form.
#[derive(Debug, Default, Clone)]
pub(crate) struct CustomerForm {
    pub(crate) name: String,
    pub(crate) birthday: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) address: String,
    pub(crate) contact_method: ContactMethod,
    pub(crate) active: CustomerField,
}

impl CustomerForm {
    pub(crate) fn focus_next(&mut self) {
        self.active = self.active.next();
    }

    pub(crate) fn focus_previous(&mut self) {
        self.active = self.active.previous();
    }

    fn text_mut(&mut self, field: CustomerField) -> Option<&mut String> {
        match field {
            CustomerField::Name => Some(&mut self.name),
            CustomerField::Birthday => Some(&mut self.birthday),
            CustomerField::Email => Some(&mut self.email),
            CustomerField::Phone => Some(&mut self.phone),
            CustomerField::Address => Some(&mut self.address),
            CustomerField::ContactMethod => None,
        }
    }

    /// Current value of `field` as shown in the form.
    pub(crate) fn value(&self, field: CustomerField) -> &str {
        match field {
            CustomerField::Name => &self.name,
            CustomerField::Birthday => &self.birthday,
            CustomerField::Email => &self.email,
            CustomerField::Phone => &self.phone,
            CustomerField::Address => &self.address,
            CustomerField::ContactMethod => self.contact_method.as_str(),
        }
    }

    /// Append a character to the active text field. The contact method is a
    /// closed choice, so typing there is ignored.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.text_mut(self.active) {
            Some(value) => {
                value.push(ch);
                true
            }
            None => false,
        }
    }

    /// Remove the last character from the active text field.
    pub(crate) fn backspace(&mut self) {
        if let Some(value) = self.text_mut(self.active) {
            value.pop();
        }
    }

    /// Step the contact method forward or back when it has focus.
    pub(crate) fn cycle_contact_method(&mut self, forward: bool) -> bool {
        if self.active != CustomerField::ContactMethod {
            return false;
        }
        self.contact_method = if forward {
            self.contact_method.next()
        } else {
            self.contact_method.previous()
        };
        true
    }

    /// Check the required field and return the values exactly as entered.
    /// Only an empty name is rejected; whitespace counts as a name.
    pub(crate) fn parse_inputs(&self) -> Result<NewCustomer, ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        Ok(NewCustomer {
            name: self.name.clone(),
            birthday: self.birthday.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            contact_method: self.contact_method,
        })
    }

    /// Empty every field and put the contact method back on `Email`.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: CustomerField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;
        let label = format!("{:<width$}", format!("{}:", field.label()), width = LABEL_WIDTH);

        if field == CustomerField::ContactMethod {
            let style = if is_active {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            return Line::from(vec![
                Span::raw(label),
                Span::styled(format!("< {value} >"), style),
            ]);
        }

        let display = if value.is_empty() {
            field.placeholder().to_string()
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![Span::raw(label), Span::styled(display, style)])
    }

    /// Character count of the requested field, used to place the cursor.
    pub(crate) fn value_len(&self, field: CustomerField) -> usize {
        self.value(field).chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(form: &mut CustomerForm, text: &str) {
        for ch in text.chars() {
            form.push_char(ch);
        }
    }

    #[test]
    fn tab_order_wraps_around() {
        let mut form = CustomerForm::default();
        for _ in 0..CustomerField::ALL.len() {
            form.focus_next();
        }
        assert_eq!(form.active, CustomerField::Name);
        form.focus_previous();
        assert_eq!(form.active, CustomerField::ContactMethod);
    }

    #[test]
    fn typing_targets_the_active_field() {
        let mut form = CustomerForm::default();
        type_text(&mut form, "Ada");
        form.focus_next();
        type_text(&mut form, "1815-12-10");
        form.backspace();

        assert_eq!(form.name, "Ada");
        assert_eq!(form.birthday, "1815-12-1");
    }

    #[test]
    fn contact_method_ignores_typing_and_cycles() {
        let mut form = CustomerForm {
            active: CustomerField::ContactMethod,
            ..CustomerForm::default()
        };
        assert!(!form.push_char('x'));
        assert!(form.cycle_contact_method(true));
        assert_eq!(form.contact_method, ContactMethod::Phone);
        assert!(form.cycle_contact_method(false));
        assert!(form.cycle_contact_method(false));
        assert_eq!(form.contact_method, ContactMethod::Mail);
    }

    #[test]
    fn empty_name_fails_validation() {
        let form = CustomerForm {
            email: "someone@example.com".into(),
            ..CustomerForm::default()
        };
        assert_eq!(form.parse_inputs(), Err(ValidationError::MissingName));
    }

    #[test]
    fn whitespace_name_counts_as_present() {
        let form = CustomerForm {
            name: "   ".into(),
            ..CustomerForm::default()
        };
        assert_eq!(form.parse_inputs().unwrap().name, "   ");
    }

    #[test]
    fn parse_keeps_values_verbatim() {
        let form = CustomerForm {
            name: " Ada Lovelace ".into(),
            address: "12 St James's Square".into(),
            contact_method: ContactMethod::Mail,
            ..CustomerForm::default()
        };
        let parsed = form.parse_inputs().unwrap();
        assert_eq!(parsed.name, " Ada Lovelace ");
        assert_eq!(parsed.address, "12 St James's Square");
        assert_eq!(parsed.contact_method, ContactMethod::Mail);
    }

    #[test]
    fn clear_resets_every_field() {
        let mut form = CustomerForm {
            name: "Ada".into(),
            phone: "555".into(),
            contact_method: ContactMethod::Phone,
            active: CustomerField::Phone,
            ..CustomerForm::default()
        };
        form.clear();
        assert!(CustomerField::ALL[..5].iter().all(|f| form.value(*f).is_empty()));
        assert_eq!(form.value(CustomerField::ContactMethod), "Email");
        assert_eq!(form.active, CustomerField::Name);
    }
}
