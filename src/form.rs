//! Draft records and field validation for the registration and edit forms.
//!
//! Validation is a pure function from a draft to a set of per-field error
//! messages; an empty set means the draft may be submitted. The checks run
//! in a fixed order and a later check overwrites an earlier message for the
//! same field, so an empty email reports the format message rather than the
//! required message.

use crate::store::{UserFields, UserRecord};

/// The five editable fields, in focus order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Field {
    #[default]
    FullName,
    Email,
    Phone,
    Address,
    Profession,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::FullName,
        Field::Email,
        Field::Phone,
        Field::Address,
        Field::Profession,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::FullName => "Full Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Address => "Address",
            Field::Profession => "Profession",
        }
    }

    /// Profession is the only optional field.
    pub fn required(self) -> bool {
        !matches!(self, Field::Profession)
    }

    pub fn next(self) -> Field {
        match self {
            Field::FullName => Field::Email,
            Field::Email => Field::Phone,
            Field::Phone => Field::Address,
            Field::Address => Field::Profession,
            Field::Profession => Field::FullName,
        }
    }

    pub fn prev(self) -> Field {
        match self {
            Field::FullName => Field::Profession,
            Field::Email => Field::FullName,
            Field::Phone => Field::Email,
            Field::Address => Field::Phone,
            Field::Profession => Field::Address,
        }
    }
}

/// In-progress field values, distinct from any stored record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub profession: String,
}

impl UserDraft {
    /// Snapshot a stored record's mutable fields into a draft.
    /// A missing profession becomes the empty string.
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            full_name: record.fields.full_name.clone(),
            email: record.fields.email.clone(),
            phone: record.fields.phone.clone(),
            address: record.fields.address.clone(),
            profession: record.fields.profession.clone(),
        }
    }

    pub fn to_fields(&self) -> UserFields {
        UserFields {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            profession: self.profession.clone(),
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Address => &self.address,
            Field::Profession => &self.profession,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::FullName => &mut self.full_name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Address => &mut self.address,
            Field::Profession => &mut self.profession,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Per-field validation messages. Profession never carries one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::FullName => self.full_name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Phone => self.phone.as_deref(),
            Field::Address => self.address.as_deref(),
            Field::Profession => None,
        }
    }

    /// Drop the message for one field, leaving the others untouched.
    pub fn clear(&mut self, field: Field) {
        match field {
            Field::FullName => self.full_name = None,
            Field::Email => self.email = None,
            Field::Phone => self.phone = None,
            Field::Address => self.address = None,
            Field::Profession => {}
        }
    }
}

/// Validate a draft. Each check assigns into its field's slot
/// independently; the last assignment wins.
pub fn validate(draft: &UserDraft) -> FieldErrors {
    let mut errors = FieldErrors::default();
    if draft.full_name.trim().is_empty() {
        errors.full_name = Some("Full Name is required".to_string());
    }
    if draft.email.trim().is_empty() {
        errors.email = Some("Email is required".to_string());
    }
    if !is_valid_email(&draft.email) {
        errors.email = Some("Invalid email".to_string());
    }
    if draft.phone.trim().is_empty() {
        errors.phone = Some("Phone is required".to_string());
    }
    if draft.phone.chars().count() < 10 {
        errors.phone = Some("Phone must be at least 10 digits".to_string());
    }
    if draft.address.trim().is_empty() {
        errors.address = Some("Address is required".to_string());
    }
    errors
}

/// Basic `local@domain.tld` shape: no whitespace, exactly one `@` with a
/// non-empty part on each side, and a dot inside the domain that is
/// neither its first nor its last character.
fn is_valid_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = s.splitn(2, '@');
    let (local, domain) = match (parts.next(), parts.next()) {
        (Some(local), Some(domain)) => (local, domain),
        _ => return false,
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
