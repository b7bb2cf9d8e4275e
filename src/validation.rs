//! Explicit validation helpers run by the converters before anything is persisted.

use crate::Error;

/// Trim `value` and reject it if nothing is left.
///
/// `field` is the wire name of the field, e.g. "fullName", and is used in the error message.
pub(crate) fn non_blank(value: &str, field: &'static str) -> Result<String, Error> {
    let value = value.trim();

    if value.is_empty() {
        Err(Error::BlankField(field))
    } else {
        Ok(value.to_owned())
    }
}

/// Unwrap a field that must be present in a request.
pub(crate) fn required<T>(value: Option<T>, field: &'static str) -> Result<T, Error> {
    value.ok_or(Error::MissingField(field))
}
