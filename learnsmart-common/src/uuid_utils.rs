//! UUID utilities

use uuid::Uuid;

use crate::{Error, Result};

/// Generate a new UUIDv4
pub fn generate() -> Uuid {
    Uuid::new_v4()
}

/// Parse UUID from string
pub fn parse(s: &str) -> std::result::Result<Uuid, uuid::Error> {
    Uuid::parse_str(s)
}

/// Parse a UUID read back from a TEXT column
pub fn from_db(s: &str) -> Result<Uuid> {
    parse(s).map_err(|e| Error::Corrupt(format!("invalid uuid '{}': {}", s, e)))
}

/// Parse an optional UUID column
pub fn opt_from_db(s: Option<String>) -> Result<Option<Uuid>> {
    s.as_deref().map(from_db).transpose()
}
