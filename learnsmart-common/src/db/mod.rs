//! Database connection setup shared by all services
//!
//! Each service owns its own SQLite file and creates its own tables; this
//! module only opens pools and provides row decoding helpers.

pub mod init;
pub mod row;

pub use init::*;
pub use row::*;
