//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for inserts and patches where the table takes input

pub mod admin_user;
pub mod appeal;
pub mod device_name;
pub mod movie;
pub mod results;
pub mod vote;
