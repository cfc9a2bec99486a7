//! Domain logic for the vibevote movie poll.
//!
//! Everything in this crate is pure: no database access, no HTTP. The `db`
//! crate feeds rows in, the `api` crate maps results and errors out.

pub mod appeal;
pub mod duplicate_movies;
pub mod error;
pub mod name_matching;
pub mod pagination;
pub mod types;
pub mod vibe;
