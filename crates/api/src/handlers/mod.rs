pub mod admin;
pub mod auth;
pub mod identity;
pub mod movies;
pub mod results;
pub mod votes;
