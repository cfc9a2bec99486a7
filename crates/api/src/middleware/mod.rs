//! Request extractors for the two kinds of caller.
//!
//! - [`auth::AdminUser`] -- the admin, from a JWT Bearer token.
//! - [`voter::VoterIdentity`] / [`voter::DeviceId`] -- a voter, from the
//!   `X-Device-Id` and `X-Voter-Name` headers.

pub mod auth;
pub mod voter;
