//! Inbound interfaces: the redirect-back query string.

pub mod query;
