pub mod encoding;
pub mod error;
pub mod path;
pub mod query;
pub mod routes;
pub mod service;
pub mod token;
