pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
