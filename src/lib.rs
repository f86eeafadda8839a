pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod routes;
pub mod utils;

#[cfg(test)]
mod tests;
