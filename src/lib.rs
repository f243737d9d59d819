//! Business catalog HTTP API: users, business categories, subsectors,
//! products and articles behind JWT bearer authentication with role checks.
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
