#![doc = "The `tasktrack` library crate."]
#![doc = ""]
#![doc = "Bearer-token authentication, password handling and per-owner task isolation for a"]
#![doc = "multi-user task tracker, plus the actix-web routes and registry adapters that expose"]
#![doc = "them. The binary (`main.rs`) wires these together from environment configuration."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod routes;

pub use crate::error::AppError;
pub use crate::routes::AppServices;
