//! Superheroes: REST backend for heroes, powers and the hero_powers join table on SQLite.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod patch;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{Config, DatabaseConfig, HttpConfig};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use model::{Hero, HeroPower, Power, Strength};
pub use patch::Patch;
pub use routes::{app, common_routes, resource_routes};
pub use service::{CrudService, Page, Resource};
pub use state::AppState;
pub use store::connect;
