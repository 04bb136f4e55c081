pub mod age;
pub mod app;
pub mod card;
pub mod config;
pub mod holiday;
mod routes;
pub mod telemetry;
