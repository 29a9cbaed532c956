// ABOUTME: Shared types and configuration for tessera.
// ABOUTME: Defines screen geometry and config file handling.

pub mod config;
pub mod geometry;

pub use config::{Config, ConfigError, LayoutSettings};
pub use geometry::Geometry;
