//! Domain types: configuration, errors, served resources, wire types.

pub mod config;
pub mod error;
pub mod resources;
pub mod types;
