//! MapQuery: Pluggable Query-Service Framework
//!
//! A query-service framework for map applications. Host applications register
//! independently-defined services (spatial selection, attribute search) behind
//! one uniform contract: declarative service definitions, fire-and-forget query
//! dispatch, and shared result aggregation.

pub mod cli;
pub mod config;
pub mod error;
pub mod field;
pub mod host;
pub mod logging;
pub mod query;
pub mod service;
pub mod services;
pub mod tools;
pub mod types;
