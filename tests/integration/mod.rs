//! Integration tests for the MapQuery query-service framework

mod aggregation;
mod config_integration;
mod dispatch_behavior;
mod service_lifecycle;
