//! Business logic services

pub mod artifact;
pub mod job_store;
pub mod normalizer;
pub mod pipeline;
pub mod schema;
