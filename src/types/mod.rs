//! Type definitions

pub mod contact;
pub mod job;
pub mod schema;

pub use contact::*;
pub use job::*;
pub use schema::*;
