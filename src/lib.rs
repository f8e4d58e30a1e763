//! Contact spreadsheet normalization worker
//!
//! Accepts contact-list rows, normalizes them on a background task
//! (name casing, phone digit cleanup, tag standardization), tracks
//! per-job progress in an in-memory registry, and produces a cleaned
//! sheet for download.
//!
//! Job state is ephemeral: it lives in process memory for the process
//! lifetime, and a restart discards all history. Callers must treat
//! job ids accordingly.

pub mod config;
pub mod error;
pub mod services;
pub mod types;
