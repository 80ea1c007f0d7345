//! Shared helpers for the feature modules.
//!
//! - [`db`]: existence checks and database error mapping

pub mod db;
