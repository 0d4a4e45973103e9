//! Common test utilities for REST API testing.
//!
//! - [`harness`] - Test server over an in-memory SQLite backend
//! - [`mock`] - Counting mock storage

#![allow(dead_code)]

pub mod harness;
pub mod mock;
