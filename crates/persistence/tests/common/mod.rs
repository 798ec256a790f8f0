//! Test infrastructure for the persistence layer.
//!
//! This module provides reusable fixtures and storage wrappers for testing
//! the listing pipeline against every backend.

#![allow(dead_code)]

pub mod fixtures;
pub mod harness;

pub use fixtures::*;
pub use harness::*;
