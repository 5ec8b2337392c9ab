//! Test suite for the style pipeline
//!
//! This module organizes tests into logical groups to help understand
//! different aspects of the crate.

#[cfg(test)]
mod core_tests;
#[cfg(test)]
mod integration;
