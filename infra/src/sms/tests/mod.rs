//! Unit tests for SMS module

#[cfg(test)]
pub mod factory_tests;
