//! Integration tests for the cbuild binary.

mod build_tests;
mod common;
