//! Unit tests for the Ads Tool SDK
//!
//! This module contains tests for various components of the SDK.

pub mod error_tests;
