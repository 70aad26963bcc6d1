//! Tests for the ad generator
//!
//! `support` holds the fake services and the recording reporter shared by
//! the other modules.

pub mod support;

pub mod pipeline_tests;
