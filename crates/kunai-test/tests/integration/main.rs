//! End-to-end tests driving the public vCard API.

#![allow(clippy::expect_used)]

mod binary;
mod config;
mod hcard;
mod jcard;
mod raw;
mod registry;
mod related;
mod skip;
mod timezone;
