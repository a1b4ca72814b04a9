//! Core traits for the injection API.

pub mod implements;

pub use implements::Implements;
