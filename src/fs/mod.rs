//! File system utilities for abmix

mod json;

pub use json::read_json;
