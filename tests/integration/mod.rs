//! End-to-end tests that go through the public API only.

pub mod catalog_files;
pub mod service_flow;
