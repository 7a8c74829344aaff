//! Test builders for creating PlayScript projects on disk

mod project_builder;

pub use project_builder::{ProjectBuilder, TestProject};
