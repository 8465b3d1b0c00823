//! Fund Profiler: investment-risk questionnaire core.

pub mod advisor;
pub mod catalog;
pub mod config;
pub mod error;
pub mod quiz;
pub mod scoring;
pub mod store;
