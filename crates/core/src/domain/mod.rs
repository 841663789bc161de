pub mod batch;
pub mod error;
pub mod job;
pub mod service;
pub mod settings;
pub mod status;
pub mod update;

#[cfg(test)]
mod serde_tests;
