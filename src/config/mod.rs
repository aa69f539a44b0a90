#[cfg(feature = "cli")]
pub mod cli;
pub mod job;
pub mod portal;
