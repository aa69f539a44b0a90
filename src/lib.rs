pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::Cli;

pub use adapters::{hubspot::HubSpotClient, storage::LocalStorage};
pub use config::portal::PortalConfig;
pub use core::{export::TaxExporter, import::TaxImporter};
pub use utils::error::{EtlError, Result};
