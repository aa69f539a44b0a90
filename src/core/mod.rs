pub mod batch;
pub mod csv_source;
pub mod export;
pub mod import;
pub mod mapping;
pub mod output;

pub use crate::domain::model::{ImportStats, TaxObject, TaxProperties, TaxRecord};
pub use crate::domain::ports::{Storage, TaxApi, TokenProvider};
pub use crate::utils::error::Result;
