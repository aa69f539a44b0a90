// Adapters layer: concrete implementations for external systems (storage, http).

pub mod hubspot;
pub mod storage;
