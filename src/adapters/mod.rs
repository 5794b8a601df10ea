// Adapters layer: concrete implementations for external systems (catalog sources, storage, rendering, http).

pub mod catalog_source;
pub mod http;
pub mod report;
pub mod storage;
pub mod svg;
