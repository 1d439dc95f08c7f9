//! BuildBrain: upload ingestion (store, extract, embed, translate, index)
//! and keyword search over the indexed documents.

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
