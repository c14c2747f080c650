pub mod cabinet;
pub mod catalog;
pub mod drug_cache;
