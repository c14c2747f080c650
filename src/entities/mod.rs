pub mod prelude;

pub mod drug_cache;
pub mod interactions;
pub mod medicines;
pub mod saved_medicines;
