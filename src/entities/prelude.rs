pub use super::drug_cache::Entity as DrugCache;
pub use super::interactions::Entity as Interactions;
pub use super::medicines::Entity as Medicines;
pub use super::saved_medicines::Entity as SavedMedicines;
