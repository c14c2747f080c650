pub mod cabinet;
pub mod drug;
pub mod interaction;
pub mod label;
pub mod medicine;
