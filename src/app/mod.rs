pub mod ambient;
pub mod card;
pub mod catalog;
