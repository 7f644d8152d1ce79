pub mod categories;
pub mod envelope;
pub mod health;
