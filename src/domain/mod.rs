pub mod category;
pub mod question;
pub mod types;
