pub use errors::{ServiceError, ServiceResult};

pub mod categories;
pub mod errors;
pub mod health;
pub mod questions;
pub mod seed;
