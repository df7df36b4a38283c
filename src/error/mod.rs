pub mod global;

pub use global::{AppError, AppResult};
