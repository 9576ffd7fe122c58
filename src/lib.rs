pub mod api;
pub mod config;
pub mod enroll;
pub mod error;
pub mod forms;
pub mod models;
pub mod token;
pub mod ui;

pub use error::{AppError, Result};
