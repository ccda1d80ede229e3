pub mod config;
pub mod console;
pub mod error;
pub mod menu;
pub mod ui;

pub use error::MenuError;
