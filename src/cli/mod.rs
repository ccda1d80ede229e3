pub mod app;
pub mod items;

pub use app::Cli;
