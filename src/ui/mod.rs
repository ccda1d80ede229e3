pub mod prompts;

pub use prompts::Prompter;
