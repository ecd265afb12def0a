pub mod cli;
pub mod infrastructure;
