mod setup;
mod show_config;

pub use setup::*;
pub use show_config::*;
