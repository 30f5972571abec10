pub mod completions;
pub mod config;
pub mod items;
pub mod play;
pub mod resolve;
pub mod spin;
