mod navigation;
mod search;
mod state;
mod ui;

pub use state::*;
