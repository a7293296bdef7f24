mod handlers;
mod state;
pub mod types;

pub use state::{AppState, router};
pub use types::Theme;
