mod menu;
mod state;

pub use menu::MenuItem;
pub use state::{AppState, InputAction, Scene};
