pub mod controller;
pub mod state;

pub use controller::{AppController, LoginProfile};
pub use state::{ControllerState, Page};
