//! Application layer
//!
//! The wall controller and the append queue it renders through.

pub mod append_queue;
pub mod wall_controller;

pub use append_queue::AppendQueue;
pub use wall_controller::{merge_history, WallController, WallSession};
