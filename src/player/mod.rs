pub mod bridge;
pub mod traits;

pub use bridge::forward_commands;
pub use traits::MediaEngine;
