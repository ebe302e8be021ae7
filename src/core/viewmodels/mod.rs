pub mod playback_state;
pub mod property;

pub use playback_state::{HoverFlags, PlaybackCommand, PlaybackStateStore, Subregion};
pub use property::{Property, PropertyLike, PropertySubscriber};
