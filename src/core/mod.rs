pub mod viewmodels;

pub use viewmodels::{PlaybackCommand, PlaybackStateStore, Property, Subregion};
