use serde::Serialize;

use super::overlay_region::RegionPresentation;
use crate::models::{CastTargetId, MediaMeta};

/// Everything the renderer draws for one player instance, bottom to top.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerFrame {
    pub layers: Vec<Layer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layer", rename_all = "snake_case")]
pub enum Layer {
    Media,
    /// Pointer surface owning activity detection
    Backdrop { dimmed: bool },
    Loading,
    MiddlePause,
    ControlBand(ControlBandView),
    Header(HeaderView),
    /// Replaces every chrome layer while a media failure is showing
    Error(ErrorView),
    /// Embedder-provided presentation, always on top
    Children,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlBandView {
    pub presentation: RegionPresentation,
    pub paused: bool,
    pub volume: f64,
    pub volume_icon: &'static str,
    pub progress: f64,
    pub time_label: String,
    pub title: Option<String>,
    pub cast_available: bool,
    pub cast_picker_open: bool,
    pub casting_to: Option<CastTargetId>,
    pub fullscreen: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderView {
    pub presentation: RegionPresentation,
    pub title: Option<String>,
    pub can_go_back: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorView {
    pub message: String,
    pub code: Option<i32>,
    pub media: Option<MediaMeta>,
    pub can_go_back: bool,
}

impl PlayerFrame {
    pub fn control_band(&self) -> Option<&ControlBandView> {
        self.layers.iter().find_map(|layer| match layer {
            Layer::ControlBand(view) => Some(view),
            _ => None,
        })
    }

    pub fn header(&self) -> Option<&HeaderView> {
        self.layers.iter().find_map(|layer| match layer {
            Layer::Header(view) => Some(view),
            _ => None,
        })
    }

    pub fn error(&self) -> Option<&ErrorView> {
        self.layers.iter().find_map(|layer| match layer {
            Layer::Error(view) => Some(view),
            _ => None,
        })
    }

    pub fn contains(&self, layer: &Layer) -> bool {
        self.layers.iter().any(|l| std::mem::discriminant(l) == std::mem::discriminant(layer))
    }

    /// True if any displayed layer would capture pointer input above the media
    pub fn captures_pointer(&self) -> bool {
        self.control_band().is_some_and(|v| v.presentation.interactive)
            || self.header().is_some_and(|v| v.presentation.interactive)
            || self.error().is_some()
    }
}
