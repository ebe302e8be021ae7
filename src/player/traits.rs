use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

use crate::models::CastTargetId;

/// The playback engine behind the chrome.
///
/// The chrome never decodes media itself. It forwards widget commands here
/// and the engine writes position, duration, buffering and discovered cast
/// targets back through the `report_*` methods of the state store.
#[async_trait]
pub trait MediaEngine: Send + Sync {
    async fn play(&self) -> Result<()>;
    async fn pause(&self) -> Result<()>;
    async fn seek(&self, position: Duration) -> Result<()>;
    async fn set_volume(&self, volume: f64) -> Result<()>;
    async fn set_muted(&self, muted: bool) -> Result<()>;
    async fn set_fullscreen(&self, fullscreen: bool) -> Result<()>;
    /// `None` returns playback to the local device
    async fn cast_to(&self, target: Option<&CastTargetId>) -> Result<()>;
}
