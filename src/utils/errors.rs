use thiserror::Error;

use crate::models::CastTargetId;
use crate::ui::pages::player::RegionPhase;

/// Rejections raised by chrome widgets when a command cannot apply right now.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChromeError {
    #[error("Controls are not interactive (control band is {0:?})")]
    ChromeHidden(RegionPhase),

    #[error("Unknown cast target: {0}")]
    UnknownCastTarget(CastTargetId),

    #[error("Command ignored while the error presentation is shown")]
    ErrorActive,
}
