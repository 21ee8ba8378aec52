use thiserror::Error;

use crate::state::Feature;
use crate::topology::Zone;
use kohl_image::ColorParseError;

/// Errors reported by the engine.
///
/// Every variant is recoverable: preset and color failures no-op the selection, landmark failures
/// skip one zone for one frame, and tracker loss returns the session to idle until the tracker is
/// re-acquired. Nothing in this crate terminates the hosting process.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A preset name was requested that the feature's catalog does not contain.
    #[error("no {feature} preset named `{name}`")]
    UnknownPreset { feature: Feature, name: String },

    /// The landmark frame cannot cover the zone: indices out of range or non-finite coordinates.
    ///
    /// The pipeline skips the zone for the current frame and renders everything else.
    #[error("{zone}: only {got} of {needed} required landmarks usable")]
    InsufficientLandmarks {
        zone: Zone,
        needed: usize,
        got: usize,
    },

    /// No tracking data is available; the session is idle.
    #[error("tracking lost, reposition face")]
    TrackerLost,

    /// A raw color override string could not be parsed.
    #[error(transparent)]
    InvalidColor(#[from] ColorParseError),
}
