//! Real-time makeup try-on compositing.
//!
//! `kohl` turns face landmark frames from an external tracker into parametrized cosmetic overlays
//! (lipstick, eyeshadow, eyebrow, eyelash, blush) composited onto live video frames. It owns no
//! camera, network, or display surface: the embedder feeds it one [`LandmarkFrame`] and one video
//! [`Image`] per frame and presents the finished composite it gets back.
//!
//! The per-frame data flow is: tracker → [`region`] (landmarks to zone geometry) → [`compose`]
//! (geometry × [`state`] to blended layers) → finished frame, driven by a [`session::Session`].
//!
//! # Coordinates
//!
//! Landmark positions are normalized frame coordinates: X and Y in range 0.0 to 1.0 with the
//! origin in the top-left corner and Y pointing *down*. A Z coordinate is carried for parity with
//! trackers that estimate depth, but no part of the compositing pipeline reads it.
//!
//! # Determinism
//!
//! Rendering a frame is a pure function of the landmark frame and the makeup state snapshot:
//! re-rendering identical inputs produces byte-identical output. The only cross-frame state in
//! the engine is the optional landmark smoother, which is off by default.
//!
//! [`LandmarkFrame`]: landmark::LandmarkFrame
//! [`Image`]: kohl_image::Image

use log::LevelFilter;

pub mod compose;
pub mod filter;
pub mod iter;
pub mod landmark;
pub mod preset;
pub mod region;
pub mod selector;
pub mod session;
pub mod state;
pub mod topology;

mod error;

#[cfg(test)]
mod test_support;

pub use error::Error;
pub use kohl_image::{BlendMode, Color, ColorParseError, Image, Mask, Resolution};

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = LevelFilter::Debug;
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_PKG_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// The calling crate and `kohl` will log at *debug* level; `RUST_LOG` overrides as usual.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
