//! Per-session lifecycle: tracker start, frame rendering, tracking loss.
//!
//! A [`Session`] is the engine's top-level object: one per active AR try-on, single-threaded and
//! frame-driven. The embedder calls [`Session::render_frame`] once per video frame, in arrival
//! order; a frame is fully composited before the next begins.

use log::{debug, trace};

use crate::compose;
use crate::filter::{Ema, LandmarkSmoother};
use crate::landmark::LandmarkFrame;
use crate::state::MakeupState;
use crate::Error;
use kohl_image::Image;

/// Lifecycle phase of an AR session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No tracker running. Frames are rejected with [`Error::TrackerLost`].
    Idle,
    /// Tracker started, waiting for the first usable landmark frame.
    Tracking,
    /// Usable landmarks have arrived; frames are being composited.
    Rendering,
}

/// One augmented-reality try-on session.
///
/// Owns the [`MakeupState`] and the per-session pipeline. UI code mutates the state through
/// [`Session::state_mut`] at any time; mutations take effect at the next frame boundary because
/// each frame composites against a snapshot taken when it starts, never mid-composite.
pub struct Session {
    state: MakeupState,
    phase: Phase,
    smoothing_alpha: Option<f32>,
    smoother: Option<LandmarkSmoother<Ema>>,
}

impl Session {
    /// Creates an idle session with a fresh [`MakeupState`].
    pub fn new() -> Self {
        Self {
            state: MakeupState::new(),
            phase: Phase::Idle,
            smoothing_alpha: None,
            smoother: None,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn state(&self) -> &MakeupState {
        &self.state
    }

    /// The mutation surface for selector views.
    #[inline]
    pub fn state_mut(&mut self) -> &mut MakeupState {
        &mut self.state
    }

    /// Enables cross-frame landmark smoothing with the given EMA coefficient.
    ///
    /// Smoothing is the only cross-frame state in the engine and is off by default. Its history
    /// is discarded whenever the session returns to [`Phase::Idle`].
    pub fn enable_smoothing(&mut self, alpha: f32) {
        self.smoothing_alpha = Some(alpha);
        self.smoother = None;
    }

    pub fn disable_smoothing(&mut self) {
        self.smoothing_alpha = None;
        self.smoother = None;
    }

    /// Camera/tracker start: `Idle` becomes `Tracking`. No-op in other phases.
    pub fn start(&mut self) {
        if self.phase == Phase::Idle {
            debug!("session started, waiting for landmarks");
            self.phase = Phase::Tracking;
        }
    }

    /// Renders one frame.
    ///
    /// Takes one state snapshot, plans the active features' layers against `frame`, and returns
    /// a composite built on a *copy* of `video`. The input frame is never written, so a stopped
    /// or failed session can never leave a partially composited frame on screen.
    ///
    /// While the session is [`Phase::Idle`] this fails with [`Error::TrackerLost`]. The first
    /// frame carrying any usable landmark moves `Tracking` to `Rendering`.
    pub fn render_frame(&mut self, frame: &mut LandmarkFrame, video: &Image) -> Result<Image, Error> {
        if self.phase == Phase::Idle {
            return Err(Error::TrackerLost);
        }

        if self.phase == Phase::Tracking && frame.has_usable_landmarks() {
            debug!("first usable landmark frame ({}), rendering", frame.frame());
            self.phase = Phase::Rendering;
        }

        if let Some(alpha) = self.smoothing_alpha {
            let landmarks = frame.landmarks_mut();
            // Trackers deliver fixed-length frames; a length change means a different tracker
            // configuration, so stale smoothing history is discarded rather than misapplied.
            let stale = self
                .smoother
                .as_ref()
                .map_or(true, |s| s.num_landmarks() != landmarks.len());
            if stale {
                self.smoother = Some(LandmarkSmoother::new(Ema::new(alpha), landmarks.len()));
            }
            if let Some(smoother) = &mut self.smoother {
                smoother.apply(landmarks);
            }
        }

        // One snapshot per frame: selector mutations land at the next frame boundary.
        let snapshot = self.state.snapshot();
        let layers = compose::plan(&snapshot, frame, video.resolution());
        trace!("frame {}: {} layers", frame.frame(), layers.len());

        let mut out = video.clone();
        compose::composite(&mut out, &layers);
        Ok(out)
    }

    /// Tracker failure (no frames arriving): back to `Idle`.
    ///
    /// All per-frame derived state and smoothing history are discarded. The user's makeup
    /// selections persist, so re-acquiring the tracker resumes with the same look.
    pub fn tracker_lost(&mut self) {
        debug!("tracking lost");
        self.phase = Phase::Idle;
        self.smoother = None;
    }

    /// Session end (camera released): back to `Idle` *and* the makeup selections reset.
    pub fn stop(&mut self) {
        debug!("session stopped");
        self.phase = Phase::Idle;
        self.smoother = None;
        self.state.reset();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
