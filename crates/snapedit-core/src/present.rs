//! Preview scheduling: when a state change becomes a rendered frame.
//!
//! With [`RenderSchedule::Immediate`] every change renders synchronously.
//! With [`RenderSchedule::Coalesced`] a change only marks the preview dirty;
//! the host calls `on_animation_frame` from its display-refresh callback and
//! at most one render happens per frame, against the latest state.
//!
//! The schedule decides when pixels become visible, never what they are.

use serde::{Deserialize, Serialize};

/// Policy for turning preview requests into renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderSchedule {
    /// Render as soon as the state changes.
    Immediate,
    /// Defer to the next display refresh, coalescing repeated changes.
    #[default]
    Coalesced,
}

impl RenderSchedule {
    /// Pick the schedule for a host's motion preference.
    pub fn for_reduced_motion(prefers_reduced_motion: bool) -> Self {
        if prefers_reduced_motion {
            RenderSchedule::Immediate
        } else {
            RenderSchedule::Coalesced
        }
    }
}

/// What the caller should do after a preview request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Render now.
    RenderNow,
    /// A frame callback is needed; render then.
    AwaitFrame,
    /// A frame is already pending and will pick up this change.
    Coalesced,
}

/// Tracks pending preview work under a [`RenderSchedule`].
#[derive(Debug, Clone, Default)]
pub struct Presenter {
    schedule: RenderSchedule,
    dirty: bool,
    frames: u64,
}

impl Presenter {
    pub fn new(schedule: RenderSchedule) -> Self {
        Self {
            schedule,
            dirty: false,
            frames: 0,
        }
    }

    pub fn schedule(&self) -> RenderSchedule {
        self.schedule
    }

    pub fn set_schedule(&mut self, schedule: RenderSchedule) {
        self.schedule = schedule;
    }

    /// Register a state change that needs a new preview.
    pub fn request(&mut self) -> Dispatch {
        match self.schedule {
            RenderSchedule::Immediate => {
                self.dirty = false;
                Dispatch::RenderNow
            }
            RenderSchedule::Coalesced if self.dirty => Dispatch::Coalesced,
            RenderSchedule::Coalesced => {
                self.dirty = true;
                Dispatch::AwaitFrame
            }
        }
    }

    /// Consume the pending request at a display refresh.
    ///
    /// Returns `true` if a render should happen now.
    pub fn take_frame(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Drop any pending request, e.g. when the work was done synchronously.
    pub fn cancel(&mut self) {
        self.dirty = false;
    }

    /// Record that a preview render completed.
    pub fn mark_presented(&mut self) {
        self.frames += 1;
    }

    pub fn is_pending(&self) -> bool {
        self.dirty
    }

    /// Number of preview renders presented so far.
    pub fn frames_presented(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_selects_immediate() {
        assert_eq!(RenderSchedule::for_reduced_motion(true), RenderSchedule::Immediate);
        assert_eq!(RenderSchedule::for_reduced_motion(false), RenderSchedule::Coalesced);
    }

    #[test]
    fn test_immediate_always_renders_now() {
        let mut presenter = Presenter::new(RenderSchedule::Immediate);
        assert_eq!(presenter.request(), Dispatch::RenderNow);
        assert_eq!(presenter.request(), Dispatch::RenderNow);
        assert!(!presenter.is_pending());
        assert!(!presenter.take_frame());
    }

    #[test]
    fn test_coalesced_batches_until_frame() {
        let mut presenter = Presenter::new(RenderSchedule::Coalesced);
        assert_eq!(presenter.request(), Dispatch::AwaitFrame);
        assert_eq!(presenter.request(), Dispatch::Coalesced);
        assert_eq!(presenter.request(), Dispatch::Coalesced);
        assert!(presenter.is_pending());

        assert!(presenter.take_frame());
        assert!(!presenter.take_frame());

        assert_eq!(presenter.request(), Dispatch::AwaitFrame);
    }

    #[test]
    fn test_cancel_clears_pending() {
        let mut presenter = Presenter::new(RenderSchedule::Coalesced);
        presenter.request();
        presenter.cancel();
        assert!(!presenter.take_frame());
    }

    #[test]
    fn test_frame_counter() {
        let mut presenter = Presenter::default();
        presenter.mark_presented();
        presenter.mark_presented();
        assert_eq!(presenter.frames_presented(), 2);
    }
}
