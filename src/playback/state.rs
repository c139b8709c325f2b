use crate::{
    foundation::core::Rect,
    scene::{
        backend::{SeekTicket, VideoPlayer},
        element::ElementId,
        layer::SpriteLayer,
    },
};

/// Frame stepping for a sprite element driven by the timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SpriteClock {
    /// Grid size as `(columns, rows)`.
    pub slice: (u32, u32),
    /// Row the steps walk along.
    pub slot_row: u32,
    /// Passes over the row per unit timeline.
    pub repeat_count: f64,
    /// Last applied step; `None` until the first offset is applied.
    pub step: Option<u32>,
}

impl SpriteClock {
    /// Clock for a sheet of `slice` cells walking `slot_row`.
    pub fn new(slice: (u32, u32), slot_row: u32, repeat_count: f64) -> Self {
        Self {
            slice: (slice.0.max(1), slice.1.max(1)),
            slot_row,
            repeat_count,
            step: None,
        }
    }

    /// Column selected at offset `t`: `floor(t * repeat * columns) mod columns`.
    pub fn step_at(&self, t: f64) -> u32 {
        let columns = u64::from(self.slice.0);
        let raw = (t * self.repeat_count * columns as f64).floor();
        if !raw.is_finite() || raw < 0.0 {
            return 0;
        }
        ((raw as u64) % columns) as u32
    }

    /// Move to the step for `t`; returns the new texture rect only when the step changed.
    pub fn advance(&mut self, t: f64) -> Option<Rect> {
        let step = self.step_at(t);
        if self.step == Some(step) {
            return None;
        }
        self.step = Some(step);
        Some(SpriteLayer::cell_rect(self.slice, step, self.slot_row))
    }
}

/// Seek bookkeeping: at most one seek in flight and at most one pending offset.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct SeekState {
    /// Ticket of the outstanding seek.
    pub in_flight: Option<SeekTicket>,
    /// Latest offset requested while a seek was outstanding.
    pub pending: Option<f64>,
    /// Generation handed to the next seek.
    pub next_generation: u64,
}

impl SeekState {
    /// Mark a new seek as in flight and return its ticket.
    pub(crate) fn issue(&mut self, element: ElementId) -> SeekTicket {
        let ticket = SeekTicket {
            element,
            generation: self.next_generation,
        };
        self.next_generation += 1;
        self.in_flight = Some(ticket);
        ticket
    }

    /// Forget any outstanding seek so its completion is treated as stale.
    pub(crate) fn reset(&mut self) {
        self.in_flight = None;
        self.pending = None;
    }
}

/// Per-element mutable state owned by the playback controller.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct PlaybackState {
    /// Present when the element is a frame-advancing sprite.
    pub sprite: Option<SpriteClock>,
    /// Video seek coalescing.
    pub seek: SeekState,
}

/// A live video player and its timeline mapping.
pub struct VideoSurface {
    pub(crate) player: Box<dyn VideoPlayer>,
    /// Media time at timeline offset 0, in seconds.
    pub start_secs: f64,
    /// Media seconds covered by the unit timeline.
    pub duration_secs: f64,
    /// Whether autoplay is running.
    pub playing: bool,
    /// Set when playback reached the end without looping.
    pub needs_rewind: bool,
}

impl std::fmt::Debug for VideoSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoSurface")
            .field("start_secs", &self.start_secs)
            .field("duration_secs", &self.duration_secs)
            .field("playing", &self.playing)
            .field("needs_rewind", &self.needs_rewind)
            .finish_non_exhaustive()
    }
}

impl VideoSurface {
    /// Media time for timeline offset `t`.
    pub fn media_time(&self, t: f64) -> f64 {
        self.start_secs + t * self.duration_secs
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/state.rs"]
mod tests;
