use crate::{
    foundation::core::Rect,
    scene::{
        backend::{SEEK_TOLERANCE_SECS, SeekRequest, SeekTicket},
        delegate::ElementDelegate,
        element::{Element, ElementId},
    },
};

/// What happened to a seek completion reported through [`Element::complete_seek`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeekCompletion {
    /// The seek landed and a coalesced offset was issued as the next seek.
    Drained,
    /// The seek landed and nothing was pending.
    Settled,
    /// The ticket no longer matches an outstanding seek (superseded or torn down); ignored.
    Stale,
}

/// Action value whose elements hide while any video in the tree plays.
const PLAY_ACTION: &str = "play";

impl Element {
    /// Apply timeline offset `t` to this subtree.
    ///
    /// Offsets outside `[0, 1]` (and NaN) are ignored. Children are updated first. Sprites
    /// switch cells only when the step changes; videos seek unless `autoplay` is set, with at
    /// most one seek in flight and the latest request kept pending.
    pub fn set_time_offset(&mut self, t: f64, autoplay: bool) {
        if !(0.0..=1.0).contains(&t) {
            return;
        }
        for child in &mut self.children {
            child.set_time_offset(t, autoplay);
        }

        if let Some(clock) = &mut self.playback.sprite
            && let Some(rect) = clock.advance(t)
            && let Some(sprite) = self.layers.sprite_mut()
        {
            sprite.contents_rect = rect;
        }

        let Some(video) = &mut self.video else {
            return;
        };
        if autoplay {
            return;
        }
        let seek = &mut self.playback.seek;
        if seek.in_flight.is_some() {
            tracing::trace!(id = self.id.0, t, "seek in flight; offset coalesced");
            seek.pending = Some(t);
            return;
        }
        if !video.player.is_ready() {
            return;
        }
        let ticket = seek.issue(self.id);
        video.player.seek(SeekRequest {
            target_secs: video.media_time(t),
            tolerance_before_secs: SEEK_TOLERANCE_SECS,
            tolerance_after_secs: SEEK_TOLERANCE_SECS,
            ticket,
        });
    }

    /// Report that the seek identified by `ticket` has landed.
    ///
    /// Call on the tree root. A pending offset recorded while the seek was in flight is
    /// applied immediately.
    pub fn complete_seek(&mut self, ticket: SeekTicket) -> SeekCompletion {
        let Some(element) = self.find_mut(ticket.element) else {
            tracing::trace!(?ticket, "seek completion for a removed element");
            return SeekCompletion::Stale;
        };
        if element.video.is_none() || element.playback.seek.in_flight != Some(ticket) {
            tracing::trace!(?ticket, "stale seek completion ignored");
            return SeekCompletion::Stale;
        }
        element.playback.seek.in_flight = None;
        match element.playback.seek.pending.take() {
            Some(t) => {
                tracing::trace!(id = element.id.0, t, "draining coalesced offset");
                element.set_time_offset(t, false);
                SeekCompletion::Drained
            }
            None => SeekCompletion::Settled,
        }
    }

    /// Start autoplay on every video in the subtree that is not already playing.
    ///
    /// Returns `true` when at least one video started; `"play"` action elements are hidden.
    pub fn start_autoplay(&mut self, delegate: &dyn ElementDelegate) -> bool {
        let started = self.start_videos(delegate);
        if started {
            self.set_play_actions_opacity(0.0);
        }
        started
    }

    fn start_videos(&mut self, delegate: &dyn ElementDelegate) -> bool {
        let mut started = false;
        for child in &mut self.children {
            started |= child.start_videos(delegate);
        }
        if let Some(video) = &mut self.video
            && !video.playing
        {
            video.playing = true;
            if video.needs_rewind {
                video.player.rewind();
                video.needs_rewind = false;
            }
            video.player.play();
            delegate.on_playback_started(self);
            started = true;
        }
        started
    }

    /// Pause every playing video in the subtree.
    ///
    /// Returns `true` when at least one video stopped; `"play"` action elements reappear.
    pub fn pause_autoplay(&mut self, delegate: &dyn ElementDelegate) -> bool {
        let paused = self.pause_videos(delegate);
        if paused {
            self.set_play_actions_opacity(1.0);
        }
        paused
    }

    fn pause_videos(&mut self, delegate: &dyn ElementDelegate) -> bool {
        let mut paused = false;
        for child in &mut self.children {
            paused |= child.pause_videos(delegate);
        }
        if let Some(video) = &mut self.video
            && video.playing
        {
            video.playing = false;
            video.player.pause();
            delegate.on_playback_finished(self, false);
            paused = true;
        }
        paused
    }

    /// Report that the video of element `id` played to its end.
    ///
    /// Loops in place when the delegate asks for it; otherwise the video is marked for
    /// rewind and, if it was autoplaying, completion is signalled and `"play"` action
    /// elements reappear. Returns `false` for an unknown or video-less element.
    pub fn video_reached_end(&mut self, id: ElementId, delegate: &dyn ElementDelegate) -> bool {
        let Some(element) = self.find_mut(id) else {
            return false;
        };
        if element.video.is_none() {
            return false;
        }
        if delegate.should_repeat_video(element) {
            if let Some(video) = &mut element.video {
                video.player.rewind();
                video.player.play();
            }
            return true;
        }

        let mut finished = false;
        if let Some(video) = &mut element.video {
            video.needs_rewind = true;
            if video.playing {
                video.playing = false;
                finished = true;
            }
        }
        if finished {
            delegate.on_playback_finished(element, true);
            self.set_play_actions_opacity(1.0);
        }
        true
    }

    fn set_play_actions_opacity(&mut self, opacity: f64) {
        if self.action.as_deref() == Some(PLAY_ACTION) {
            self.layers.style.opacity = opacity;
        }
        for child in &mut self.children {
            child.set_play_actions_opacity(opacity);
        }
    }

    /// Column currently shown by a frame-advancing sprite.
    pub fn sprite_step(&self) -> Option<u32> {
        self.playback.sprite.as_ref().and_then(|c| c.step)
    }

    /// Current sprite texture rectangle, if the primary content is a sprite.
    pub fn sprite_contents_rect(&self) -> Option<Rect> {
        self.layers.sprite().map(|s| s.contents_rect)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/controller.rs"]
mod tests;
