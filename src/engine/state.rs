use web_time::Instant;

use crate::animation::{AnimationTarget, TweenScheduler};
use crate::carousel::InputRouter;
use crate::input::GestureEvent;
use crate::options::{HeadingOptions, Options};

/// Everything the carousel knows that does not live on the GPU: the input
/// router (gate, touch tracking, panel index) and the tweened properties it
/// drives.
#[derive(Debug, Clone)]
pub struct CarouselState {
    router: InputRouter,
    scheduler: TweenScheduler,
    headings: HeadingOptions,
}

impl CarouselState {
    /// Fresh state on panel 0 with both properties at zero.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            router: InputRouter::new(&options.scroll),
            scheduler: TweenScheduler::new(),
            headings: options.headings.clone(),
        }
    }

    /// Feed one raw event observed at `now` and start any resulting tweens.
    ///
    /// Returns the number of animation requests issued.
    pub fn handle_event(&mut self, event: GestureEvent, now: Instant) -> usize {
        let requests = self.router.handle_event(event, now);
        self.scheduler.issue_all(&requests, now);
        requests.len()
    }

    /// Advance tweens to `now`. Returns `true` if a property moved.
    pub fn update(&mut self, now: Instant) -> bool {
        self.scheduler.update(now)
    }

    /// Heading layer offset in percent of its height.
    #[must_use]
    pub fn heading_offset(&self) -> f32 {
        self.scheduler.value(AnimationTarget::HeadingOffset)
    }

    /// Planet group rotation about Y, in radians.
    #[must_use]
    pub fn group_rotation(&self) -> f32 {
        self.scheduler.value(AnimationTarget::GroupRotationY)
    }

    /// Active panel, in `0..PANEL_COUNT`.
    #[must_use]
    pub fn active_panel(&self) -> usize {
        self.router.index().value()
    }

    /// Heading text of the active panel.
    #[must_use]
    pub fn active_title(&self) -> &str {
        self.headings.title(self.active_panel())
    }

    /// Whether any tween is still playing.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.scheduler.active_count() > 0
    }
}
