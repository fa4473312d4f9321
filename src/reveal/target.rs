//! Registered animation targets and their one-shot tweens.

use std::time::Duration;

use crate::model::{AnimationKind, Motion, NodeId, VisualState};

/// Which scan pass registered a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealPass {
    /// Element carrying an explicit animation marker.
    Marked,
    /// Unmarked page section.
    Section,
    /// Member of the grouped card stagger.
    Card,
}

/// A running or finished reveal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    /// When the reveal starts moving (trigger time plus delay).
    pub start_at: Duration,
    /// Tween length.
    pub duration: Duration,
    /// Whether the tween has reached its end.
    pub completed: bool,
}

impl Tween {
    /// Linear progress at `now`: 0 before the start, 1 once finished.
    pub fn progress(&self, now: Duration) -> f64 {
        if now <= self.start_at {
            return 0.0;
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        ((now - self.start_at).as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

/// Seconds to a `Duration`. Negative and NaN map to zero; values past
/// `Duration::MAX` saturate so a huge delay just never starts.
fn seconds(value: f64) -> Duration {
    Duration::try_from_secs_f64(value.max(0.0)).unwrap_or(Duration::MAX)
}

/// One element registered for entrance animation.
///
/// `has_fired` goes from false to true at most once while the element stays
/// mounted; nothing in this type can reset it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationTarget {
    /// Element being revealed.
    pub element: NodeId,
    /// Animation kind.
    pub kind: AnimationKind,
    /// Motion preset to play.
    pub motion: Motion,
    /// Delay in seconds between the trigger firing and the tween starting.
    pub delay_seconds: f64,
    /// Scan pass that registered the target.
    pub pass: RevealPass,
    /// Node whose position drives the trigger. Card group members share the
    /// group's first card.
    pub anchor: NodeId,
    has_fired: bool,
    tween: Option<Tween>,
}

impl AnimationTarget {
    /// Unfired target. Negative delays are clamped to zero.
    pub fn new(
        element: NodeId,
        kind: AnimationKind,
        motion: Motion,
        delay_seconds: f64,
        pass: RevealPass,
        anchor: NodeId,
    ) -> Self {
        Self {
            element,
            kind,
            motion,
            delay_seconds: delay_seconds.max(0.0),
            pass,
            anchor,
            has_fired: false,
            tween: None,
        }
    }

    /// Whether the trigger has fired.
    pub fn has_fired(&self) -> bool {
        self.has_fired
    }

    /// Tween started by the trigger, once fired.
    pub fn tween(&self) -> Option<&Tween> {
        self.tween.as_ref()
    }

    /// Fire the trigger at `now`. Returns the tween start time, or `None` if
    /// the target had already fired.
    pub(crate) fn fire(&mut self, now: Duration) -> Option<Duration> {
        if self.has_fired {
            return None;
        }
        self.has_fired = true;
        let start_at = now.saturating_add(seconds(self.delay_seconds));
        self.tween = Some(Tween {
            start_at,
            duration: seconds(self.motion.duration),
            completed: false,
        });
        Some(start_at)
    }

    /// Carry fired state over from the binding this target replaces.
    pub(crate) fn inherit(&mut self, previous: &AnimationTarget) {
        if previous.has_fired {
            self.has_fired = true;
            self.tween = previous.tween;
        }
    }

    /// Sample the running tween. Returns the state to write and whether the
    /// tween finished on this sample.
    pub(crate) fn sample(&mut self, now: Duration) -> Option<(VisualState, bool)> {
        let tween = self.tween.as_mut()?;
        if tween.completed {
            return None;
        }
        let t = tween.progress(now);
        let finished = t >= 1.0;
        tween.completed = finished;
        Some((self.motion.sample(t), finished))
    }
}
