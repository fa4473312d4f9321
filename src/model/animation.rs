//! Animation vocabulary: kinds, markers, motion presets and easing curves.
//!
//! [`AnimationKind::motion`] is the single lookup table that defines what each
//! kind looks like. Call sites never build a [`Motion`] for a kind by hand.

use std::fmt;

/// Entrance animation requested by a marked element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    /// Fade in while rising from 30px below.
    FadeIn,
    /// Rise from 80px below.
    SlideUp,
    /// Slide in from the left.
    SlideLeft,
    /// Slide in from the right.
    SlideRight,
    /// Grow in from 80% with a slight overshoot.
    ScaleIn,
    /// Fallback for unrecognised markers.
    Default,
}

impl AnimationKind {
    /// All kinds, in table order.
    pub const ALL: [AnimationKind; 6] = [
        AnimationKind::FadeIn,
        AnimationKind::SlideUp,
        AnimationKind::SlideLeft,
        AnimationKind::SlideRight,
        AnimationKind::ScaleIn,
        AnimationKind::Default,
    ];

    /// Parse a marker name such as `"slideUp"`.
    ///
    /// Unrecognised names fall back to [`AnimationKind::Default`], the same
    /// treatment an unknown marker gets on the page.
    pub fn from_marker(name: &str) -> Self {
        match name {
            "fadeIn" => Self::FadeIn,
            "slideUp" => Self::SlideUp,
            "slideLeft" => Self::SlideLeft,
            "slideRight" => Self::SlideRight,
            "scaleIn" => Self::ScaleIn,
            _ => Self::Default,
        }
    }

    /// Marker name of this kind.
    pub fn marker(self) -> &'static str {
        match self {
            Self::FadeIn => "fadeIn",
            Self::SlideUp => "slideUp",
            Self::SlideLeft => "slideLeft",
            Self::SlideRight => "slideRight",
            Self::ScaleIn => "scaleIn",
            Self::Default => "default",
        }
    }

    /// Motion preset for this kind.
    pub fn motion(self) -> Motion {
        match self {
            Self::FadeIn => Motion::new(Offset::translate_y(30.0), 1.0, Easing::Power2Out),
            Self::SlideUp => Motion::new(Offset::translate_y(80.0), 1.2, Easing::Power2Out),
            Self::SlideLeft => Motion::new(Offset::translate_x(-80.0), 1.0, Easing::Power2Out),
            Self::SlideRight => Motion::new(Offset::translate_x(80.0), 1.0, Easing::Power2Out),
            Self::ScaleIn => Motion::new(Offset::Scale(0.8), 1.0, Easing::BackOut(1.7)),
            Self::Default => Motion::new(Offset::translate_y(60.0), 1.0, Easing::Power2Out),
        }
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Declarative marker attached to an element by the hosting view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Preset to play.
    pub kind: AnimationKind,
    /// Extra delay in seconds; negative values are clamped to zero.
    pub delay: f64,
}

impl AnimationSpec {
    /// Spec with `delay` seconds of extra delay.
    pub fn new(kind: AnimationKind, delay: f64) -> Self {
        Self {
            kind,
            delay: delay.max(0.0),
        }
    }

    /// Spec with no extra delay.
    pub fn of(kind: AnimationKind) -> Self {
        Self::new(kind, 0.0)
    }
}

/// Where a hidden element starts before it is revealed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Offset {
    /// Translated by `(dx, dy)` pixels.
    Translate {
        /// Horizontal offset.
        dx: f64,
        /// Vertical offset.
        dy: f64,
    },
    /// Scaled by the given factor.
    Scale(f64),
}

impl Offset {
    /// Horizontal-only translation.
    pub fn translate_x(dx: f64) -> Self {
        Self::Translate { dx, dy: 0.0 }
    }

    /// Vertical-only translation.
    pub fn translate_y(dy: f64) -> Self {
        Self::Translate { dx: 0.0, dy }
    }
}

/// Timing curve applied to tween progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Cubic ease-out.
    Power2Out,
    /// Cubic ease-in-out.
    Power2InOut,
    /// Overshooting ease-out with the given overshoot amount.
    BackOut(f64),
}

impl Easing {
    /// Map linear progress in `[0, 1]` to eased progress.
    ///
    /// Input is clamped; the endpoints always map to exactly 0 and 1.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match self {
            Self::Linear => t,
            Self::Power2Out => 1.0 - (1.0 - t).powi(3),
            Self::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Self::BackOut(s) => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u.powi(3) + s * u.powi(2)
            }
        }
    }
}

/// A complete entrance motion: start offset, duration and curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Where the hidden state starts.
    pub offset: Offset,
    /// Duration in seconds.
    pub duration: f64,
    /// Curve applied to progress.
    pub easing: Easing,
}

impl Motion {
    /// Motion from `offset` over `duration` seconds.
    pub fn new(offset: Offset, duration: f64, easing: Easing) -> Self {
        Self {
            offset,
            duration,
            easing,
        }
    }

    /// Upward rise by `dy` pixels with the default curve.
    pub fn rise(dy: f64, duration: f64) -> Self {
        Self::new(Offset::translate_y(dy), duration, Easing::Power2Out)
    }

    /// Inline state applied before the reveal starts.
    pub fn hidden_state(&self) -> VisualState {
        self.sample(0.0)
    }

    /// Inline state at linear progress `t` in `[0, 1]`.
    pub fn sample(&self, t: f64) -> VisualState {
        let eased = self.easing.apply(t);
        let remaining = 1.0 - eased;
        let mut state = VisualState {
            opacity: eased.clamp(0.0, 1.0),
            ..VisualState::VISIBLE
        };
        match self.offset {
            Offset::Translate { dx, dy } => {
                state.translate_x = dx * remaining;
                state.translate_y = dy * remaining;
            }
            Offset::Scale(from) => {
                state.scale = from + (1.0 - from) * eased;
            }
        }
        state
    }
}

/// Inline visual override written onto an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    /// 0 is hidden, 1 fully visible.
    pub opacity: f64,
    /// Horizontal offset in pixels.
    pub translate_x: f64,
    /// Vertical offset in pixels.
    pub translate_y: f64,
    /// Scale factor, 1 at rest.
    pub scale: f64,
}

impl VisualState {
    /// Fully revealed, no offset.
    pub const VISIBLE: VisualState = VisualState {
        opacity: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
    };
}
