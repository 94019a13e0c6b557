// SPDX-License-Identifier: MPL-2.0
//! Tweened value model.
//!
//! The actual animation scheduler lives with the host: this module only
//! records, for each animated slot, the current value, the target, the
//! requested duration/easing, and a generation counter. Setting a new
//! target bumps the generation, which is the cancellation signal for any
//! in-flight tween driving the slot, so no two tweens ever own the same
//! value. The host samples the interpolation per frame and calls
//! [`Tweened::settle`] when it finishes.

use crate::geometry::{Size, Vec2};

/// Easing curve applied to the normalized tween progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Cubic ease-out, the default for all lightbox transitions.
    #[default]
    CubicOut,
    Linear,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` onto the eased curve.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::CubicOut => {
                let f = t - 1.0;
                f * f * f + 1.0
            }
            Easing::Linear => t,
        }
    }
}

/// Duration and easing for one tween request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenOptions {
    pub duration_ms: u32,
    pub easing: Easing,
}

impl TweenOptions {
    /// Standard tween with the default easing.
    #[must_use]
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            easing: Easing::default(),
        }
    }

    /// Zero-duration tween: the value snaps on the next frame. Used for
    /// translate updates while a drag is active.
    #[must_use]
    pub fn immediate() -> Self {
        Self::new(0)
    }
}

impl Default for TweenOptions {
    fn default() -> Self {
        Self::new(crate::config::defaults::ZOOM_TWEEN_MS)
    }
}

/// Values that can be interpolated by a tween.
pub trait Lerp: Copy + PartialEq {
    fn lerp(from: Self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        Vec2::new(f32::lerp(from.x, to.x, t), f32::lerp(from.y, to.y, t))
    }
}

impl Lerp for Size {
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        Size::new(
            f32::lerp(from.width, to.width, t),
            f32::lerp(from.height, to.height, t),
        )
    }
}

/// One animated state slot.
#[derive(Debug, Clone)]
pub struct Tweened<T: Lerp> {
    current: T,
    start: T,
    target: T,
    options: TweenOptions,
    generation: u64,
}

impl<T: Lerp> Tweened<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            current: value,
            start: value,
            target: value,
            options: TweenOptions::default(),
            generation: 0,
        }
    }

    /// The value as of the last sample or settle.
    #[must_use]
    pub fn current(&self) -> T {
        self.current
    }

    /// The value the slot is animating towards.
    #[must_use]
    pub fn target(&self) -> T {
        self.target
    }

    /// Options of the most recent request.
    #[must_use]
    pub fn options(&self) -> TweenOptions {
        self.options
    }

    /// Identifies the in-flight tween; a driver holding an older generation
    /// must stop issuing frames.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the slot has not yet reached its target.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.current != self.target
    }

    /// Requests a tween towards `target`, replacing any in-flight tween.
    /// Returns the new generation for the driver to hold. A zero duration
    /// snaps the current value at once.
    pub fn set(&mut self, target: T, options: TweenOptions) -> u64 {
        self.start = self.current;
        self.target = target;
        self.options = options;
        self.generation += 1;

        if options.duration_ms == 0 {
            self.current = target;
        }

        self.generation
    }

    /// Snaps both current value and target, cancelling any in-flight tween.
    pub fn set_immediate(&mut self, value: T) {
        self.set(value, TweenOptions::immediate());
    }

    /// Samples the eased interpolation at linear progress `t` in `[0, 1]`
    /// and stores it as the current value. Only honored for the generation
    /// that requested the tween.
    pub fn sample(&mut self, generation: u64, t: f32) {
        if generation != self.generation {
            return;
        }
        let eased = self.options.easing.apply(t.clamp(0.0, 1.0));
        self.current = T::lerp(self.start, self.target, eased);
        if t >= 1.0 {
            self.current = self.target;
        }
    }

    /// Completes the tween: current becomes target.
    pub fn settle(&mut self) {
        self.current = self.target;
    }

    /// Completes the tween only if `generation` still identifies the
    /// in-flight tween. Returns whether the settle was applied; a stale
    /// driver gets `false` and must not retry.
    pub fn settle_if(&mut self, generation: u64) -> bool {
        if generation == self.generation {
            self.settle();
            true
        } else {
            false
        }
    }
}
