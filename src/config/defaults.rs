// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all engine constants.
//!
//! This module serves as the single source of truth for the thresholds and
//! factors used across the engine. Constants are organized by category.
//!
//! # Categories
//!
//! - **Fit**: reference natural size and scaling defaults
//! - **Zoom**: zoom ceiling and input divisors
//! - **Gesture**: swipe, drag, and inertia thresholds
//! - **Timing**: tween durations and the loader delay

// ==========================================================================
// Fit Defaults
// ==========================================================================

/// Reference width used while an item's natural size is still unknown.
pub const DEFAULT_NATURAL_WIDTH: f32 = 1920.0;

/// Reference height used while an item's natural size is still unknown.
pub const DEFAULT_NATURAL_HEIGHT: f32 = 1080.0;

/// Default content scale factor relative to the container.
pub const DEFAULT_SCALE: f32 = 1.0;

/// Containers narrower than this are treated as small screens, which
/// enables over-drag navigation and suppresses zoom resets on resize.
pub const SMALL_SCREEN_MAX_WIDTH: f32 = 769.0;

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Default ceiling for zoom as a multiple of the base fit size. The
/// natural size of the media is always a second, independent ceiling.
pub const DEFAULT_MAX_ZOOM: f32 = 10.0;

/// A render width this many pixels past the base fit counts as zoomed,
/// which switches gesture interpretation from swipe-to-navigate to pan.
pub const ZOOMED_THRESHOLD_PX: f32 = 10.0;

/// Wheel delta is divided by this (sign-flipped) to produce a zoom amount.
pub const WHEEL_ZOOM_DIVISOR: f32 = 300.0;

/// Pinch distance delta is divided by this to produce a zoom amount.
pub const PINCH_ZOOM_DIVISOR: f32 = 35.0;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Horizontal swipe distance that triggers prev/next while unzoomed.
pub const SWIPE_NAV_THRESHOLD_PX: f32 = 40.0;

/// Upward swipe distance that requests close while unzoomed.
pub const SWIPE_CLOSE_THRESHOLD_PX: f32 = 90.0;

/// Horizontal swipes are only honored while |vertical delta| stays under
/// this guard, so a diagonal swipe is not read as navigation.
pub const SWIPE_VERTICAL_GUARD_PX: f32 = 30.0;

/// Divisor applied to translation past the pan bound (soft limit).
pub const OVER_DRAG_DAMPING: f32 = 10.0;

/// Damped over-drag past the pan bound by more than this triggers
/// prev/next on small screens. Value inherited from the reference
/// implementation; no deeper rationale is documented.
pub const OVER_DRAG_NAV_THRESHOLD_PX: f32 = 20.0;

/// Minimum movement across the last two drag samples for inertia to apply.
pub const INERTIA_MIN_DELTA_PX: f32 = 5.0;

/// Final drag delta is multiplied by this for the inertia fling. Value
/// inherited from the reference implementation.
pub const INERTIA_MULTIPLIER: f32 = 5.0;

/// Number of trailing drag samples considered for inertia.
pub const INERTIA_SAMPLE_COUNT: usize = 3;

/// A gesture counts as a drag (rather than a tap) after this many
/// recorded move samples.
pub const DRAG_SAMPLE_THRESHOLD: usize = 2;

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Duration of zoom and translate tweens, in milliseconds.
pub const ZOOM_TWEEN_MS: u32 = 500;

/// Duration of the forward/backward item transition, in milliseconds.
pub const TRANSITION_TWEEN_MS: u32 = 250;

/// Delay before the render layer should reveal a loading placeholder for
/// a not-yet-decoded active item, in milliseconds.
pub const LOADER_DELAY_MS: u32 = 250;
