// SPDX-License-Identifier: MPL-2.0
//! Zoom/pan geometry engine for the active image item.
//!
//! Consumes pointer and wheel events and maintains the tweened render size
//! and translation with bounds. Every event handler returns an [`Effect`]
//! the session maps onto its own operations (navigation, close, tap
//! handling); the engine itself never mutates the session.
//!
//! Gesture dispatch: one active pointer is a drag, two are a pinch. While
//! unzoomed, drags are swipes (navigate / close); while zoomed, drags pan
//! the image inside soft bounds.

pub mod pointers;

pub use pointers::{ActivePointers, PointerId};

use crate::config::defaults::{
    DRAG_SAMPLE_THRESHOLD, INERTIA_MIN_DELTA_PX, INERTIA_MULTIPLIER, INERTIA_SAMPLE_COUNT,
    OVER_DRAG_DAMPING, OVER_DRAG_NAV_THRESHOLD_PX, PINCH_ZOOM_DIVISOR, SWIPE_CLOSE_THRESHOLD_PX,
    SWIPE_NAV_THRESHOLD_PX, SWIPE_VERTICAL_GUARD_PX, WHEEL_ZOOM_DIVISOR, ZOOMED_THRESHOLD_PX,
    ZOOM_TWEEN_MS,
};
use crate::geometry::{Size, Vec2};
use crate::tween::{TweenOptions, Tweened};
use tracing::trace;

/// Pointer button pressed for a down event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Auxiliary,
}

/// One pointer-down event in container coordinates.
#[derive(Debug, Clone, Copy)]
pub struct PointerEvent {
    pub id: PointerId,
    pub position: Vec2,
    pub button: PointerButton,
}

/// What a gesture asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    None,
    /// Swipe or over-drag asked for the previous item.
    RequestPrev,
    /// Swipe or over-drag asked for the next item.
    RequestNext,
    /// Upward swipe asked to close the gallery.
    RequestClose,
    /// A plain tap on the image; the session toggles zoom at this point
    /// unless the external click hook claims it.
    Tap(Vec2),
}

/// Per-session knobs the engine needs, resolved by the session.
#[derive(Debug, Clone, Copy)]
pub struct ZoomConfig {
    /// Zoom ceiling as a multiple of the base fit size.
    pub max_zoom: f32,
    /// Inline galleries pass wheel events through while unzoomed.
    pub inline: bool,
    pub no_pinch: bool,
    pub no_close: bool,
    /// Enables over-drag navigation and damping at the pan bounds.
    pub small_screen: bool,
}

#[derive(Debug, Clone, Copy)]
struct PinchState {
    /// Midpoint of the first pinch frame; the zoom anchor for the whole
    /// gesture.
    center: Vec2,
    /// Distance of the previous frame; `None` right before a baseline
    /// frame (gesture start, or a finger was lifted).
    prev_distance: Option<f32>,
}

/// Zoom/drag/pinch state for one active image item.
///
/// Created when an image item becomes active and discarded on position
/// change or close; `render` and `translate` always hold defined values.
#[derive(Debug, Clone)]
pub struct ZoomEngine {
    /// Tweened render size; starts at the base fit.
    pub render: Tweened<Size>,

    /// Tweened pan offset, bounded against the container.
    pub translate: Tweened<Vec2>,

    /// Largest width rendered so far, for the responsive sizes attribute.
    pub sizes_hint: f32,

    base_fit: Size,
    natural: Option<Size>,
    container: Size,
    cfg: ZoomConfig,

    pointers: ActivePointers,
    pointer_down: bool,
    has_dragged: bool,
    drag_start: Vec2,
    drag_start_translate: Vec2,
    drag_samples: Vec<Vec2>,
    pinch: Option<PinchState>,
}

impl ZoomEngine {
    #[must_use]
    pub fn new(base_fit: Size, natural: Option<Size>, container: Size, cfg: ZoomConfig) -> Self {
        Self {
            render: Tweened::new(base_fit),
            translate: Tweened::new(Vec2::ZERO),
            sizes_hint: base_fit.width,
            base_fit,
            natural,
            container,
            cfg,
            pointers: ActivePointers::new(),
            pointer_down: false,
            has_dragged: false,
            drag_start: Vec2::ZERO,
            drag_start_translate: Vec2::ZERO,
            drag_samples: Vec::new(),
            pinch: None,
        }
    }

    /// True once the render width exceeds the base fit by the zoom
    /// threshold; switches gesture interpretation from swipe to pan.
    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.render.current().width - ZOOMED_THRESHOLD_PX > self.base_fit.width
    }

    #[must_use]
    pub fn base_fit(&self) -> Size {
        self.base_fit
    }

    /// Records the decoded natural size, which caps further zooming.
    pub fn set_natural(&mut self, natural: Size) {
        self.natural = Some(natural);
    }

    /// Updates geometry after a container resize. With `reset`, render and
    /// translate tween back to the new base fit.
    pub fn set_geometry(&mut self, base_fit: Size, container: Size, reset: bool) {
        self.base_fit = base_fit;
        self.container = container;
        if reset {
            self.render.set(base_fit, TweenOptions::default());
            self.translate.set(Vec2::ZERO, TweenOptions::default());
        }
    }

    pub fn set_small_screen(&mut self, small_screen: bool) {
        self.cfg.small_screen = small_screen;
    }

    /// Tweens render and translate back to the base fit, used when the
    /// gallery closes while zoomed.
    pub fn reset_to_fit(&mut self) {
        self.render.set(self.base_fit, TweenOptions::new(ZOOM_TWEEN_MS));
        self.translate
            .set(Vec2::ZERO, TweenOptions::new(ZOOM_TWEEN_MS));
    }

    /// Abandons any in-progress gesture: pointer cache, pinch baseline,
    /// and drag flags are cleared. Called on position change.
    pub fn abandon_gesture(&mut self) {
        self.pointers.clear();
        self.pinch = None;
        self.pointer_down = false;
        self.has_dragged = false;
        self.drag_samples.clear();
    }

    /// Bounds a requested translation against the pan limits for `dims`.
    ///
    /// An axis with no panning headroom is forced to zero. On small
    /// screens an over-bound x is damped (soft limit) while the pointer is
    /// down, and an over-drag beyond the navigation threshold requests the
    /// adjacent item instead.
    fn bound_translate(&self, requested: Vec2, dims: Size) -> (Vec2, Effect) {
        let max_x = (dims.width - self.container.width) / 2.0;
        let max_y = (dims.height - self.container.height) / 2.0;

        let mut effect = Effect::None;
        let mut x = requested.x;

        if max_x < 0.0 {
            x = 0.0;
        } else if x > max_x {
            if self.cfg.small_screen {
                x = if self.pointer_down {
                    max_x + (x - max_x) / OVER_DRAG_DAMPING
                } else {
                    max_x
                };
                if self.pointer_down && requested.x > max_x + OVER_DRAG_NAV_THRESHOLD_PX {
                    effect = Effect::RequestPrev;
                }
            } else {
                x = max_x;
            }
        } else if x < -max_x {
            if self.cfg.small_screen {
                x = if self.pointer_down {
                    -max_x - (-max_x - x) / OVER_DRAG_DAMPING
                } else {
                    -max_x
                };
                if self.pointer_down && requested.x < -max_x - OVER_DRAG_NAV_THRESHOLD_PX {
                    effect = Effect::RequestNext;
                }
            } else {
                x = -max_x;
            }
        }

        let y = if max_y < 0.0 {
            0.0
        } else {
            requested.y.clamp(-max_y, max_y)
        };

        (Vec2::new(x, y), effect)
    }

    /// Adjusts zoom by `amount` (fraction of the current size), anchored
    /// so the point under `anchor` stays fixed. Zooming below the base
    /// fit resets both size and translation. No-op while closing.
    pub fn change_zoom(&mut self, amount: f32, anchor: Option<Vec2>, closing: bool) -> Effect {
        if closing {
            return Effect::None;
        }

        let current = self.render.current();
        let max_width = self.base_fit.width * self.cfg.max_zoom;

        let mut new_width = current.width + current.width * amount;
        let mut new_height = current.height + current.height * amount;

        if amount > 0.0 {
            if new_width > max_width {
                new_width = max_width;
                new_height = self.base_fit.height * self.cfg.max_zoom;
            }

            if let Some(natural) = self.natural {
                if new_width > natural.width {
                    new_width = natural.width;
                    new_height = natural.height;
                }
            }
        } else if new_width < self.base_fit.width {
            self.render
                .set(self.base_fit, TweenOptions::new(ZOOM_TWEEN_MS));
            self.translate
                .set(Vec2::ZERO, TweenOptions::new(ZOOM_TWEEN_MS));
            return Effect::None;
        }

        // The point under the anchor stays fixed: its offset from the
        // image center scales by the size ratio, the difference feeds the
        // translation.
        let shift = match anchor {
            Some(anchor) if current.width > 0.0 && current.height > 0.0 => {
                let translate = self.translate.current();
                let center = Vec2::new(
                    self.container.width / 2.0 + translate.x,
                    self.container.height / 2.0 + translate.y,
                );
                let offset = anchor - center;
                Vec2::new(
                    -offset.x * (new_width / current.width) + offset.x,
                    -offset.y * (new_height / current.height) + offset.y,
                )
            }
            _ => Vec2::ZERO,
        };

        let new_dims = Size::new(new_width, new_height);
        self.render.set(new_dims, TweenOptions::new(ZOOM_TWEEN_MS));
        self.sizes_hint = self.sizes_hint.max(new_width).round();

        let (bounded, effect) =
            self.bound_translate(self.translate.current() + shift, new_dims);
        self.translate
            .set(bounded, TweenOptions::new(ZOOM_TWEEN_MS));

        effect
    }

    /// Toggles between full zoom and base fit, anchored at `anchor`.
    pub fn toggle_zoom(&mut self, anchor: Vec2, closing: bool) -> Effect {
        let amount = if self.is_zoomed() {
            -self.cfg.max_zoom
        } else {
            self.cfg.max_zoom
        };
        self.change_zoom(amount, Some(anchor), closing)
    }

    /// Wheel input: zoom proportional to the scroll delta, anchored at the
    /// cursor. Inline galleries let wheel scroll past while unzoomed.
    pub fn wheel(&mut self, delta_y: f32, position: Vec2, closing: bool) -> Effect {
        if self.cfg.inline && !self.is_zoomed() {
            return Effect::None;
        }
        self.change_zoom(delta_y / -WHEEL_ZOOM_DIVISOR, Some(position), closing)
    }

    /// Pointer pressed: records drag anchors. The gesture is not yet
    /// classified; that happens on the first moves.
    pub fn pointer_down(&mut self, event: PointerEvent) {
        if event.button == PointerButton::Secondary {
            return;
        }

        if self.pointers.is_empty() {
            // fresh gesture
            self.drag_samples.clear();
            self.has_dragged = false;
        }

        self.pointer_down = true;
        self.pointers.insert(event.id, event.position);
        self.drag_start = event.position;
        self.drag_start_translate = self.translate.current();
    }

    /// Pointer moved: dispatches to swipe, pan, or pinch handling.
    ///
    /// Navigation and close triggers are one-shot per gesture: firing one
    /// clears the pointer-down flag so the same swipe cannot fire twice.
    pub fn pointer_move(&mut self, id: PointerId, position: Vec2, closing: bool) -> Effect {
        if self.pointers.len() > 1 {
            self.pointer_down = false;
            if self.cfg.no_pinch {
                return Effect::None;
            }
            return self.handle_pinch(id, position, closing);
        }

        if !self.pointer_down {
            return Effect::None;
        }

        self.drag_samples.push(position);
        self.has_dragged = self.drag_samples.len() > DRAG_SAMPLE_THRESHOLD;

        let delta = position - self.drag_start;

        if !self.is_zoomed() {
            if delta.y < -SWIPE_CLOSE_THRESHOLD_PX {
                trace!("swipe up past close threshold");
                self.pointer_down = false;
                return if self.cfg.no_close {
                    Effect::None
                } else {
                    Effect::RequestClose
                };
            }

            // only read horizontal swipes while not swiping vertically
            if delta.y.abs() < SWIPE_VERTICAL_GUARD_PX {
                if delta.x > SWIPE_NAV_THRESHOLD_PX {
                    self.pointer_down = false;
                    return Effect::RequestPrev;
                }
                if delta.x < -SWIPE_NAV_THRESHOLD_PX {
                    self.pointer_down = false;
                    return Effect::RequestNext;
                }
            }
        } else if self.has_dragged && !closing {
            let (bounded, effect) = self.bound_translate(
                self.drag_start_translate + delta,
                self.render.current(),
            );
            self.translate.set(bounded, TweenOptions::immediate());

            if effect != Effect::None {
                self.pointer_down = false;
                return effect;
            }
        }

        Effect::None
    }

    /// Two-pointer move: distance delta against the previous frame drives
    /// zoom, anchored at the midpoint of the first pinch frame. The first
    /// frame only establishes the baseline.
    fn handle_pinch(&mut self, id: PointerId, position: Vec2, closing: bool) -> Effect {
        self.pointers.insert(id, position);

        let Some((first, second)) = self.pointers.pair() else {
            return Effect::None;
        };

        let distance = first.distance(second);

        let (amount, center) = {
            let pinch = self.pinch.get_or_insert(PinchState {
                center: first.midpoint(second),
                prev_distance: None,
            });

            match pinch.prev_distance.replace(distance) {
                // baseline frame
                None => return Effect::None,
                Some(previous) => ((distance - previous) / PINCH_ZOOM_DIVISOR, pinch.center),
            }
        };

        self.change_zoom(amount, Some(center), closing)
    }

    /// Pointer released: ends a pinch leg, applies drag inertia, or
    /// reports a tap for the session to turn into a zoom toggle.
    pub fn pointer_up(&mut self, id: PointerId, position: Vec2) -> Effect {
        self.pointers.remove(id);

        if self.pinch.is_some() {
            self.pointer_down = false;
            if self.pointers.is_empty() {
                self.pinch = None;
            } else if let Some(pinch) = &mut self.pinch {
                // next move re-establishes the distance baseline
                pinch.prev_distance = None;
            }
        }

        // a gesture that already fired (nav, close, pinch) must not carry
        // into tap or inertia handling
        if !self.pointer_down {
            return Effect::None;
        }
        self.pointer_down = false;

        let mut effect = Effect::None;

        if self.has_dragged {
            if self.drag_samples.len() >= INERTIA_SAMPLE_COUNT {
                let n = self.drag_samples.len();
                let first = self.drag_samples[n - 3];
                let mid = self.drag_samples[n - 2];
                let last = self.drag_samples[n - 1];

                if mid.distance(last) > INERTIA_MIN_DELTA_PX {
                    let fling =
                        self.translate.current() - (first - last) * INERTIA_MULTIPLIER;
                    let (bounded, _) = self.bound_translate(fling, self.render.current());
                    self.translate.set(bounded, TweenOptions::new(ZOOM_TWEEN_MS));
                }
            }
        } else {
            effect = Effect::Tap(position);
        }

        self.has_dragged = false;
        self.drag_samples.clear();
        effect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    const CONTAINER: Size = Size::new(800.0, 600.0);
    const BASE_FIT: Size = Size::new(800.0, 450.0);
    const NATURAL: Size = Size::new(1920.0, 1080.0);

    fn config() -> ZoomConfig {
        ZoomConfig {
            max_zoom: 10.0,
            inline: false,
            no_pinch: false,
            no_close: false,
            small_screen: false,
        }
    }

    fn engine() -> ZoomEngine {
        ZoomEngine::new(BASE_FIT, Some(NATURAL), CONTAINER, config())
    }

    fn zoomed_engine() -> ZoomEngine {
        let mut engine = engine();
        engine.change_zoom(10.0, None, false);
        engine.render.settle();
        engine.translate.settle();
        assert!(engine.is_zoomed());
        engine
    }

    fn press(engine: &mut ZoomEngine, id: u64, x: f32, y: f32) {
        engine.pointer_down(PointerEvent {
            id: PointerId(id),
            position: Vec2::new(x, y),
            button: PointerButton::Primary,
        });
    }

    #[test]
    fn fresh_engine_is_not_zoomed() {
        assert!(!engine().is_zoomed());
    }

    #[test]
    fn zoom_in_is_capped_by_natural_size() {
        let mut engine = engine();
        engine.change_zoom(100.0, None, false);
        assert_abs_diff_eq!(engine.render.target().width, NATURAL.width);
        assert_abs_diff_eq!(engine.render.target().height, NATURAL.height);
    }

    #[test]
    fn zoom_in_is_capped_by_max_zoom_multiple() {
        let small_natural = Size::new(16000.0, 9000.0);
        let mut engine = ZoomEngine::new(BASE_FIT, Some(small_natural), CONTAINER, config());
        engine.change_zoom(100.0, None, false);
        assert_abs_diff_eq!(engine.render.target().width, BASE_FIT.width * 10.0);
    }

    #[test]
    fn unknown_natural_size_only_caps_by_max_zoom() {
        let mut engine = ZoomEngine::new(BASE_FIT, None, CONTAINER, config());
        engine.change_zoom(100.0, None, false);
        assert_abs_diff_eq!(engine.render.target().width, BASE_FIT.width * 10.0);
    }

    #[test]
    fn full_zoom_out_resets_to_base_fit_and_origin() {
        let mut engine = zoomed_engine();
        engine.translate.set_immediate(Vec2::new(100.0, 50.0));

        engine.change_zoom(-10.0, None, false);
        engine.render.settle();
        engine.translate.settle();

        assert_abs_diff_eq!(engine.render.current().width, BASE_FIT.width);
        assert_abs_diff_eq!(engine.render.current().height, BASE_FIT.height);
        assert_abs_diff_eq!(engine.translate.current().x, 0.0);
        assert_abs_diff_eq!(engine.translate.current().y, 0.0);
    }

    #[test]
    fn zoom_never_drops_below_base_fit_over_any_sequence() {
        let mut engine = engine();
        for delta in [-120.0, 300.0, -500.0, 90.0, -30.0, -900.0] {
            engine.wheel(delta, Vec2::new(400.0, 300.0), false);
            engine.render.settle();
            engine.translate.settle();

            let width = engine.render.current().width;
            assert!(width >= BASE_FIT.width - 0.5, "width {width} below base");
            assert!(width <= NATURAL.width + 0.5, "width {width} above natural");
        }
    }

    #[test]
    fn change_zoom_is_ignored_while_closing() {
        let mut engine = engine();
        engine.change_zoom(5.0, None, true);
        assert!(!engine.render.is_animating());
    }

    #[test]
    fn wheel_anchor_shifts_translate_toward_cursor() {
        let mut engine = engine();
        // cursor right of center; zooming in should pull the image left
        engine.wheel(-300.0, Vec2::new(700.0, 300.0), false);
        assert!(engine.translate.target().x < 0.0);
    }

    #[test]
    fn inline_gallery_ignores_wheel_while_unzoomed() {
        let mut engine = ZoomEngine::new(
            BASE_FIT,
            Some(NATURAL),
            CONTAINER,
            ZoomConfig {
                inline: true,
                ..config()
            },
        );
        engine.wheel(-300.0, Vec2::new(400.0, 300.0), false);
        assert!(!engine.render.is_animating());
    }

    #[test]
    fn right_click_does_not_start_a_gesture() {
        let mut engine = engine();
        engine.pointer_down(PointerEvent {
            id: PointerId(1),
            position: Vec2::new(400.0, 300.0),
            button: PointerButton::Secondary,
        });
        let effect = engine.pointer_move(PointerId(1), Vec2::new(500.0, 300.0), false);
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn unzoomed_swipe_right_requests_prev_exactly_once() {
        let mut engine = engine();
        press(&mut engine, 1, 400.0, 300.0);

        let effect = engine.pointer_move(PointerId(1), Vec2::new(450.0, 305.0), false);
        assert_eq!(effect, Effect::RequestPrev);

        // same swipe keeps moving: no second trigger
        let effect = engine.pointer_move(PointerId(1), Vec2::new(500.0, 305.0), false);
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn unzoomed_swipe_left_requests_next() {
        let mut engine = engine();
        press(&mut engine, 1, 400.0, 300.0);
        let effect = engine.pointer_move(PointerId(1), Vec2::new(350.0, 295.0), false);
        assert_eq!(effect, Effect::RequestNext);
    }

    #[test]
    fn vertical_movement_guards_horizontal_swipes() {
        let mut engine = engine();
        press(&mut engine, 1, 400.0, 300.0);
        // diagonal: dx past threshold but dy past the guard
        let effect = engine.pointer_move(PointerId(1), Vec2::new(450.0, 360.0), false);
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn swipe_up_requests_close() {
        let mut engine = engine();
        press(&mut engine, 1, 400.0, 300.0);
        let effect = engine.pointer_move(PointerId(1), Vec2::new(400.0, 200.0), false);
        assert_eq!(effect, Effect::RequestClose);
    }

    #[test]
    fn swipe_up_with_no_close_fires_nothing_but_ends_gesture() {
        let mut engine = ZoomEngine::new(
            BASE_FIT,
            Some(NATURAL),
            CONTAINER,
            ZoomConfig {
                no_close: true,
                ..config()
            },
        );
        press(&mut engine, 1, 400.0, 300.0);

        let effect = engine.pointer_move(PointerId(1), Vec2::new(400.0, 200.0), false);
        assert_eq!(effect, Effect::None);

        // gesture ended: a later horizontal move no longer navigates
        let effect = engine.pointer_move(PointerId(1), Vec2::new(500.0, 200.0), false);
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn zoomed_drag_pans_immediately_within_bounds() {
        let mut engine = zoomed_engine();
        press(&mut engine, 1, 400.0, 300.0);

        engine.pointer_move(PointerId(1), Vec2::new(390.0, 300.0), false);
        engine.pointer_move(PointerId(1), Vec2::new(380.0, 300.0), false);
        engine.pointer_move(PointerId(1), Vec2::new(300.0, 300.0), false);

        // drag of -100 px, well inside the 560 px pan bound
        assert_abs_diff_eq!(engine.translate.current().x, -100.0);
        assert!(!engine.translate.is_animating());
    }

    #[test]
    fn translate_is_bounded_after_drag_ends() {
        let mut engine = zoomed_engine();
        press(&mut engine, 1, 400.0, 300.0);

        engine.pointer_move(PointerId(1), Vec2::new(395.0, 300.0), false);
        engine.pointer_move(PointerId(1), Vec2::new(390.0, 300.0), false);
        engine.pointer_move(PointerId(1), Vec2::new(390.0, 800.0), false);
        engine.pointer_up(PointerId(1), Vec2::new(390.0, 800.0));
        engine.translate.settle();

        let max_y = (NATURAL.height - CONTAINER.height) / 2.0;
        assert!(engine.translate.current().y.abs() <= max_y + 0.5);
    }

    #[test]
    fn axis_without_headroom_does_not_pan() {
        // slightly zoomed image still shorter than the container: no
        // vertical panning headroom, y is forced to zero
        let mut engine = engine();
        engine.change_zoom(0.05, None, false);
        engine.render.settle();
        press(&mut engine, 1, 400.0, 300.0);

        engine.pointer_move(PointerId(1), Vec2::new(400.0, 320.0), false);
        engine.pointer_move(PointerId(1), Vec2::new(400.0, 340.0), false);
        engine.pointer_move(PointerId(1), Vec2::new(400.0, 500.0), false);

        assert_abs_diff_eq!(engine.translate.current().y, 0.0);
    }

    #[test]
    fn small_screen_over_drag_is_damped() {
        let mut engine = zoomed_engine();
        engine.set_small_screen(true);
        let max_x = (NATURAL.width - CONTAINER.width) / 2.0;
        engine.translate.set_immediate(Vec2::new(-max_x, 0.0));

        press(&mut engine, 1, 400.0, 300.0);
        engine.pointer_move(PointerId(1), Vec2::new(398.0, 300.0), false);
        engine.pointer_move(PointerId(1), Vec2::new(396.0, 300.0), false);
        // 10 px past the bound: damped to 1 px, no navigation yet
        engine.pointer_move(PointerId(1), Vec2::new(390.0, 300.0), false);

        assert_abs_diff_eq!(engine.translate.current().x, -max_x - 1.0, epsilon = 0.01);
    }

    #[test]
    fn small_screen_over_drag_past_threshold_requests_next_once() {
        let mut engine = zoomed_engine();
        engine.set_small_screen(true);
        let max_x = (NATURAL.width - CONTAINER.width) / 2.0;
        engine.translate.set_immediate(Vec2::new(-max_x, 0.0));

        press(&mut engine, 1, 400.0, 300.0);
        engine.pointer_move(PointerId(1), Vec2::new(398.0, 300.0), false);
        engine.pointer_move(PointerId(1), Vec2::new(396.0, 300.0), false);

        // 50 px past the bound: triggers next exactly once
        let effect = engine.pointer_move(PointerId(1), Vec2::new(350.0, 300.0), false);
        assert_eq!(effect, Effect::RequestNext);

        let effect = engine.pointer_move(PointerId(1), Vec2::new(300.0, 300.0), false);
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn large_screen_over_drag_clamps_hard() {
        let mut engine = zoomed_engine();
        let max_x = (NATURAL.width - CONTAINER.width) / 2.0;
        engine.translate.set_immediate(Vec2::new(-max_x, 0.0));

        press(&mut engine, 1, 400.0, 300.0);
        engine.pointer_move(PointerId(1), Vec2::new(398.0, 300.0), false);
        engine.pointer_move(PointerId(1), Vec2::new(396.0, 300.0), false);
        let effect = engine.pointer_move(PointerId(1), Vec2::new(300.0, 300.0), false);

        assert_eq!(effect, Effect::None);
        assert_abs_diff_eq!(engine.translate.current().x, -max_x);
    }

    #[test]
    fn pinch_first_frame_is_baseline_only() {
        let mut engine = engine();
        press(&mut engine, 1, 300.0, 300.0);
        press(&mut engine, 2, 500.0, 300.0);

        let effect = engine.pointer_move(PointerId(2), Vec2::new(500.0, 300.0), false);
        assert_eq!(effect, Effect::None);
        assert!(!engine.render.is_animating());
    }

    #[test]
    fn pinch_out_zooms_in() {
        let mut engine = engine();
        press(&mut engine, 1, 300.0, 300.0);
        press(&mut engine, 2, 500.0, 300.0);

        engine.pointer_move(PointerId(2), Vec2::new(500.0, 300.0), false);
        engine.pointer_move(PointerId(2), Vec2::new(600.0, 300.0), false);

        assert!(engine.render.target().width > BASE_FIT.width);
    }

    #[test]
    fn pinch_in_zooms_out() {
        let mut engine = zoomed_engine();
        press(&mut engine, 1, 300.0, 300.0);
        press(&mut engine, 2, 500.0, 300.0);

        engine.pointer_move(PointerId(2), Vec2::new(500.0, 300.0), false);
        engine.pointer_move(PointerId(2), Vec2::new(400.0, 300.0), false);

        assert!(engine.render.target().width < NATURAL.width);
    }

    #[test]
    fn no_pinch_option_disables_pinch_handling() {
        let mut engine = ZoomEngine::new(
            BASE_FIT,
            Some(NATURAL),
            CONTAINER,
            ZoomConfig {
                no_pinch: true,
                ..config()
            },
        );
        press(&mut engine, 1, 300.0, 300.0);
        press(&mut engine, 2, 500.0, 300.0);

        engine.pointer_move(PointerId(2), Vec2::new(500.0, 300.0), false);
        engine.pointer_move(PointerId(2), Vec2::new(600.0, 300.0), false);

        assert!(!engine.render.is_animating());
    }

    #[test]
    fn lifting_one_pinch_finger_resets_the_baseline() {
        let mut engine = engine();
        press(&mut engine, 1, 300.0, 300.0);
        press(&mut engine, 2, 500.0, 300.0);

        engine.pointer_move(PointerId(2), Vec2::new(500.0, 300.0), false);
        engine.pointer_up(PointerId(2), Vec2::new(500.0, 300.0));

        press(&mut engine, 2, 520.0, 300.0);
        // first frame after re-press is a baseline again, not a zoom jump
        let effect = engine.pointer_move(PointerId(2), Vec2::new(520.0, 300.0), false);
        assert_eq!(effect, Effect::None);
        assert!(!engine.render.is_animating());
    }

    #[test]
    fn plain_tap_reports_tap_effect() {
        let mut engine = engine();
        press(&mut engine, 1, 420.0, 310.0);
        let effect = engine.pointer_up(PointerId(1), Vec2::new(420.0, 310.0));
        assert_eq!(effect, Effect::Tap(Vec2::new(420.0, 310.0)));
    }

    #[test]
    fn drag_release_does_not_report_tap() {
        let mut engine = zoomed_engine();
        press(&mut engine, 1, 400.0, 300.0);
        engine.pointer_move(PointerId(1), Vec2::new(390.0, 300.0), false);
        engine.pointer_move(PointerId(1), Vec2::new(380.0, 300.0), false);
        engine.pointer_move(PointerId(1), Vec2::new(370.0, 300.0), false);

        let effect = engine.pointer_up(PointerId(1), Vec2::new(370.0, 300.0));
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn fast_drag_release_applies_inertia() {
        let mut engine = zoomed_engine();
        press(&mut engine, 1, 400.0, 300.0);
        engine.pointer_move(PointerId(1), Vec2::new(390.0, 300.0), false);
        engine.pointer_move(PointerId(1), Vec2::new(370.0, 300.0), false);
        engine.pointer_move(PointerId(1), Vec2::new(340.0, 300.0), false);

        let before = engine.translate.current().x;
        engine.pointer_up(PointerId(1), Vec2::new(340.0, 300.0));

        // fling continues in the drag direction
        assert!(engine.translate.target().x < before);
    }

    #[test]
    fn slow_drag_release_skips_inertia() {
        let mut engine = zoomed_engine();
        press(&mut engine, 1, 400.0, 300.0);
        engine.pointer_move(PointerId(1), Vec2::new(398.0, 300.0), false);
        engine.pointer_move(PointerId(1), Vec2::new(396.0, 300.0), false);
        engine.pointer_move(PointerId(1), Vec2::new(394.0, 300.0), false);

        let before = engine.translate.current();
        engine.pointer_up(PointerId(1), Vec2::new(394.0, 300.0));

        assert_eq!(engine.translate.target(), before);
    }

    #[test]
    fn abandon_gesture_clears_all_pointer_state() {
        let mut engine = zoomed_engine();
        press(&mut engine, 1, 300.0, 300.0);
        press(&mut engine, 2, 500.0, 300.0);
        engine.pointer_move(PointerId(2), Vec2::new(520.0, 300.0), false);

        engine.abandon_gesture();

        // a later release has nothing to act on
        let effect = engine.pointer_up(PointerId(1), Vec2::new(300.0, 300.0));
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn toggle_zoom_roundtrip_returns_to_base_fit() {
        let mut engine = engine();
        engine.toggle_zoom(Vec2::new(400.0, 300.0), false);
        engine.render.settle();
        assert!(engine.is_zoomed());

        engine.toggle_zoom(Vec2::new(400.0, 300.0), false);
        engine.render.settle();
        engine.translate.settle();
        assert!(!engine.is_zoomed());
        assert_abs_diff_eq!(engine.translate.current().x, 0.0);
    }

    #[test]
    fn sizes_hint_tracks_largest_rendered_width() {
        let mut engine = engine();
        assert_abs_diff_eq!(engine.sizes_hint, BASE_FIT.width);

        engine.change_zoom(10.0, None, false);
        assert_abs_diff_eq!(engine.sizes_hint, NATURAL.width);

        // zooming back out never shrinks the hint
        engine.change_zoom(-0.5, None, false);
        assert_abs_diff_eq!(engine.sizes_hint, NATURAL.width);
    }

    #[test]
    fn drag_while_closing_does_not_pan() {
        let mut engine = zoomed_engine();
        press(&mut engine, 1, 400.0, 300.0);
        engine.pointer_move(PointerId(1), Vec2::new(390.0, 300.0), true);
        engine.pointer_move(PointerId(1), Vec2::new(380.0, 300.0), true);
        engine.pointer_move(PointerId(1), Vec2::new(300.0, 300.0), true);

        assert_abs_diff_eq!(engine.translate.current().x, 0.0);
    }
}
