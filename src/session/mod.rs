// SPDX-License-Identifier: MPL-2.0
//! Gallery session state machine.
//!
//! [`Lightbox`] owns the classified item list, the current position, and
//! the open/closing lifecycle, and orchestrates the zoom engine and the
//! load coordinator. Event entry points return [`Command`] values for the
//! host to execute (decodes, thumb probes); completions come back through
//! [`Lightbox::decode_complete`] and [`Lightbox::probe_complete`]. All
//! state is single-threaded; superseded work is cancelled by tween
//! generations and the loader's once-only request discipline.

pub mod loader;

pub use loader::{LoadCoordinator, LoadState};

use crate::config::defaults::SMALL_SCREEN_MAX_WIDTH;
use crate::config::OpenOptions;
use crate::error::Error;
use crate::geometry::{fit, Size, Vec2};
use crate::item::{classify_all, GalleryItem};
use crate::zoom::{Effect, PointerEvent, PointerId, ZoomConfig, ZoomEngine};
use tracing::{debug, warn};

/// Session lifecycle. `Closing` only ever returns to `Open` through a
/// fresh `open()` call, never by a direct backward transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

/// Keyboard input relevant to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
}

/// Asynchronous work the host must carry out for the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Decode the media of an image item and report back through
    /// `decode_complete`.
    Decode {
        index: usize,
        /// Image URL or responsive source set.
        url: String,
        /// Whether `url` is a source set needing a `sizes` attribute.
        srcset: bool,
        /// Value for the `sizes` attribute.
        sizes: String,
    },
    /// Decode a thumbnail to learn its natural size and report back
    /// through `probe_complete`.
    ProbeThumb { index: usize, url: String },
}

/// One lightbox session over a host container.
#[derive(Debug, Default)]
pub struct Lightbox {
    items: Option<Vec<GalleryItem>>,
    position: usize,
    lifecycle: Lifecycle,
    container: Size,
    movement: i32,
    small_screen: bool,
    has_thumbs: bool,
    closing_while_zoomed: bool,
    opts: OpenOptions,
    zoom: Option<ZoomEngine>,
    loader: LoadCoordinator,
}

impl Lightbox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Opens a session over the classified items of `options`.
    ///
    /// A no-op (remaining `Closed`) when classification leaves the list
    /// empty, or when a session is already open. Opening during `Closing`
    /// finishes the close first.
    pub fn open(&mut self, mut options: OpenOptions) -> Vec<Command> {
        match self.lifecycle {
            Lifecycle::Closed => {}
            Lifecycle::Closing => self.finish_close(),
            Lifecycle::Opening | Lifecycle::Open => {
                warn!("open() ignored: session already open");
                return Vec::new();
            }
        }

        let raws = std::mem::take(&mut options.items);
        let items = classify_all(&raws, &options);

        if items.is_empty() {
            warn!("open() ignored: no items survived classification");
            return Vec::new();
        }

        let mut position = options.position.min(items.len() - 1);
        if let Some(el) = &options.el {
            if let Some(found) = items
                .iter()
                .position(|item| item.key.as_deref() == Some(el.as_str()))
            {
                position = found;
            }
        }

        self.container = options.container;
        self.small_screen = self.container.width < SMALL_SCREEN_MAX_WIDTH;
        self.has_thumbs = options.thumbs && items.len() > 1;
        self.movement = 0;
        self.closing_while_zoomed = false;
        self.loader.reset(items.len());
        self.items = Some(items);
        self.position = position;
        self.opts = options;
        self.lifecycle = Lifecycle::Opening;
        self.make_zoom_engine();

        debug!(position, "lightbox opening");

        if let (Some(hook), Some(items)) =
            (self.opts.hooks.on_open.as_mut(), self.items.as_ref())
        {
            hook(&items[self.position]);
        }

        let mut commands = self.probe_commands();
        commands.extend(self.request_loads_around());
        commands
    }

    /// Called by the host when the entrance transition finishes.
    pub fn mark_open(&mut self) {
        if self.lifecycle == Lifecycle::Opening {
            self.lifecycle = Lifecycle::Open;
        }
    }

    /// Requests close. If the active image is zoomed, its size and
    /// translation first tween back to the base fit so the exit never
    /// crops a zoomed frame; the visual removal composes with that tween.
    pub fn close(&mut self) {
        if !matches!(self.lifecycle, Lifecycle::Opening | Lifecycle::Open) {
            return;
        }

        if let (Some(hook), Some(items)) =
            (self.opts.hooks.on_close.as_mut(), self.items.as_ref())
        {
            hook(&items[self.position]);
        }

        self.lifecycle = Lifecycle::Closing;

        if let Some(engine) = &mut self.zoom {
            if engine.is_zoomed() && !self.opts.intro {
                engine.reset_to_fit();
                self.closing_while_zoomed = true;
            }
            engine.abandon_gesture();
        }

        debug!("lightbox closing");
    }

    /// Called by the host when the exit transition finishes; clears the
    /// item list and completes the transition to `Closed`.
    pub fn finish_close(&mut self) {
        if self.lifecycle != Lifecycle::Closing {
            return;
        }

        self.items = None;
        self.zoom = None;
        self.closing_while_zoomed = false;
        self.lifecycle = Lifecycle::Closed;

        if let Some(hook) = self.opts.hooks.on_closed.as_mut() {
            hook();
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Moves to `index`, wrapping modulo the item count in both
    /// directions. Idempotent at the current position: no transition, no
    /// commands.
    pub fn set_position(&mut self, index: i64) -> Vec<Command> {
        if !matches!(self.lifecycle, Lifecycle::Opening | Lifecycle::Open) {
            return Vec::new();
        }
        let Some(items) = &self.items else {
            return Vec::new();
        };

        let len = items.len() as i64;
        let wrapped = index.rem_euclid(len) as usize;
        if wrapped == self.position {
            return Vec::new();
        }

        self.movement = if index > self.position as i64 { 1 } else { -1 };

        if let Some(engine) = &mut self.zoom {
            engine.abandon_gesture();
        }

        self.position = wrapped;
        self.make_zoom_engine();

        if let (Some(hook), Some(items)) =
            (self.opts.hooks.on_update.as_mut(), self.items.as_ref())
        {
            hook(&items[self.position]);
        }

        self.request_loads_around()
    }

    pub fn prev(&mut self) -> Vec<Command> {
        self.set_position(self.position as i64 - 1)
    }

    pub fn next(&mut self) -> Vec<Command> {
        self.set_position(self.position as i64 + 1)
    }

    // ------------------------------------------------------------------
    // Host events
    // ------------------------------------------------------------------

    /// Container resized. Last write wins and repeated identical calls
    /// are harmless. Recomputes every item's render size; the active
    /// zoom resets to the new fit except on small screens for overlay
    /// galleries, where mobile browsers fire spurious resizes mid-drag.
    pub fn resize(&mut self, size: Size) {
        self.container = size;
        self.small_screen = size.width < SMALL_SCREEN_MAX_WIDTH;

        let scale = self.opts.scale;
        let gap = self.opts.gap;

        if let Some(items) = &mut self.items {
            for item in items.iter_mut() {
                item.render_size = fit(item.natural_size, size, scale, gap);
            }
        }

        if let Some(engine) = &mut self.zoom {
            engine.set_small_screen(self.small_screen);
            let base = self
                .items
                .as_ref()
                .map_or(Size::ZERO, |items| items[self.position].render_size);
            let reset = self.opts.inline || !self.small_screen;
            engine.set_geometry(base, size, reset);
        }

        if let (Some(hook), Some(items)) =
            (self.opts.hooks.on_resize.as_mut(), self.items.as_ref())
        {
            hook(size, &items[self.position]);
        }
    }

    /// Keyboard input. Inline galleries leave the keyboard to the page.
    pub fn key(&mut self, key: Key) -> Vec<Command> {
        if self.opts.inline || !matches!(self.lifecycle, Lifecycle::Opening | Lifecycle::Open) {
            return Vec::new();
        }

        match key {
            Key::Escape => {
                if !self.opts.no_close {
                    self.close();
                }
                Vec::new()
            }
            Key::ArrowLeft => self.prev(),
            Key::ArrowRight => self.next(),
        }
    }

    /// A release on the backdrop (outside any item content) closes the
    /// gallery unless `no_close` is set.
    pub fn overlay_release(&mut self) {
        if !self.opts.no_close {
            self.close();
        }
    }

    pub fn pointer_down(&mut self, event: PointerEvent) {
        if let Some(engine) = &mut self.zoom {
            engine.pointer_down(event);
        }
    }

    pub fn pointer_move(&mut self, id: PointerId, position: Vec2) -> Vec<Command> {
        let closing = self.lifecycle == Lifecycle::Closing;
        let effect = match &mut self.zoom {
            Some(engine) => engine.pointer_move(id, position, closing),
            None => Effect::None,
        };
        self.apply_effect(effect)
    }

    pub fn pointer_up(&mut self, id: PointerId, position: Vec2) -> Vec<Command> {
        let effect = match &mut self.zoom {
            Some(engine) => engine.pointer_up(id, position),
            None => Effect::None,
        };
        self.apply_effect(effect)
    }

    pub fn wheel(&mut self, delta_y: f32, position: Vec2) -> Vec<Command> {
        let closing = self.lifecycle == Lifecycle::Closing;
        let effect = match &mut self.zoom {
            Some(engine) => engine.wheel(delta_y, position, closing),
            None => Effect::None,
        };
        self.apply_effect(effect)
    }

    // ------------------------------------------------------------------
    // Load completions
    // ------------------------------------------------------------------

    /// Reports the result of a [`Command::Decode`]. A success replaces an
    /// estimated natural size and recomputes the render size; the active
    /// item's completion also (re)requests neighbor preloads. A failure
    /// for the active item reaches the `on_error` hook; preload failures
    /// are only logged.
    pub fn decode_complete(
        &mut self,
        index: usize,
        result: crate::error::Result<Size>,
    ) -> Vec<Command> {
        let Some(items) = &self.items else {
            return Vec::new();
        };
        if index >= items.len() {
            return Vec::new();
        }

        match result {
            Ok(natural) => {
                let url = items[index].content.media_ref().to_owned();
                self.loader.complete(index, &url, natural);
                self.apply_decoded(index, natural);

                if index == self.position {
                    self.request_neighbor_loads()
                } else {
                    Vec::new()
                }
            }
            Err(error) => {
                self.loader.fail(index);
                self.report_load_error(index, &error);
                Vec::new()
            }
        }
    }

    /// Reports a decoded thumbnail size. Only fills the gap when the item
    /// still has no natural size; the estimate is superseded by the real
    /// decode later.
    pub fn probe_complete(&mut self, index: usize, thumb_natural: Size) {
        let container = self.container;
        let scale = self.opts.scale;
        let gap = self.opts.gap;

        let Some(items) = &mut self.items else {
            return;
        };
        let Some(item) = items.get_mut(index) else {
            return;
        };
        if item.natural_size.is_some() {
            return;
        }

        let estimate = fit(Some(thumb_natural), container, scale, gap);
        item.natural_size = Some(estimate);
        item.size_estimated = true;
        item.render_size = fit(Some(estimate), container, scale, gap);

        if index == self.position {
            let base = item.render_size;
            if let Some(engine) = &mut self.zoom {
                engine.set_natural(estimate);
                engine.set_geometry(base, container, false);
            }
        }
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    /// The normalized item list, while open.
    #[must_use]
    pub fn items(&self) -> Option<&[GalleryItem]> {
        self.items.as_deref()
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Sign of the last position change; drives the transition direction.
    #[must_use]
    pub fn movement(&self) -> i32 {
        self.movement
    }

    #[must_use]
    pub fn small_screen(&self) -> bool {
        self.small_screen
    }

    /// Whether the thumbnail strip should be shown.
    #[must_use]
    pub fn has_thumbs(&self) -> bool {
        self.has_thumbs
    }

    /// True while a close is composing with a zoom-out tween.
    #[must_use]
    pub fn closing_while_zoomed(&self) -> bool {
        self.closing_while_zoomed
    }

    /// Whether the active item still awaits its decode, for the host's
    /// delayed loading placeholder.
    #[must_use]
    pub fn active_loaded(&self) -> bool {
        self.loader.is_loaded(self.position)
    }

    /// Zoom engine of the active image item, if any.
    #[must_use]
    pub fn zoom(&self) -> Option<&ZoomEngine> {
        self.zoom.as_ref()
    }

    /// Mutable access for the host's tween driver.
    pub fn zoom_mut(&mut self) -> Option<&mut ZoomEngine> {
        self.zoom.as_mut()
    }

    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.zoom.as_ref().is_some_and(ZoomEngine::is_zoomed)
    }

    /// External zoom control for the active image: `true` zooms to the
    /// ceiling, `false` returns to the base fit.
    pub fn set_item_zoom(&mut self, zoomed: bool) {
        let closing = self.lifecycle == Lifecycle::Closing;
        if let Some(engine) = &mut self.zoom {
            let max_zoom = self.opts.max_zoom;
            let amount = if zoomed { max_zoom } else { -max_zoom };
            let _ = engine.change_zoom(amount, None, closing);
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Maps a gesture effect onto session operations.
    fn apply_effect(&mut self, effect: Effect) -> Vec<Command> {
        match effect {
            Effect::None => Vec::new(),
            Effect::RequestPrev => self.prev(),
            Effect::RequestNext => self.next(),
            Effect::RequestClose => {
                self.close();
                Vec::new()
            }
            Effect::Tap(position) => {
                let handled = match (
                    self.opts.hooks.on_image_click.as_mut(),
                    self.items.as_ref(),
                ) {
                    (Some(hook), Some(items)) => hook(&items[self.position]),
                    _ => false,
                };

                if !handled {
                    let closing = self.lifecycle == Lifecycle::Closing;
                    if let Some(engine) = &mut self.zoom {
                        // no pointer is down here, so the toggle cannot
                        // raise a navigation effect
                        let _ = engine.toggle_zoom(position, closing);
                    }
                }
                Vec::new()
            }
        }
    }

    /// Creates the zoom engine when the active item is an image, and
    /// drops any previous engine otherwise.
    fn make_zoom_engine(&mut self) {
        self.zoom = None;

        let Some(items) = &self.items else {
            return;
        };
        let item = &items[self.position];
        if !item.is_image() {
            return;
        }

        let cfg = ZoomConfig {
            max_zoom: item.max_zoom.unwrap_or(self.opts.max_zoom),
            inline: self.opts.inline,
            no_pinch: self.opts.no_pinch,
            no_close: self.opts.no_close,
            small_screen: self.small_screen,
        };

        self.zoom = Some(ZoomEngine::new(
            item.render_size,
            item.natural_size,
            self.container,
            cfg,
        ));
    }

    /// Thumb probes for every item that still needs one.
    fn probe_commands(&self) -> Vec<Command> {
        let Some(items) = &self.items else {
            return Vec::new();
        };

        items
            .iter()
            .filter(|item| item.needs_probe())
            .map(|item| Command::ProbeThumb {
                index: item.index,
                url: item.thumb.clone().unwrap_or_default(),
            })
            .collect()
    }

    /// Decode requests for the active item and both wraparound neighbors.
    fn request_loads_around(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        if let Some(command) = self.request_decode(self.position) {
            commands.push(command);
        }
        commands.extend(self.request_neighbor_loads());
        commands
    }

    /// Decode requests for the wraparound neighbors only; already loaded
    /// or in-flight items never re-trigger.
    fn request_neighbor_loads(&mut self) -> Vec<Command> {
        let Some(items) = &self.items else {
            return Vec::new();
        };
        let len = items.len();

        let next = (self.position + 1) % len;
        let prev = (self.position + len - 1) % len;

        let mut neighbors = vec![next];
        if prev != next {
            neighbors.push(prev);
        }

        let position = self.position;
        neighbors
            .into_iter()
            .filter(|&index| index != position)
            .filter_map(|index| self.request_decode(index))
            .collect()
    }

    /// Issues a decode for an image item exactly once. A cached natural
    /// size is applied synchronously without a command.
    fn request_decode(&mut self, index: usize) -> Option<Command> {
        let (url, srcset, sizes) = {
            let items = self.items.as_ref()?;
            let item = items.get(index)?;
            if !item.is_image() {
                return None;
            }

            let crate::item::ItemContent::Image { src, srcset } = &item.content else {
                return None;
            };

            let sizes = self
                .opts
                .sizes
                .clone()
                .unwrap_or_else(|| format!("{}px", item.render_size.width as i64));

            (src.clone(), *srcset, sizes)
        };

        if let Some(natural) = self.loader.cached(&url) {
            if self.loader.begin(index) {
                self.loader.complete(index, &url, natural);
                self.apply_decoded(index, natural);
            }
            return None;
        }

        if !self.loader.begin(index) {
            return None;
        }

        Some(Command::Decode {
            index,
            url,
            srcset,
            sizes,
        })
    }

    /// Applies a decoded natural size: replaces estimates, recomputes the
    /// render size, and updates the active zoom engine's geometry.
    fn apply_decoded(&mut self, index: usize, natural: Size) {
        let container = self.container;
        let scale = self.opts.scale;
        let gap = self.opts.gap;

        let Some(items) = &mut self.items else {
            return;
        };
        let Some(item) = items.get_mut(index) else {
            return;
        };

        if item.size_estimated || item.natural_size.is_none() {
            item.natural_size = Some(natural);
            item.size_estimated = false;
            item.render_size = fit(Some(natural), container, scale, gap);
        }

        if index == self.position {
            let base = item.render_size;
            if let Some(engine) = &mut self.zoom {
                engine.set_natural(natural);
                engine.set_geometry(base, container, false);
            }
        }
    }

    fn report_load_error(&mut self, index: usize, error: &Error) {
        if index == self.position {
            if let (Some(hook), Some(items)) =
                (self.opts.hooks.on_error.as_mut(), self.items.as_ref())
            {
                hook(&items[index], error);
            }
        } else {
            debug!(index, %error, "preload failed, ignoring");
        }
    }
}
