// SPDX-License-Identifier: MPL-2.0
//! Session options and lifecycle hooks.
//!
//! [`OpenOptions`] is the whole configuration surface of the engine: one
//! value passed to [`crate::Lightbox::open`]. There is no persisted
//! configuration; a lightbox session is configured per open call.

pub mod defaults;

use crate::error::Error;
use crate::geometry::Size;
use crate::item::{GalleryItem, ItemKind, RawItem};
use std::fmt;

pub use defaults::{DEFAULT_MAX_ZOOM, DEFAULT_SCALE};

/// Options for one `open()` call.
///
/// Fields mirror the recognized option set; anything else a caller might
/// want to pass simply has no field here.
pub struct OpenOptions {
    /// Raw inputs to classify into gallery items.
    pub items: Vec<RawItem>,

    /// Start position into the classified list. Out-of-range values are
    /// clamped; [`OpenOptions::el`] overrides this when it matches.
    pub position: usize,

    /// Key of the element that triggered the open; when it matches an
    /// item's key, that item's index overrides `position`.
    pub el: Option<String>,

    /// Size of the hosting container at open time.
    pub container: Size,

    /// Content scale factor relative to the container.
    pub scale: f32,

    /// Gap reserved on every side of the stage, in pixels.
    pub gap: f32,

    /// Zoom ceiling as a multiple of the base fit size.
    pub max_zoom: f32,

    /// Override for the responsive `sizes` attribute; defaults to the
    /// fitted width of each item.
    pub sizes: Option<String>,

    /// Whether a thumbnail strip should be shown (rendered externally).
    pub thumbs: bool,

    /// Inline gallery: no scroll lock, wheel scrolls past while unzoomed.
    pub inline: bool,

    /// Use the intro (fly) entrance transition instead of scaling from
    /// the trigger element.
    pub intro: bool,

    /// Disable all close paths except an explicit `close()` call.
    pub no_close: bool,

    /// Disable pinch-to-zoom handling.
    pub no_pinch: bool,

    /// Allow-list of item types; items of other types are dropped during
    /// classification.
    pub types: Option<Vec<ItemKind>>,

    /// Lifecycle callbacks.
    pub hooks: Hooks,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            position: 0,
            el: None,
            container: Size::ZERO,
            scale: DEFAULT_SCALE,
            gap: 0.0,
            max_zoom: DEFAULT_MAX_ZOOM,
            sizes: None,
            thumbs: false,
            inline: false,
            intro: false,
            no_close: false,
            no_pinch: false,
            types: None,
            hooks: Hooks::default(),
        }
    }
}

impl fmt::Debug for OpenOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenOptions")
            .field("items", &self.items.len())
            .field("position", &self.position)
            .field("container", &self.container)
            .field("scale", &self.scale)
            .field("gap", &self.gap)
            .field("max_zoom", &self.max_zoom)
            .field("thumbs", &self.thumbs)
            .field("inline", &self.inline)
            .field("no_close", &self.no_close)
            .field("no_pinch", &self.no_pinch)
            .field("types", &self.types)
            .finish_non_exhaustive()
    }
}

/// Lifecycle and interaction callbacks, all optional.
///
/// Hooks receive the affected item. No hook is ever re-entered: the
/// session never invokes a hook from inside another hook's call.
#[derive(Default)]
pub struct Hooks {
    /// Gallery opened; receives the starting item.
    pub on_open: Option<Box<dyn FnMut(&GalleryItem)>>,

    /// Active item changed.
    pub on_update: Option<Box<dyn FnMut(&GalleryItem)>>,

    /// Close requested; fires before the exit transition.
    pub on_close: Option<Box<dyn FnMut(&GalleryItem)>>,

    /// Exit transition finished; session is fully closed.
    pub on_closed: Option<Box<dyn FnMut()>>,

    /// Container resized.
    pub on_resize: Option<Box<dyn FnMut(Size, &GalleryItem)>>,

    /// Media failed to load or decode.
    pub on_error: Option<Box<dyn FnMut(&GalleryItem, &Error)>>,

    /// Tap on the active image. Return `true` to claim the click and
    /// suppress the default tap-to-zoom toggle.
    pub on_image_click: Option<Box<dyn FnMut(&GalleryItem) -> bool>>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("on_open", &self.on_open.is_some())
            .field("on_update", &self.on_update.is_some())
            .field("on_close", &self.on_close.is_some())
            .field("on_closed", &self.on_closed.is_some())
            .field("on_resize", &self.on_resize.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("on_image_click", &self.on_image_click.is_some())
            .finish()
    }
}
