// SPDX-License-Identifier: MPL-2.0
//! Typed gallery items.
//!
//! Content polymorphism lives in [`ItemContent`]: an item is classified
//! exactly once, and every downstream consumer dispatches on the tagged
//! variant instead of re-sniffing attributes at render time.

pub mod classifier;
pub mod links;

pub use classifier::{classify, classify_all, ElementSource, ItemDescriptor, RawItem, ThumbSource};

use crate::geometry::Size;
use serde::Deserialize;
use std::collections::BTreeMap;

/// The four content types a gallery item can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Image,
    Video,
    Iframe,
    Html,
}

/// How a thumbnail visually fits its box; inherited by the entrance
/// transition so the full image scales out of the thumbnail cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    Cover,
    Contain,
    #[default]
    Fill,
}

/// One `<source>`-like entry of an audio/video item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MediaSource {
    pub src: String,

    /// MIME type, e.g. `video/mp4` or `audio/mpeg`.
    #[serde(default, rename = "type")]
    pub mime: Option<String>,
}

impl MediaSource {
    #[must_use]
    pub fn new(src: impl Into<String>, mime: Option<&str>) -> Self {
        Self {
            src: src.into(),
            mime: mime.map(str::to_owned),
        }
    }

    /// Whether this source carries audio-only content.
    #[must_use]
    pub fn is_audio(&self) -> bool {
        self.mime
            .as_deref()
            .is_some_and(|mime| mime.contains("audio"))
    }
}

/// Resolved content locator, type-specific. Immutable once classified.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemContent {
    Image {
        /// Image URL, or a responsive source set when `srcset` is true.
        src: String,
        /// Whether `src` is a `srcset`-style list (` 300w`/` 2x` markers).
        srcset: bool,
    },
    Video {
        sources: Vec<MediaSource>,
        tracks: Vec<MediaSource>,
        /// True when the first source is audio; the render layer creates
        /// an audio element instead of a video element.
        audio_only: bool,
    },
    Iframe {
        src: String,
    },
    Html {
        markup: String,
    },
}

impl ItemContent {
    #[must_use]
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemContent::Image { .. } => ItemKind::Image,
            ItemContent::Video { .. } => ItemKind::Video,
            ItemContent::Iframe { .. } => ItemKind::Iframe,
            ItemContent::Html { .. } => ItemKind::Html,
        }
    }

    /// The primary locator of this content: image URL, first video source,
    /// iframe URL, or the raw markup.
    #[must_use]
    pub fn media_ref(&self) -> &str {
        match self {
            ItemContent::Image { src, .. } => src,
            ItemContent::Video { sources, .. } => {
                sources.first().map_or("", |source| source.src.as_str())
            }
            ItemContent::Iframe { src } => src,
            ItemContent::Html { markup } => markup,
        }
    }
}

/// One piece of gallery content, produced by classification.
#[derive(Debug, Clone)]
pub struct GalleryItem {
    /// Position in the ordered list; unique and contiguous per session.
    pub index: usize,

    /// Typed content; the type never changes after classification.
    pub content: ItemContent,

    /// Natural content size when known ahead of load.
    pub natural_size: Option<Size>,

    /// True while `natural_size` is an estimate derived from a thumbnail;
    /// replaced by the decoded natural size once the media loads.
    pub size_estimated: bool,

    /// Best-fit size for the current container. Recomputed on resize and
    /// whenever `natural_size` changes.
    pub render_size: Size,

    /// Object-fit of the originating thumbnail.
    pub fit_mode: FitMode,

    /// Caption shown by the render layer.
    pub caption: Option<String>,

    /// Alternative text for the media element.
    pub alt_text: Option<String>,

    /// Passthrough attributes applied to the media element.
    pub extra_attrs: BTreeMap<String, String>,

    /// Thumbnail locator for the loading placeholder and the strip.
    pub thumb: Option<String>,

    /// Per-item zoom ceiling override.
    pub max_zoom: Option<f32>,

    /// Caller-assigned identity used by the `el` open option.
    pub key: Option<String>,
}

impl GalleryItem {
    #[must_use]
    pub fn kind(&self) -> ItemKind {
        self.content.kind()
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        self.kind() == ItemKind::Image
    }

    /// Whether this item still needs a thumbnail probe to learn its size.
    #[must_use]
    pub fn needs_probe(&self) -> bool {
        self.thumb.is_some() && self.natural_size.is_none()
    }
}
