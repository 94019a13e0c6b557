// SPDX-License-Identifier: MPL-2.0
//! Item classification.
//!
//! Turns raw inputs (element attribute maps or plain descriptors) into
//! typed [`GalleryItem`]s. Explicit content fields win over link-pattern
//! matching; a malformed structured field drops that one item and never
//! fails the whole list.

use crate::config::OpenOptions;
use crate::error::{Error, Result};
use crate::geometry::{fit, Size};
use crate::item::{links, FitMode, GalleryItem, ItemContent, MediaSource};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::warn;

/// Thumbnail information carried by a raw input.
#[derive(Debug, Clone, Default)]
pub struct ThumbSource {
    pub url: String,

    /// Natural size of the thumbnail when already decoded by the host.
    pub natural_size: Option<Size>,

    /// Visual object-fit of the thumbnail element.
    pub fit_mode: Option<FitMode>,
}

/// A DOM-like element input: attributes read as key/value strings plus the
/// element's outer markup (the `html`-type fallback) and an optional child
/// image acting as the thumbnail.
#[derive(Debug, Clone, Default)]
pub struct ElementSource {
    /// Attribute map; `data-*` keys take precedence over plain ones.
    pub attributes: BTreeMap<String, String>,

    /// Outer markup, embedded verbatim for `html`-type items.
    pub markup: String,

    /// Child image element, if any.
    pub thumb: Option<ThumbSource>,

    /// Caller-assigned identity matched against the `el` open option.
    pub key: Option<String>,
}

impl ElementSource {
    /// Reads an attribute, preferring the `data-` prefixed form.
    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(&format!("data-{name}"))
            .or_else(|| self.attributes.get(name))
            .map(String::as_str)
    }
}

/// A `sources`/`tracks` field: either an already-structured list or a
/// JSON-encoded string of one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SourcesField {
    List(Vec<MediaSource>),
    Json(String),
}

impl SourcesField {
    fn resolve(&self) -> Result<Vec<MediaSource>> {
        match self {
            SourcesField::List(list) => Ok(list.clone()),
            SourcesField::Json(raw) => Ok(serde_json::from_str(raw)?),
        }
    }
}

/// An `attr` field: a structured map or a JSON-encoded string of one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AttrField {
    Map(BTreeMap<String, String>),
    Json(String),
}

impl AttrField {
    fn resolve(&self) -> Result<BTreeMap<String, String>> {
        match self {
            AttrField::Map(map) => Ok(map.clone()),
            AttrField::Json(raw) => Ok(serde_json::from_str(raw)?),
        }
    }
}

/// A plain descriptor input with explicit fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ItemDescriptor {
    pub img: Option<String>,
    pub sources: Option<SourcesField>,
    pub tracks: Option<SourcesField>,
    pub iframe: Option<String>,
    pub html: Option<String>,
    pub link: Option<String>,
    pub thumb: Option<String>,
    pub caption: Option<String>,
    pub alt: Option<String>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub fit: Option<FitMode>,
    pub attr: Option<AttrField>,
    #[serde(alias = "maxZoom")]
    pub max_zoom: Option<f32>,
}

/// One raw input to classify.
#[derive(Debug, Clone)]
pub enum RawItem {
    Element(ElementSource),
    Descriptor(ItemDescriptor),
}

impl From<ElementSource> for RawItem {
    fn from(element: ElementSource) -> Self {
        RawItem::Element(element)
    }
}

impl From<ItemDescriptor> for RawItem {
    fn from(descriptor: ItemDescriptor) -> Self {
        RawItem::Descriptor(descriptor)
    }
}

impl RawItem {
    /// Flattens an element's attributes into descriptor fields, mirroring
    /// the dataset spread of the reference markup convention.
    fn to_descriptor(&self) -> ItemDescriptor {
        match self {
            RawItem::Descriptor(descriptor) => descriptor.clone(),
            RawItem::Element(element) => ItemDescriptor {
                img: element.attr("img").map(str::to_owned),
                sources: element
                    .attr("sources")
                    .map(|raw| SourcesField::Json(raw.to_owned())),
                tracks: element
                    .attr("tracks")
                    .map(|raw| SourcesField::Json(raw.to_owned())),
                iframe: element.attr("iframe").map(str::to_owned),
                html: element.attr("html").map(str::to_owned),
                link: element
                    .attr("link")
                    .or_else(|| element.attr("href"))
                    .map(str::to_owned),
                thumb: element.attr("thumb").map(str::to_owned),
                caption: element.attr("caption").map(str::to_owned),
                alt: element.attr("alt").map(str::to_owned),
                width: element.attr("width").and_then(|raw| raw.parse().ok()),
                height: element.attr("height").and_then(|raw| raw.parse().ok()),
                fit: element
                    .attr("fit")
                    .and_then(|raw| serde_json::from_value(raw.into()).ok()),
                attr: element
                    .attr("attr")
                    .map(|raw| AttrField::Json(raw.to_owned())),
                max_zoom: element.attr("max-zoom").and_then(|raw| raw.parse().ok()),
            },
        }
    }

    fn markup(&self) -> Option<&str> {
        match self {
            RawItem::Element(element) if !element.markup.is_empty() => Some(&element.markup),
            _ => None,
        }
    }

    fn thumb_source(&self) -> Option<&ThumbSource> {
        match self {
            RawItem::Element(element) => element.thumb.as_ref(),
            RawItem::Descriptor(_) => None,
        }
    }

    fn key(&self) -> Option<&str> {
        match self {
            RawItem::Element(element) => element.key.as_deref(),
            RawItem::Descriptor(_) => None,
        }
    }
}

/// Whether an image source is a `srcset`-style list: any whitespace-
/// separated token of digits followed by `w` or `x`.
fn is_srcset(src: &str) -> bool {
    src.split_whitespace().any(|token| {
        let token = token.trim_end_matches(',');
        token.len() >= 2
            && (token.ends_with('w') || token.ends_with('x'))
            && token[..token.len() - 1].chars().all(|c| c.is_ascii_digit())
    })
}

/// Resolves typed content from a descriptor. Explicit fields win, in the
/// precedence order sources > iframe > img > html; a bare link falls back
/// to pattern matching and finally to markup embedding.
fn resolve_content(descriptor: &ItemDescriptor, raw: &RawItem) -> Result<ItemContent> {
    if let Some(sources) = &descriptor.sources {
        let sources = sources.resolve()?;
        if sources.is_empty() {
            return Err(Error::Classification("empty sources list".into()));
        }
        let tracks = match &descriptor.tracks {
            Some(tracks) => tracks.resolve()?,
            None => Vec::new(),
        };
        let audio_only = sources[0].is_audio();
        return Ok(ItemContent::Video {
            sources,
            tracks,
            audio_only,
        });
    }

    if let Some(src) = &descriptor.iframe {
        return Ok(ItemContent::Iframe { src: src.clone() });
    }

    if let Some(src) = &descriptor.img {
        return Ok(ItemContent::Image {
            srcset: is_srcset(src),
            src: src.clone(),
        });
    }

    if let Some(markup) = &descriptor.html {
        return Ok(ItemContent::Html {
            markup: markup.clone(),
        });
    }

    if let Some(link) = &descriptor.link {
        if let Some(content) = links::classify_link(link) {
            return Ok(content);
        }
        if let Some(markup) = raw.markup() {
            return Ok(ItemContent::Html {
                markup: markup.to_owned(),
            });
        }
        return Err(Error::Classification(format!(
            "unrecognized link with no markup to embed: {link}"
        )));
    }

    if let Some(markup) = raw.markup() {
        return Ok(ItemContent::Html {
            markup: markup.to_owned(),
        });
    }

    Err(Error::Classification(
        "no content field or link present".into(),
    ))
}

/// Classifies a single raw input into a gallery item with index 0.
///
/// Deterministic and idempotent: the same input always resolves to the
/// same type and media locator. List positions are assigned by
/// [`classify_all`].
pub fn classify(raw: &RawItem, opts: &OpenOptions) -> Result<GalleryItem> {
    let descriptor = raw.to_descriptor();
    let content = resolve_content(&descriptor, raw)?;

    if let Some(allowed) = &opts.types {
        if !allowed.contains(&content.kind()) {
            return Err(Error::Classification(format!(
                "type {:?} not in allow-list",
                content.kind()
            )));
        }
    }

    let extra_attrs = match &descriptor.attr {
        Some(attr) => attr.resolve()?,
        None => BTreeMap::new(),
    };

    let thumb_source = raw.thumb_source();

    // Explicit dimensions win; otherwise a decoded thumbnail gives an
    // estimate (its aspect fitted to the container) until the real media
    // decodes.
    let (natural_size, size_estimated) = match (descriptor.width, descriptor.height) {
        (Some(width), Some(height)) => (Some(Size::new(width, height)), false),
        _ => match thumb_source.and_then(|thumb| thumb.natural_size) {
            Some(thumb_natural) => (
                Some(fit(Some(thumb_natural), opts.container, opts.scale, opts.gap)),
                true,
            ),
            None => (None, false),
        },
    };

    let fit_mode = descriptor
        .fit
        .or_else(|| thumb_source.and_then(|thumb| thumb.fit_mode))
        .unwrap_or_default();

    let thumb = descriptor
        .thumb
        .clone()
        .or_else(|| thumb_source.map(|thumb| thumb.url.clone()));

    let render_size = fit(natural_size, opts.container, opts.scale, opts.gap);

    Ok(GalleryItem {
        index: 0,
        content,
        natural_size,
        size_estimated,
        render_size,
        fit_mode,
        caption: descriptor.caption.clone(),
        alt_text: descriptor.alt.clone(),
        extra_attrs,
        thumb,
        max_zoom: descriptor.max_zoom,
        key: raw.key().map(str::to_owned),
    })
}

/// Classifies a whole input list. Failed items are dropped with a warning;
/// survivors get contiguous indices from zero.
#[must_use]
pub fn classify_all(raws: &[RawItem], opts: &OpenOptions) -> Vec<GalleryItem> {
    let mut items = Vec::with_capacity(raws.len());

    for raw in raws {
        match classify(raw, opts) {
            Ok(mut item) => {
                item.index = items.len();
                items.push(item);
            }
            Err(error) => {
                warn!(%error, "dropping unclassifiable gallery item");
            }
        }
    }

    items
}
