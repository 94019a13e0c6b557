// SPDX-License-Identifier: MPL-2.0
//! Link-pattern classification.
//!
//! Turns a bare link string into typed content by matching, in fixed
//! priority order: image extension, video extension, audio extension,
//! YouTube, Vimeo, SoundCloud, Google Drive, Dropbox, and PDF. Each match
//! produces a normalized media locator (embed URLs for the hosted
//! services). A link matching nothing returns `None` and the caller falls
//! back to embedding the source markup.

use crate::item::{ItemContent, MediaSource};
use url::Url;

/// Known file extensions grouped by playback type.
pub mod extensions {
    /// Image file extensions
    pub const IMAGE_EXTENSIONS: &[&str] = &[
        "jpg", "jpeg", "png", "gif", "webp", "avif", "bmp", "svg",
    ];

    /// Video file extensions
    pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "webm", "ogv", "mov"];

    /// Audio file extensions (played through the same audio/video path)
    pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "ogg", "oga", "wav", "m4a", "aac", "flac"];
}

/// Classifies a bare link into typed content, or `None` when no pattern
/// matches. Deterministic: the same link always yields the same content.
#[must_use]
pub fn classify_link(link: &str) -> Option<ItemContent> {
    let ext = extension_of(link);

    if let Some(ext) = ext.as_deref() {
        if extensions::IMAGE_EXTENSIONS.contains(&ext) {
            return Some(ItemContent::Image {
                src: normalize_dropbox(link).unwrap_or_else(|| link.to_owned()),
                srcset: false,
            });
        }

        if extensions::VIDEO_EXTENSIONS.contains(&ext) {
            let src = normalize_dropbox(link).unwrap_or_else(|| link.to_owned());
            return Some(ItemContent::Video {
                sources: vec![MediaSource::new(src, Some(&video_mime(ext)))],
                tracks: Vec::new(),
                audio_only: false,
            });
        }

        if extensions::AUDIO_EXTENSIONS.contains(&ext) {
            let src = normalize_dropbox(link).unwrap_or_else(|| link.to_owned());
            return Some(ItemContent::Video {
                sources: vec![MediaSource::new(src, Some(&audio_mime(ext)))],
                tracks: Vec::new(),
                audio_only: true,
            });
        }
    }

    let url = parse_lenient(link)?;

    if let Some(src) = youtube_embed(&url) {
        return Some(ItemContent::Iframe { src });
    }

    if let Some(src) = vimeo_embed(&url) {
        return Some(ItemContent::Iframe { src });
    }

    if let Some(src) = soundcloud_embed(&url, link) {
        return Some(ItemContent::Iframe { src });
    }

    if let Some(src) = drive_preview(&url) {
        return Some(ItemContent::Iframe { src });
    }

    if is_dropbox(&url) {
        return Some(ItemContent::Iframe {
            src: dropbox_raw(&url),
        });
    }

    if ext.as_deref() == Some("pdf") {
        return Some(ItemContent::Iframe {
            src: link.to_owned(),
        });
    }

    None
}

/// Lowercased extension of the path portion (query and fragment ignored).
fn extension_of(link: &str) -> Option<String> {
    let path = link.split(['?', '#']).next().unwrap_or(link);
    let name = path.rsplit('/').next().unwrap_or(path);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Parses a URL, retrying with an `https://` scheme for scheme-less links
/// like `youtu.be/abc`.
fn parse_lenient(link: &str) -> Option<Url> {
    if let Ok(url) = Url::parse(link) {
        // `youtu.be/abc` parses as scheme "youtu.be" with a path; only
        // accept results that actually carry a host.
        if url.host_str().is_some() {
            return Some(url);
        }
    }
    Url::parse(&format!("https://{link}")).ok().filter(|url| {
        url.host_str()
            .is_some_and(|host| host.contains('.') && !host.contains(' '))
    })
}

fn host_matches(url: &Url, domain: &str) -> bool {
    url.host_str().is_some_and(|host| {
        host == domain || host.ends_with(&format!(".{domain}"))
    })
}

/// Canonical YouTube embed URL, translating `t=1m30s`-style timestamps
/// into a `start=<seconds>` parameter.
fn youtube_embed(url: &Url) -> Option<String> {
    let is_youtube = host_matches(url, "youtube.com")
        || host_matches(url, "youtube-nocookie.com")
        || host_matches(url, "youtu.be");
    if !is_youtube {
        return None;
    }

    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let id = if host_matches(url, "youtu.be") {
        segments.next()?.to_owned()
    } else {
        match segments.next()? {
            "watch" => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned())?,
            "embed" | "shorts" | "live" | "v" => segments.next()?.to_owned(),
            _ => return None,
        }
    };

    if id.is_empty() {
        return None;
    }

    let start = url
        .query_pairs()
        .find(|(key, _)| key == "t" || key == "start")
        .and_then(|(_, value)| parse_timestamp(&value));

    let mut embed = format!("https://www.youtube.com/embed/{id}");
    if let Some(seconds) = start {
        embed.push_str(&format!("?start={seconds}"));
    }
    Some(embed)
}

/// Translates `90`, `90s`, `1m30s`, or `1h2m3s` into whole seconds.
fn parse_timestamp(value: &str) -> Option<u32> {
    if value.is_empty() {
        return None;
    }

    if let Ok(seconds) = value.parse::<u32>() {
        return Some(seconds);
    }

    let mut total: u32 = 0;
    let mut digits = String::new();

    for c in value.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else {
            let amount: u32 = digits.parse().ok()?;
            digits.clear();
            let unit = match c {
                'h' => 3600,
                'm' => 60,
                's' => 1,
                _ => return None,
            };
            total = total.checked_add(amount.checked_mul(unit)?)?;
        }
    }

    if !digits.is_empty() {
        // trailing digits without a unit are seconds
        total = total.checked_add(digits.parse::<u32>().ok()?)?;
    }

    Some(total)
}

/// Vimeo player URL from the numeric video id; a `#t=` fragment survives.
fn vimeo_embed(url: &Url) -> Option<String> {
    if !host_matches(url, "vimeo.com") {
        return None;
    }

    let id = url
        .path_segments()?
        .filter(|s| !s.is_empty())
        .find(|segment| segment.chars().all(|c| c.is_ascii_digit()))?;

    let mut embed = format!("https://player.vimeo.com/video/{id}");
    if let Some(fragment) = url.fragment().filter(|f| f.starts_with("t=")) {
        embed.push('#');
        embed.push_str(fragment);
    }
    Some(embed)
}

/// SoundCloud widget URL wrapping the original track link.
fn soundcloud_embed(url: &Url, original: &str) -> Option<String> {
    if !host_matches(url, "soundcloud.com") {
        return None;
    }

    let target = if original.contains("://") {
        original.to_owned()
    } else {
        format!("https://{original}")
    };

    let embed = Url::parse_with_params("https://w.soundcloud.com/player/", &[("url", target)])
        .ok()?;
    Some(embed.into())
}

/// Google Drive preview URL from the file id.
fn drive_preview(url: &Url) -> Option<String> {
    if !host_matches(url, "drive.google.com") {
        return None;
    }

    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();

    let id = if let Some(pos) = segments.iter().position(|s| *s == "d") {
        segments.get(pos + 1).map(|s| (*s).to_owned())
    } else {
        url.query_pairs()
            .find(|(key, _)| key == "id")
            .map(|(_, value)| value.into_owned())
    }?;

    if id.is_empty() {
        return None;
    }

    Some(format!("https://drive.google.com/file/d/{id}/preview"))
}

fn is_dropbox(url: &Url) -> bool {
    host_matches(url, "dropbox.com") || host_matches(url, "dropboxusercontent.com")
}

/// Forces the raw-content query parameter and strips download flags.
fn dropbox_raw(url: &Url) -> String {
    let mut raw = url.clone();
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "dl" && key != "raw")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    raw.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("raw", "1");
    raw.into()
}

/// Dropbox media links keep their extension-based type but need the raw
/// rewrite; returns `None` for non-Dropbox links.
fn normalize_dropbox(link: &str) -> Option<String> {
    let url = parse_lenient(link)?;
    is_dropbox(&url).then(|| dropbox_raw(&url))
}

fn video_mime(ext: &str) -> String {
    let subtype = match ext {
        "mov" | "m4v" => "mp4",
        "ogv" => "ogg",
        other => other,
    };
    format!("video/{subtype}")
}

fn audio_mime(ext: &str) -> String {
    let subtype = match ext {
        "mp3" => "mpeg",
        "oga" => "ogg",
        "m4a" => "mp4",
        other => other,
    };
    format!("audio/{subtype}")
}
