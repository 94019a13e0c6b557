// SPDX-License-Identifier: MPL-2.0
//! `lightbox_lens` is the state engine of an embeddable media lightbox.
//!
//! It classifies heterogeneous content references (links, element
//! descriptors, raw markup) into typed gallery items, computes best-fit
//! render dimensions against a resizing container, and runs the
//! pointer-driven zoom/drag/pinch state machine with bounded translation.
//! Rendering, animation scheduling, and media decoding stay with the host:
//! the engine hands out [`session::Command`] values and receives completion
//! calls back, so it never touches a DOM, a frame clock, or the network.

#![doc(html_root_url = "https://docs.rs/lightbox_lens/0.2.0")]

pub mod config;
pub mod error;
pub mod geometry;
pub mod item;
pub mod session;
pub mod test_utils;
pub mod tween;
pub mod zoom;

pub use config::{Hooks, OpenOptions};
pub use error::{Error, Result};
pub use geometry::{Size, Vec2};
pub use item::{FitMode, GalleryItem, ItemContent, ItemKind};
pub use session::{Command, Key, Lifecycle, Lightbox};
