//! `layerview` is a small modular toolkit for loading layered voxel models and
//! slicing them for plotting
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use layerview_utils as utils;

#[cfg(feature = "grid")]
#[cfg_attr(docsrs, doc(cfg(feature = "grid")))]
#[doc(inline)]
pub use layerview_grid as grid;

#[cfg(feature = "slicer")]
#[cfg_attr(docsrs, doc(cfg(feature = "slicer")))]
#[doc(inline)]
pub use layerview_slicer as slicer;
