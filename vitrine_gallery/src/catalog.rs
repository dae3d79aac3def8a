// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Artwork catalog read from an image directory.
//!
//! Each artwork is one image file whose name carries its metadata:
//!
//! ```text
//! <id>_<name>_<medium>_<width>, <height>, <depth>.<ext>
//! 1_Abstract Flow_Acrylic on Canvas_24, 18, 1.5.jpg
//! ```
//!
//! Dimensions are in inches. Files that are not images are ignored; images
//! whose names do not follow the pattern are skipped and reported.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// File extensions treated as artwork images (compared case-insensitively).
pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "webp", "avif", "gif"];

/// Errors produced while reading a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The directory or one of its entries could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The file name does not follow the catalog naming pattern.
    #[error("malformed artwork file name {file_name:?}: {reason}")]
    MalformedName {
        /// Offending file name.
        file_name: String,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// One of the dimensions is not a positive number.
    #[error("invalid dimension {value:?} in artwork file name {file_name:?}")]
    InvalidDimension {
        /// Offending file name.
        file_name: String,
        /// The dimension as written.
        value: String,
    },
}

/// Catalog result type.
pub type Result<T, E = CatalogError> = core::result::Result<T, E>;

/// Physical size of an artwork in inches.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Depth of the stretcher or frame.
    pub depth: f64,
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} x {}\"", self.width, self.height, self.depth)
    }
}

/// One artwork in the catalog.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Artwork {
    /// Catalog number; also the display order.
    pub id: u32,
    /// Image file name, as found in the directory.
    pub file_name: String,
    /// Title.
    pub name: String,
    /// Medium, e.g. "Oil on Canvas".
    pub medium: String,
    /// Physical size.
    pub dimensions: Dimensions,
}

impl Artwork {
    /// Parse an artwork from an image file name.
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        parse_file_name(file_name)
    }

    /// Web path of the image, relative to the site root.
    pub fn src(&self) -> String {
        format!("/{}", self.file_name)
    }

    /// Human readable size, e.g. `24 x 18 x 1.5"`.
    pub fn size_label(&self) -> String {
        self.dimensions.to_string()
    }
}

/// Returns `true` if `file_name` has one of the [`IMAGE_EXTENSIONS`].
pub fn is_image_file(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| IMAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Parse `<id>_<name>_<medium>_<w>, <h>, <d>.<ext>` into an [`Artwork`].
///
/// The name may not contain `_`; the medium may.
pub fn parse_file_name(file_name: &str) -> Result<Artwork> {
    let malformed = |reason| CatalogError::MalformedName {
        file_name: file_name.to_owned(),
        reason,
    };

    let (stem, _ext) = file_name
        .rsplit_once('.')
        .ok_or_else(|| malformed("missing extension"))?;
    let (id, rest) = stem
        .split_once('_')
        .ok_or_else(|| malformed("missing fields"))?;
    let (rest, dims) = rest
        .rsplit_once('_')
        .ok_or_else(|| malformed("missing dimensions"))?;
    let (name, medium) = rest
        .split_once('_')
        .ok_or_else(|| malformed("missing medium"))?;

    let id = id
        .trim()
        .parse::<u32>()
        .map_err(|_| malformed("id is not a number"))?;
    let (name, medium) = (name.trim(), medium.trim());
    if name.is_empty() {
        return Err(malformed("empty name"));
    }
    if medium.is_empty() {
        return Err(malformed("empty medium"));
    }

    let dimensions = parse_dimensions(file_name, dims)?;

    Ok(Artwork {
        id,
        file_name: file_name.to_owned(),
        name: name.to_owned(),
        medium: medium.to_owned(),
        dimensions,
    })
}

fn parse_dimensions(file_name: &str, dims: &str) -> Result<Dimensions> {
    let parts: Vec<&str> = dims.split(',').map(str::trim).collect();
    let &[w, h, d] = parts.as_slice() else {
        return Err(CatalogError::MalformedName {
            file_name: file_name.to_owned(),
            reason: "expected three dimensions",
        });
    };
    let parse = |value: &str| {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .ok_or_else(|| CatalogError::InvalidDimension {
                file_name: file_name.to_owned(),
                value: value.to_owned(),
            })
    };
    Ok(Dimensions {
        width: parse(w)?,
        height: parse(h)?,
        depth: parse(d)?,
    })
}

/// The artworks found in one directory, sorted by id.
#[derive(Debug, Default)]
pub struct Catalog {
    artworks: Vec<Artwork>,
    skipped: Vec<CatalogError>,
}

impl Catalog {
    /// Read every image file in `dir`.
    ///
    /// Fails only if the directory itself cannot be listed. Entries that
    /// cannot be read or whose names are malformed are logged and recorded in
    /// [`Catalog::skipped`].
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|source| CatalogError::Io {
            path: dir.to_owned(),
            source,
        })?;

        let mut names = Vec::new();
        let mut skipped = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    log::warn!("skipping unreadable entry in {}: {source}", dir.display());
                    skipped.push(CatalogError::Io {
                        path: dir.to_owned(),
                        source,
                    });
                    continue;
                }
            };
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => log::debug!("ignoring non UTF-8 file name {name:?}"),
            }
        }

        let mut catalog = Self::from_file_names(names);
        skipped.append(&mut catalog.skipped);
        catalog.skipped = skipped;
        log::debug!(
            "loaded {} artworks from {} ({} skipped)",
            catalog.artworks.len(),
            dir.display(),
            catalog.skipped.len()
        );
        Ok(catalog)
    }

    /// Build a catalog from file names without touching the filesystem.
    pub fn from_file_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut artworks = Vec::new();
        let mut skipped = Vec::new();
        for name in names {
            let name = name.as_ref();
            if !is_image_file(name) {
                continue;
            }
            match parse_file_name(name) {
                Ok(artwork) => artworks.push(artwork),
                Err(err) => {
                    log::warn!("skipping artwork: {err}");
                    skipped.push(err);
                }
            }
        }
        artworks.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.file_name.cmp(&b.file_name)));
        Self { artworks, skipped }
    }

    /// All artworks, sorted by id.
    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    /// Image files that were skipped, with the reason.
    pub fn skipped(&self) -> &[CatalogError] {
        &self.skipped
    }

    /// The artwork with `id`, if present.
    pub fn get(&self, id: u32) -> Option<&Artwork> {
        self.artworks.iter().find(|a| a.id == id)
    }

    /// Number of artworks.
    pub fn len(&self) -> usize {
        self.artworks.len()
    }

    /// Returns `true` if no artwork was found.
    pub fn is_empty(&self) -> bool {
        self.artworks.is_empty()
    }

    /// Iterate over the artworks in order.
    pub fn iter(&self) -> impl Iterator<Item = &Artwork> + '_ {
        self.artworks.iter()
    }
}
