//! Image resources as seen by the core
//!
//! The core never decodes images. It holds opaque [`ImageHandle`]s and
//! asks a [`ResourceLoader`] for their dimensions. A file that cannot be
//! read yields a placeholder entry instead of an error, so a missing
//! asset degrades rendering rather than aborting the game.

use slotmap::SlotMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

slotmap::new_key_type! {
    /// Opaque reference to an image owned by the resource layer
    pub struct ImageHandle;
}

/// What the core knows about an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    /// Path the image was requested from
    pub path: PathBuf,

    /// Width in pixels
    pub width: i32,

    /// Height in pixels
    pub height: i32,

    /// True when loading failed and the size is a stand-in
    pub placeholder: bool,
}

impl ImageInfo {
    /// File name without directories, used by frontends to pick a style
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }
}

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// The file was not found in any search path
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// The file exists but could not be read as an image
    #[error("Failed to read image {path}: {reason}")]
    Decode {
        /// Offending path
        path: String,
        /// Decoder message
        reason: String,
    },
}

/// Capability the core uses to obtain image handles
pub trait ResourceLoader {
    /// Load an image, falling back to a placeholder of `placeholder_size`
    fn load_image(&mut self, path: &Path, placeholder_size: (i32, i32)) -> ImageHandle;

    /// Dimensions and origin of a loaded image
    fn image_info(&self, handle: ImageHandle) -> Option<&ImageInfo>;

    /// Width and height of a loaded image, `(0, 0)` for unknown handles
    fn image_size(&self, handle: ImageHandle) -> (i32, i32) {
        self.image_info(handle)
            .map_or((0, 0), |info| (info.width, info.height))
    }
}

/// Slot-map backed table of image descriptions
#[derive(Debug, Clone, Default)]
pub struct ImageRegistry {
    images: SlotMap<ImageHandle, ImageInfo>,
}

impl ImageRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an image description and hand out its handle
    pub fn insert(&mut self, info: ImageInfo) -> ImageHandle {
        self.images.insert(info)
    }

    /// Look up an image description
    pub fn get(&self, handle: ImageHandle) -> Option<&ImageInfo> {
        self.images.get(handle)
    }

    /// Number of registered images
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Number of entries that are placeholders
    pub fn placeholder_count(&self) -> usize {
        self.images.values().filter(|info| info.placeholder).count()
    }
}

/// Loader reading image headers from disk through the `image` crate
pub struct FsImageLoader {
    search_paths: Vec<PathBuf>,
    registry: ImageRegistry,
}

impl FsImageLoader {
    /// Create a loader that resolves relative paths against `search_paths`
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths,
            registry: ImageRegistry::new(),
        }
    }

    /// Give up the loader, keeping what it registered
    pub fn into_registry(self) -> ImageRegistry {
        self.registry
    }

    /// The registry filled so far
    pub fn registry(&self) -> &ImageRegistry {
        &self.registry
    }

    fn resolve(&self, path: &Path) -> Result<PathBuf, AssetError> {
        if path.is_absolute() && path.exists() {
            return Ok(path.to_path_buf());
        }
        self.search_paths
            .iter()
            .map(|dir| dir.join(path))
            .find(|candidate| candidate.exists())
            .ok_or_else(|| AssetError::NotFound(path.display().to_string()))
    }

    fn read_dimensions(&self, path: &Path) -> Result<(i32, i32), AssetError> {
        let full_path = self.resolve(path)?;
        let (width, height) = image::image_dimensions(&full_path).map_err(|e| AssetError::Decode {
            path: full_path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok((
            i32::try_from(width).unwrap_or(i32::MAX),
            i32::try_from(height).unwrap_or(i32::MAX),
        ))
    }
}

impl ResourceLoader for FsImageLoader {
    fn load_image(&mut self, path: &Path, placeholder_size: (i32, i32)) -> ImageHandle {
        let info = match self.read_dimensions(path) {
            Ok((width, height)) => {
                log::debug!("Loaded image {} ({}x{})", path.display(), width, height);
                ImageInfo {
                    path: path.to_path_buf(),
                    width,
                    height,
                    placeholder: false,
                }
            }
            Err(e) => {
                log::warn!("{}; using a {}x{} placeholder", e, placeholder_size.0, placeholder_size.1);
                ImageInfo {
                    path: path.to_path_buf(),
                    width: placeholder_size.0,
                    height: placeholder_size.1,
                    placeholder: true,
                }
            }
        };
        self.registry.insert(info)
    }

    fn image_info(&self, handle: ImageHandle) -> Option<&ImageInfo> {
        self.registry.get(handle)
    }
}
