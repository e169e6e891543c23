//! Perceptual image signatures.
//!
//! [`PerceptualSigner`] computes a content-based signature for an image:
//! bit-for-bit identical images always produce equal signatures, and the
//! DCT-based hash also tolerates minor recompression differences. The rest
//! of the pipeline consumes signatures only through [`SignatureProvider`],
//! treating them as opaque equality-comparable values.

use std::path::{Path, PathBuf};

use image_hasher::{HashAlg, HasherConfig};
use thiserror::Error;

/// Opaque, fixed-width image content signature.
///
/// Signatures support equality and hashing only; they carry no ordering
/// semantics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(Box<[u8]>);

impl Signature {
    /// Create a signature from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(bytes.into())
    }

    /// The raw signature bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Errors that can occur while computing a signature.
///
/// These are per-item failures: the affected candidate is dropped and the
/// run continues.
#[derive(Debug, Error)]
pub enum SignError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that failed to read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file could not be opened or decoded as an image.
    #[error("failed to decode {path}: {source}")]
    Decode {
        /// Path that failed to decode
        path: PathBuf,
        /// The underlying decode error
        #[source]
        source: image::ImageError,
    },
}

/// A capability that turns an image file into a content signature.
///
/// Implementations must be deterministic: the same file contents always
/// produce the same signature. The file is opened read-only for the
/// duration of the call and released on return.
pub trait SignatureProvider: Send + Sync {
    /// Compute the signature of the image at `path`.
    ///
    /// # Errors
    ///
    /// [`SignError`] when the file cannot be read or decoded.
    fn sign(&self, path: &Path) -> Result<Signature, SignError>;
}

/// Signature provider based on a DCT perceptual hash.
pub struct PerceptualSigner {
    hasher: image_hasher::Hasher,
}

impl PerceptualSigner {
    /// Create a new signer.
    #[must_use]
    pub fn new() -> Self {
        let config = HasherConfig::new().hash_alg(HashAlg::Median).preproc_dct();
        Self {
            hasher: config.to_hasher(),
        }
    }
}

impl Default for PerceptualSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl SignatureProvider for PerceptualSigner {
    fn sign(&self, path: &Path) -> Result<Signature, SignError> {
        log::trace!("opening image: {}", path.display());
        let img = image::open(path).map_err(|source| SignError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let hash = self.hasher.hash_image(&img);
        Ok(Signature::from_bytes(hash.as_bytes()))
    }
}
