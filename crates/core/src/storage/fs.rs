//! Filesystem storage: one file per key.
//!
//! Each `/`-separated key segment becomes one path component. Segments longer
//! than [`MAX_SEGMENT_BYTES`] are shortened to a prefix plus the SHA-256 of the
//! whole segment, keeping the extension, so long slugs still fit the 255-byte
//! file name limit. Writes land in a sibling temp file that is renamed over the
//! target; readers see the old value or the new one, never a partial file.

use std::borrow::Cow;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::io::AsyncWriteExt;

use super::{Storage, validate_key};
use crate::Error;

/// Longest key segment used verbatim as a file name.
///
/// Leaves room under the 255-byte limit for the temp file suffix.
pub const MAX_SEGMENT_BYTES: usize = 200;

/// Bytes of the original segment kept in front of the hash.
const KEPT_PREFIX_BYTES: usize = 120;

/// Longest suffix after the last `.` still treated as an extension.
const MAX_EXTENSION_BYTES: usize = 16;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Stores each key as a file below `root`.
///
/// Directories, including `root` itself, are created on first write.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, Error> {
        validate_key(key)?;
        Ok(key.split('/').fold(self.root.clone(), |path, segment| path.join(&*file_name_for(segment))))
    }
}

/// File name for one key segment.
fn file_name_for(segment: &str) -> Cow<'_, str> {
    if segment.len() <= MAX_SEGMENT_BYTES {
        return Cow::Borrowed(segment);
    }

    let (stem, extension) = match segment.rfind('.') {
        Some(dot) if segment.len() - dot <= MAX_EXTENSION_BYTES => segment.split_at(dot),
        _ => (segment, ""),
    };

    let mut cut = KEPT_PREFIX_BYTES.min(stem.len());
    while !stem.is_char_boundary(cut) {
        cut -= 1;
    }

    let digest = hex::encode(Sha256::digest(segment.as_bytes()));
    Cow::Owned(format!("{}-{digest}{extension}", &stem[..cut]))
}

/// Sibling of `path` that a write is staged in before the rename.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(format!(".{}.{}.tmp", std::process::id(), TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)));
    path.with_file_name(name)
}

async fn write_staged(temp: &Path, path: &Path, value: &str) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(temp).await?;
    file.write_all(value.as_bytes()).await?;
    file.sync_all().await?;
    drop(file);
    tokio::fs::rename(temp, path).await
}

#[async_trait]
impl Storage for FsStorage {
    async fn exists(&self, key: &str) -> Result<bool, Error> {
        let path = self.path_for(key)?;
        match tokio::fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn read(&self, key: &str) -> Result<Option<String>, Error> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), Error> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp = temp_path_for(&path);
        if let Err(e) = write_staged(&temp, &path, value).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }

        tracing::trace!(path = %path.display(), bytes = value.len(), "wrote storage file");
        Ok(())
    }
}
