//! JSON-file document store over a capability-scoped directory.

use crate::local::ports::{DocumentStore, LocalStoreError, LocalStoreResult};
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::marker::PhantomData;

/// Document store backed by one JSON file inside a directory capability.
///
/// Writes go to a sibling temp file first and are renamed into place, so
/// a crash mid-write never leaves a torn document behind. An unreadable
/// document is treated as absent (with a warning) rather than fatal: the
/// state it guards is rebuildable and must not wedge startup.
#[derive(Debug)]
pub struct JsonFileStore<T> {
    dir: Dir,
    file_name: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    /// Opens a store for `file_name` inside an ambient directory path.
    ///
    /// # Errors
    ///
    /// Returns [`LocalStoreError::Io`] when the directory cannot be
    /// opened.
    pub fn open(dir: &Utf8Path, file_name: impl Into<String>) -> LocalStoreResult<Self> {
        let handle = Dir::open_ambient_dir(dir, ambient_authority()).map_err(LocalStoreError::io)?;
        Ok(Self::in_dir(handle, file_name))
    }

    /// Creates a store from an already-opened directory capability.
    #[must_use]
    pub fn in_dir(dir: Dir, file_name: impl Into<String>) -> Self {
        Self {
            dir,
            file_name: file_name.into(),
            _marker: PhantomData,
        }
    }
}

impl<T> DocumentStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    fn load(&self) -> LocalStoreResult<Option<T>> {
        let contents = match self.dir.read_to_string(&self.file_name) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(LocalStoreError::io(err)),
        };
        serde_json::from_str(&contents).map_or_else(
            |err| {
                tracing::warn!(
                    file = %self.file_name,
                    error = %err,
                    "discarding unreadable local state document"
                );
                Ok(None)
            },
            |value| Ok(Some(value)),
        )
    }

    fn save(&self, value: &T) -> LocalStoreResult<()> {
        let json = serde_json::to_string_pretty(value).map_err(LocalStoreError::codec)?;
        let tmp_name = format!("{}.tmp", self.file_name);
        self.dir
            .write(&tmp_name, json.as_bytes())
            .map_err(LocalStoreError::io)?;
        self.dir
            .rename(&tmp_name, &self.dir, &self.file_name)
            .map_err(LocalStoreError::io)
    }
}
