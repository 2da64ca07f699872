use super::backend::KvBackend;
use crate::error::{Result, WallzError};
use crate::id;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Durable backend: one file per key under a root directory.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", encode_key(key)))
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(WallzError::Io)?;
        }
        Ok(())
    }
}

/// Keys are not filename-safe: `wallItems:<id>` embeds an arbitrary wall id
/// that may contain separators or dots-only names. Escape every byte outside
/// `[A-Za-z0-9_-]` as `%XX` so distinct keys always map to distinct files.
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' => out.push(b as char),
            _ => {
                let _ = write!(out, "%{:02X}", b);
            }
        }
    }
    out
}

impl KvBackend for FsBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(path).map_err(WallzError::Io)?;
        Ok(Some(value))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_root()?;

        let target_path = self.key_path(key);

        // Atomic write
        let tmp_path = self.root.join(format!(".{}.tmp", id::item_id()));
        fs::write(&tmp_path, value).map_err(WallzError::Io)?;
        fs::rename(&tmp_path, target_path).map_err(WallzError::Io)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_key_passes_safe_chars_through() {
        assert_eq!(encode_key("myWalls"), "myWalls");
        assert_eq!(encode_key("favoriteWalls"), "favoriteWalls");
    }

    #[test]
    fn test_encode_key_escapes_separator_and_friends() {
        assert_eq!(encode_key("wallItems:abc"), "wallItems%3Aabc");
        assert_eq!(encode_key("a/../b"), "a%2F%2E%2E%2Fb");
        assert_eq!(encode_key("한"), "%ED%95%9C");
    }

    #[test]
    fn test_encode_key_is_injective_on_tricky_pairs() {
        assert_ne!(encode_key("wallItems:a"), encode_key("wallItems%3Aa"));
    }
}
