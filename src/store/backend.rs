use crate::error::Result;

/// Abstract interface for the raw key-value persistence primitive.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while `WallStore` handles the "what" (wire shapes, ordering, uniqueness).
pub trait KvBackend {
    /// Read the raw text stored under `key`.
    /// Returns Ok(None) if the key has never been written.
    /// Returns Err only on actual I/O faults (permissions, disk failure, quota).
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write raw text under `key`, replacing any previous value.
    /// MUST be atomic per key (e.g. write to tmp then rename) to avoid
    /// partial writes.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

impl<B: KvBackend + ?Sized> KvBackend for Box<B> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}
