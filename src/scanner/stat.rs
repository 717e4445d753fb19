//! Raw platform metadata.
//!
//! [`RawStat`] is attached to a record only when system info is requested.
//! Its fields mirror what the platform returns and are not interpreted.

use std::fs::Metadata;

use serde::{Deserialize, Serialize};

/// Unix `stat` fields.
#[cfg(unix)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStat {
    /// Device containing the file
    pub dev: u64,
    /// Inode number
    pub ino: u64,
    /// File type and permission bits
    pub mode: u32,
    /// Number of hard links
    pub nlink: u64,
    /// Owner user id
    pub uid: u32,
    /// Owner group id
    pub gid: u32,
    /// Device id for special files
    pub rdev: u64,
    /// Size in bytes
    pub size: u64,
    /// Preferred I/O block size
    pub blksize: u64,
    /// Allocated 512-byte blocks
    pub blocks: u64,
    /// Last access, seconds since the epoch
    pub atime: i64,
    /// Nanosecond part of `atime`
    pub atime_nsec: i64,
    /// Last modification, seconds since the epoch
    pub mtime: i64,
    /// Nanosecond part of `mtime`
    pub mtime_nsec: i64,
    /// Last status change, seconds since the epoch
    pub ctime: i64,
    /// Nanosecond part of `ctime`
    pub ctime_nsec: i64,
}

#[cfg(unix)]
impl RawStat {
    /// Capture the raw fields of `metadata`.
    #[must_use]
    pub fn from_metadata(metadata: &Metadata) -> Option<Self> {
        use std::os::unix::fs::MetadataExt;

        Some(Self {
            dev: metadata.dev(),
            ino: metadata.ino(),
            mode: metadata.mode(),
            nlink: metadata.nlink(),
            uid: metadata.uid(),
            gid: metadata.gid(),
            rdev: metadata.rdev(),
            size: metadata.size(),
            blksize: metadata.blksize(),
            blocks: metadata.blocks(),
            atime: metadata.atime(),
            atime_nsec: metadata.atime_nsec(),
            mtime: metadata.mtime(),
            mtime_nsec: metadata.mtime_nsec(),
            ctime: metadata.ctime(),
            ctime_nsec: metadata.ctime_nsec(),
        })
    }
}

/// Windows file information fields.
#[cfg(windows)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStat {
    /// `FILE_ATTRIBUTE_*` flags
    pub file_attributes: u32,
    /// Creation time in 100ns intervals since 1601
    pub creation_time: u64,
    /// Last access in 100ns intervals since 1601
    pub last_access_time: u64,
    /// Last write in 100ns intervals since 1601
    pub last_write_time: u64,
    /// Size in bytes
    pub file_size: u64,
}

#[cfg(windows)]
impl RawStat {
    /// Capture the raw fields of `metadata`.
    #[must_use]
    pub fn from_metadata(metadata: &Metadata) -> Option<Self> {
        use std::os::windows::fs::MetadataExt;

        Some(Self {
            file_attributes: metadata.file_attributes(),
            creation_time: metadata.creation_time(),
            last_access_time: metadata.last_access_time(),
            last_write_time: metadata.last_write_time(),
            file_size: metadata.file_size(),
        })
    }
}

/// Placeholder on platforms without raw stat access.
#[cfg(not(any(unix, windows)))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStat {}

#[cfg(not(any(unix, windows)))]
impl RawStat {
    #[must_use]
    pub fn from_metadata(_metadata: &Metadata) -> Option<Self> {
        None
    }
}

/// Permission bits for the `permissions` field.
///
/// Full `st_mode` on unix. Elsewhere only the read-only flag is known, so it
/// is reported as `0o444` or `0o666`.
#[must_use]
pub fn mode_bits(metadata: &Metadata) -> u32 {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode()
    }
    #[cfg(not(unix))]
    {
        if metadata.permissions().readonly() {
            0o444
        } else {
            0o666
        }
    }
}
