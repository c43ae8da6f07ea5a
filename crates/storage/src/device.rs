// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Block device gateway
//!
//! Translates block numbers into synchronous, whole-block reads and writes.
//! Nothing is cached: every `write` reaches the device before returning, and
//! every `get` (unless zeroed) reads the device.

use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom};
use std::os::unix::fs::{FileExt, OpenOptionsExt};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Size of one block on the device, in bytes
pub const BLOCK_SIZE: usize = 4096;

/// Errors that can occur when accessing the device
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("failed to open device {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("IO error on block {block}: {source}")]
    Io {
        block: u64,
        #[source]
        source: io::Error,
    },
    #[error("block {block} is beyond the end of the device ({block_count} blocks)")]
    NoSpace { block: u64, block_count: u64 },
}

/// A block-sized memory region mirroring exactly one on-disk block.
///
/// Not `Clone`: a buffer has one owner. Changes reach the device only
/// through [`BlockDevice::write`].
#[derive(Debug)]
pub struct Buffer {
    block: u64,
    storage: Vec<u8>,
    offset: usize,
}

impl Buffer {
    fn zeroed(block: u64) -> Self {
        // Over-allocate so the block can start on a BLOCK_SIZE boundary, which
        // direct I/O requires.
        let storage = vec![0u8; BLOCK_SIZE * 2];
        let offset = match storage.as_ptr().align_offset(BLOCK_SIZE) {
            offset if offset < BLOCK_SIZE => offset,
            _ => 0,
        };
        Self {
            block,
            storage,
            offset,
        }
    }

    /// Block number this buffer mirrors
    pub fn block(&self) -> u64 {
        self.block
    }

    pub fn size(&self) -> usize {
        BLOCK_SIZE
    }

    pub fn bytes(&self) -> &[u8] {
        &self.storage[self.offset..self.offset + BLOCK_SIZE]
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.storage[self.offset..self.offset + BLOCK_SIZE]
    }
}

/// Exclusive handle on a raw block device (or an image file standing in for one)
#[derive(Debug)]
pub struct BlockDevice {
    file: File,
    path: PathBuf,
    block_count: u64,
}

impl BlockDevice {
    /// Open a device for synchronous block I/O.
    ///
    /// The capacity is measured once here. With `direct_io` the page cache is
    /// bypassed as well (Linux only).
    pub fn open(path: &Path, direct_io: bool) -> Result<Self, DeviceError> {
        let open_err = |source| DeviceError::Open {
            path: path.to_path_buf(),
            source,
        };

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(open_flags(direct_io))
            .open(path)
            .map_err(open_err)?;

        let bytes = file.seek(SeekFrom::End(0)).map_err(open_err)?;
        let block_count = bytes / BLOCK_SIZE as u64;

        tracing::debug!(
            path = %path.display(),
            block_count,
            direct_io,
            "opened block device"
        );

        Ok(Self {
            file,
            path: path.to_path_buf(),
            block_count,
        })
    }

    /// Read block `block` into a fresh buffer
    pub fn get(&self, block: u64) -> Result<Buffer, DeviceError> {
        let mut buffer = self.get_zeroed(block)?;
        self.file
            .read_exact_at(buffer.bytes_mut(), Self::byte_offset(block))
            .map_err(|source| DeviceError::Io { block, source })?;
        Ok(buffer)
    }

    /// A zero-filled buffer for `block`, without reading the device
    pub fn get_zeroed(&self, block: u64) -> Result<Buffer, DeviceError> {
        if block >= self.block_count {
            return Err(DeviceError::NoSpace {
                block,
                block_count: self.block_count,
            });
        }
        Ok(Buffer::zeroed(block))
    }

    /// Write the buffer through to its block
    pub fn write(&self, buffer: &Buffer) -> Result<(), DeviceError> {
        let block = buffer.block();
        if block >= self.block_count {
            return Err(DeviceError::NoSpace {
                block,
                block_count: self.block_count,
            });
        }
        self.file
            .write_all_at(buffer.bytes(), Self::byte_offset(block))
            .map_err(|source| DeviceError::Io { block, source })
    }

    pub fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    /// Capacity in whole blocks
    pub fn block_count(&self) -> u64 {
        self.block_count
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn byte_offset(block: u64) -> u64 {
        block * BLOCK_SIZE as u64
    }
}

#[cfg(target_os = "linux")]
fn open_flags(direct_io: bool) -> i32 {
    use nix::fcntl::OFlag;

    let mut flags = OFlag::O_SYNC;
    if direct_io {
        flags |= OFlag::O_DIRECT;
    }
    flags.bits()
}

#[cfg(not(target_os = "linux"))]
fn open_flags(direct_io: bool) -> i32 {
    if direct_io {
        tracing::warn!("direct I/O is only supported on Linux; using synchronous I/O");
    }
    nix::fcntl::OFlag::O_SYNC.bits()
}

#[cfg(test)]
#[path = "device_tests.rs"]
mod tests;
