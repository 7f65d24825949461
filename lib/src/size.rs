use std::{
    fmt,
    iter::Sum,
    ops::Add,
};

use crate::{
    DomainError,
    Outcome,
};

const SIZE_1KB: u64 = 1024;
const SIZE_1MB: u64 = 1024 * SIZE_1KB;
const SIZE_1GB: u64 = 1024 * SIZE_1MB;

/// A non negative amount of bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileSize {
    bytes: u64,
}

impl FileSize {
    pub const ZERO: FileSize = FileSize { bytes: 0 };

    /// Validate a signed byte count, as reported by external tools.
    pub fn create(bytes: i64) -> Outcome<Self> {
        if bytes < 0 {
            return Err(DomainError::validation("File size cannot be negative"));
        }

        Ok(Self {
            bytes: bytes as u64,
        })
    }

    pub const fn from_bytes(bytes: u64) -> Self {
        Self { bytes }
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    pub fn in_kilobytes(&self) -> f64 {
        self.bytes as f64 / SIZE_1KB as f64
    }

    pub fn in_megabytes(&self) -> f64 {
        self.bytes as f64 / SIZE_1MB as f64
    }

    pub fn in_gigabytes(&self) -> f64 {
        self.bytes as f64 / SIZE_1GB as f64
    }
}

impl Add for FileSize {
    type Output = FileSize;

    fn add(self, rhs: Self) -> Self::Output {
        FileSize {
            bytes: self.bytes.saturating_add(rhs.bytes),
        }
    }
}

impl Sum for FileSize {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(FileSize::ZERO, |total, size| total + size)
    }
}

impl fmt::Display for FileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bytes < SIZE_1KB {
            write!(f, "{} B", self.bytes)
        } else if self.bytes < SIZE_1MB {
            write!(f, "{:.2} KB", self.in_kilobytes())
        } else if self.bytes < SIZE_1GB {
            write!(f, "{:.2} MB", self.in_megabytes())
        } else {
            write!(f, "{:.2} GB", self.in_gigabytes())
        }
    }
}
