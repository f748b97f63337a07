// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Growable byte store with independent read and write cursors
//!
//! Scalars are written in native byte order. Reads and peeks can reverse
//! the byte order of multi-byte scalars on request, which is how callers
//! decode payloads produced on a machine with the other endianness.
//!
//! Invariant: `read_position <= write_position <= size()`.

use thiserror::Error;

/// Errors that can occur while reading or positioning a buffer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("{requested} bytes at offset {offset} exceed the {available} bytes available")]
    OutOfRange {
        offset: usize,
        requested: usize,
        available: usize,
    },
    #[error("position {position} is beyond the buffer extent {extent}")]
    InvalidPosition { position: usize, extent: usize },
    #[error("string of {0} bytes does not fit a u16 length prefix")]
    StringTooLong(usize),
    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,
}

mod sealed {
    pub trait Sealed {}
}

/// Fixed-size value that can be copied in and out of a `ByteBuffer`
pub trait Scalar: Copy + sealed::Sealed {
    const SIZE: usize;

    /// Writes `self` in native byte order; `out` is exactly `SIZE` long
    fn put(self, out: &mut [u8]);

    /// Reads a value in native byte order; `bytes` is exactly `SIZE` long
    fn take(bytes: &[u8]) -> Self;
}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {$(
        impl sealed::Sealed for $t {}

        impl Scalar for $t {
            const SIZE: usize = std::mem::size_of::<$t>();

            fn put(self, out: &mut [u8]) {
                out.copy_from_slice(&self.to_ne_bytes());
            }

            fn take(bytes: &[u8]) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$t>()];
                raw.copy_from_slice(bytes);
                <$t>::from_ne_bytes(raw)
            }
        }
    )*};
}

impl_scalar!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

impl sealed::Sealed for bool {}

impl Scalar for bool {
    const SIZE: usize = 1;

    fn put(self, out: &mut [u8]) {
        out.fill(u8::from(self));
    }

    fn take(bytes: &[u8]) -> Self {
        bytes.first().is_some_and(|b| *b != 0)
    }
}

/// Byte store with typed, cursor-based access
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteBuffer {
    data: Vec<u8>,
    read_position: usize,
    write_position: usize,
}

impl ByteBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buffer with room for `length` bytes
    pub fn with_capacity(length: usize) -> Self {
        Self {
            data: Vec::with_capacity(length),
            ..Self::default()
        }
    }

    /// Wraps existing bytes; the write cursor sits at the end
    pub fn from_vec(data: Vec<u8>) -> Self {
        let write_position = data.len();
        Self {
            data,
            read_position: 0,
            write_position,
        }
    }

    pub fn from_slice(data: &[u8]) -> Self {
        Self::from_vec(data.to_vec())
    }

    /// Appends the full written contents of another buffer
    pub fn append(&mut self, other: &ByteBuffer) -> &mut Self {
        self.write_bytes(other.data())
    }

    /// Appends a scalar at the write cursor
    pub fn write<T: Scalar>(&mut self, value: T) -> &mut Self {
        let end = self.grow_for(T::SIZE);
        value.put(&mut self.data[self.write_position..end]);
        self.write_position = end;
        self
    }

    /// Overwrites a scalar in place; neither cursor moves
    pub fn write_at<T: Scalar>(&mut self, offset: usize, value: T) -> Result<&mut Self, BufferError> {
        let extent = self.data.len();
        let slot = self
            .data
            .get_mut(offset..offset.saturating_add(T::SIZE))
            .ok_or(BufferError::OutOfRange {
                offset,
                requested: T::SIZE,
                available: extent.saturating_sub(offset),
            })?;
        value.put(slot);
        Ok(self)
    }

    /// Reads the scalar at the read cursor without consuming it
    pub fn peek<T: Scalar>(&self, swap_endian: bool) -> Result<T, BufferError> {
        self.load(self.read_position, swap_endian)
    }

    /// Reads the scalar at `offset` without touching either cursor
    pub fn peek_at<T: Scalar>(&self, offset: usize, swap_endian: bool) -> Result<T, BufferError> {
        self.load(offset, swap_endian)
    }

    /// Reads the scalar at the read cursor and advances past it
    pub fn read<T: Scalar>(&mut self, swap_endian: bool) -> Result<T, BufferError> {
        let value = self.load(self.read_position, swap_endian)?;
        self.read_position += T::SIZE;
        Ok(value)
    }

    /// Appends raw bytes at the write cursor
    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        let end = self.grow_for(bytes.len());
        self.data[self.write_position..end].copy_from_slice(bytes);
        self.write_position = end;
        self
    }

    /// Overwrites raw bytes in place; neither cursor moves
    pub fn write_bytes_at(&mut self, offset: usize, bytes: &[u8]) -> Result<&mut Self, BufferError> {
        let extent = self.data.len();
        let slot = self
            .data
            .get_mut(offset..offset.saturating_add(bytes.len()))
            .ok_or(BufferError::OutOfRange {
                offset,
                requested: bytes.len(),
                available: extent.saturating_sub(offset),
            })?;
        slot.copy_from_slice(bytes);
        Ok(self)
    }

    /// Consumes `length` raw bytes from the read cursor
    pub fn read_bytes(&mut self, length: usize) -> Result<&[u8], BufferError> {
        let start = self.read_position;
        self.readable(start, length)?;
        self.read_position += length;
        Ok(&self.data[start..start + length])
    }

    /// Appends a string as a u16 byte-length followed by its UTF-8 bytes
    pub fn write_str(&mut self, value: &str) -> Result<&mut Self, BufferError> {
        let length =
            u16::try_from(value.len()).map_err(|_| BufferError::StringTooLong(value.len()))?;
        self.write(length);
        Ok(self.write_bytes(value.as_bytes()))
    }

    /// Inverse of `write_str`; the swap flag applies to the length prefix.
    /// On any error the read cursor is left where it was.
    pub fn read_string(&mut self, swap_endian: bool) -> Result<String, BufferError> {
        let start = self.read_position;
        let length = usize::from(self.read::<u16>(swap_endian)?);
        if let Err(e) = self.readable(self.read_position, length) {
            self.read_position = start;
            return Err(e);
        }
        let bytes = self.read_bytes(length)?.to_vec();
        String::from_utf8(bytes).map_err(|_| {
            self.read_position = start;
            BufferError::InvalidUtf8
        })
    }

    /// Empties the store and resets both cursors
    pub fn clear(&mut self) {
        self.data.clear();
        self.read_position = 0;
        self.write_position = 0;
    }

    pub fn read_position(&self) -> usize {
        self.read_position
    }

    pub fn set_read_position(&mut self, position: usize) -> Result<(), BufferError> {
        if position > self.write_position {
            return Err(BufferError::InvalidPosition {
                position,
                extent: self.write_position,
            });
        }
        self.read_position = position;
        Ok(())
    }

    pub fn write_position(&self) -> usize {
        self.write_position
    }

    /// Moves the write cursor; the read cursor is pulled back if needed
    pub fn set_write_position(&mut self, position: usize) -> Result<(), BufferError> {
        if position > self.data.len() {
            return Err(BufferError::InvalidPosition {
                position,
                extent: self.data.len(),
            });
        }
        self.write_position = position;
        self.read_position = self.read_position.min(position);
        Ok(())
    }

    /// Bytes between the read and write cursors
    pub fn remaining(&self) -> usize {
        self.write_position.saturating_sub(self.read_position)
    }

    pub fn reserve(&mut self, length: usize) {
        self.data.reserve(length);
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Underlying store, for interop with APIs that fill a `Vec<u8>`.
    /// Cursors are not adjusted; fix them up with the position setters.
    pub fn raw(&mut self) -> &mut Vec<u8> {
        &mut self.data
    }

    // Makes room for `length` bytes at the write cursor, returning the end
    fn grow_for(&mut self, length: usize) -> usize {
        let end = self.write_position + length;
        if end > self.data.len() {
            self.data.resize(end, 0);
        }
        end
    }

    fn readable(&self, offset: usize, length: usize) -> Result<(), BufferError> {
        let limit = self.write_position.min(self.data.len());
        match offset.checked_add(length) {
            Some(end) if end <= limit => Ok(()),
            _ => Err(BufferError::OutOfRange {
                offset,
                requested: length,
                available: limit.saturating_sub(offset),
            }),
        }
    }

    fn load<T: Scalar>(&self, offset: usize, swap_endian: bool) -> Result<T, BufferError> {
        self.readable(offset, T::SIZE)?;
        let bytes = &self.data[offset..offset + T::SIZE];
        if swap_endian && T::SIZE > 1 {
            let mut scratch = [0u8; 8];
            let swapped = &mut scratch[..T::SIZE];
            swapped.copy_from_slice(bytes);
            swapped.reverse();
            Ok(T::take(swapped))
        } else {
            Ok(T::take(bytes))
        }
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self::from_vec(data)
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
