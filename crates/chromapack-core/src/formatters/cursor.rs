//! Bounds-checked cursors over raw pixel buffers
//!
//! Codecs address samples relative to the cursor position: chunky layouts
//! step by sample size, planar layouts step by the plane stride. Every access
//! is checked and reports [`Error::BufferOverrun`] instead of reading or
//! writing past the end. Samples are stored in native byte order.

use bytemuck::Pod;

use crate::error::{Error, Result};

#[inline]
fn span(pos: usize, offset: usize, size: usize, len: usize) -> Result<std::ops::Range<usize>> {
    let start = pos.checked_add(offset);
    match start.and_then(|s| s.checked_add(size)) {
        Some(end) if end <= len => Ok(end - size..end),
        _ => Err(Error::BufferOverrun {
            offset: start.unwrap_or(usize::MAX),
            needed: size,
            len,
        }),
    }
}

/// Read cursor over an input pixel buffer
#[derive(Debug, Clone)]
pub struct ReadCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ReadCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Byte offset of the next pixel
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Read one sample `offset` bytes past the cursor
    #[inline]
    pub fn read<T: Pod>(&self, offset: usize) -> Result<T> {
        let range = span(self.pos, offset, size_of::<T>(), self.buf.len())?;
        Ok(bytemuck::pod_read_unaligned(&self.buf[range]))
    }

    /// Borrow the next `n` bytes and move past them
    #[inline]
    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let range = span(self.pos, 0, n, self.buf.len())?;
        self.pos = range.end;
        Ok(&self.buf[range])
    }

    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }
}

/// Write cursor over an output pixel buffer
///
/// Bytes the codec does not own (extra channels) are left untouched.
#[derive(Debug)]
pub struct WriteCursor<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> WriteCursor<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Byte offset of the next pixel
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Write one sample `offset` bytes past the cursor
    #[inline]
    pub fn write<T: Pod>(&mut self, offset: usize, value: T) -> Result<()> {
        let range = span(self.pos, offset, size_of::<T>(), self.buf.len())?;
        self.buf[range].copy_from_slice(bytemuck::bytes_of(&value));
        Ok(())
    }

    /// Read back a sample already present in the output (premultiplied alpha)
    #[inline]
    pub fn read<T: Pod>(&self, offset: usize) -> Result<T> {
        let range = span(self.pos, offset, size_of::<T>(), self.buf.len())?;
        Ok(bytemuck::pod_read_unaligned(&self.buf[range]))
    }

    /// Mutably borrow the next `n` bytes and move past them
    #[inline]
    pub fn take(&mut self, n: usize) -> Result<&mut [u8]> {
        let range = span(self.pos, 0, n, self.buf.len())?;
        self.pos = range.end;
        Ok(&mut self.buf[range])
    }

    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }
}
