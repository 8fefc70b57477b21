// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Memblock Decoder - fixed-vertex-format mesh blocks
//!
//! A memblock is a length-prefixed block holding a small header followed by
//! fixed-size vertex records:
//!
//! ```text
//! u32 block_size
//! ---- block_size bytes ----
//! u32 format_flags
//! u32 vertex_record_size
//! u32 vertex_count
//! vertex_count × { f32 x, y, z, f32 nx, ny, nz, (record_size - 24) / 4 × f32 ignored }
//! ...unknown padding up to block_size
//! ```
//!
//! The whole block is consumed before it is interpreted, so the stream is left
//! at `block_start + block_size` no matter how much of the block was understood.

use crate::error::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

/// Position + normal prefix shared by every vertex record
pub const VERTEX_PREFIX_SIZE: u32 = 24;

/// format flags + record size + vertex count
const HEADER_SIZE: u64 = 12;

/// Vertex data decoded from one memblock
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodedMesh {
    /// Vertex format flags (not interpreted)
    pub format_flags: u32,
    /// Declared size of one vertex record in bytes
    pub record_size: u32,
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Unit vertex normals (nx, ny, nz); zero for degenerate input normals
    pub normals: Vec<f32>,
}

impl DecodedMesh {
    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of vertex `index`
    #[inline]
    pub fn position(&self, index: usize) -> [f32; 3] {
        let i = index * 3;
        [self.positions[i], self.positions[i + 1], self.positions[i + 2]]
    }

    /// Normal of vertex `index`
    #[inline]
    pub fn normal(&self, index: usize) -> [f32; 3] {
        let i = index * 3;
        [self.normals[i], self.normals[i + 1], self.normals[i + 2]]
    }

    /// Iterate over (position, normal) pairs in stream order
    pub fn vertices(&self) -> impl Iterator<Item = ([f32; 3], [f32; 3])> + '_ {
        self.positions
            .chunks_exact(3)
            .zip(self.normals.chunks_exact(3))
            .map(|(p, n)| ([p[0], p[1], p[2]], [n[0], n[1], n[2]]))
    }
}

/// Bytes actually occupied by one vertex record.
///
/// Extra fields past the 24-byte prefix are read as whole floats, so a record
/// size that is not a multiple of four is rounded up.
#[inline]
pub fn vertex_stride(record_size: u32) -> u64 {
    let extra = record_size.saturating_sub(VERTEX_PREFIX_SIZE) as u64;
    VERTEX_PREFIX_SIZE as u64 + extra.div_ceil(4) * 4
}

/// Read one length-prefixed memblock mesh from `reader`.
///
/// Fails with `TruncatedInput` if the stream ends before `block_size` bytes
/// are available. This is stricter than a plain length check: a header whose
/// `vertex_count × record size` runs past the end of the block is also
/// `TruncatedInput`, even when the stream itself has enough bytes after the
/// block. No partial mesh is returned in either case.
pub fn read_memblock_mesh<R: Read + ?Sized>(reader: &mut R) -> Result<DecodedMesh> {
    let block_size = reader
        .read_u32::<LittleEndian>()
        .map_err(|e| Error::from_read(e, "memblock size", 4))?;
    let block = read_block(reader, block_size)?;
    decode_block(&block)
}

/// Pull exactly `block_size` bytes without trusting the size for allocation
fn read_block<R: Read + ?Sized>(reader: &mut R, block_size: u32) -> Result<Vec<u8>> {
    let mut block = Vec::new();
    (&mut *reader)
        .take(block_size as u64)
        .read_to_end(&mut block)?;

    if block.len() < block_size as usize {
        return Err(Error::truncated(
            "memblock",
            block_size as u64,
            block.len() as u64,
        ));
    }
    Ok(block)
}

/// Decode the contents of a memblock (everything after the size prefix)
pub fn decode_block(block: &[u8]) -> Result<DecodedMesh> {
    let available = block.len() as u64;
    if available < HEADER_SIZE {
        return Err(Error::truncated("memblock header", HEADER_SIZE, available));
    }

    let mut cursor = Cursor::new(block);
    let format_flags = read_u32(&mut cursor, "memblock format flags")?;
    let record_size = read_u32(&mut cursor, "memblock vertex record size")?;
    let vertex_count = read_u32(&mut cursor, "memblock vertex count")?;

    let stride = vertex_stride(record_size);
    let needed = HEADER_SIZE + vertex_count as u64 * stride;
    if needed > available {
        return Err(Error::truncated("memblock vertex data", needed, available));
    }

    let count = vertex_count as usize;
    let mut positions = Vec::with_capacity(count * 3);
    let mut normals = Vec::with_capacity(count * 3);
    let skip = stride - VERTEX_PREFIX_SIZE as u64;

    for _ in 0..count {
        for _ in 0..3 {
            positions.push(read_f32(&mut cursor, "vertex position")?);
        }
        let normal = [
            read_f32(&mut cursor, "vertex normal")?,
            read_f32(&mut cursor, "vertex normal")?,
            read_f32(&mut cursor, "vertex normal")?,
        ];
        normals.extend_from_slice(&normalise(normal));

        // Unknown per-vertex fields (uv, colour, ...)
        cursor.set_position(cursor.position() + skip);
    }

    Ok(DecodedMesh {
        format_flags,
        record_size,
        positions,
        normals,
    })
}

/// Unit-length copy of `n`; zero, infinite or NaN input yields the zero vector
#[inline]
fn normalise(n: [f32; 3]) -> [f32; 3] {
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len > 0.0 && len.is_finite() {
        [n[0] / len, n[1] / len, n[2] / len]
    } else {
        [0.0; 3]
    }
}

#[inline]
fn read_u32(cursor: &mut Cursor<&[u8]>, what: &str) -> Result<u32> {
    cursor
        .read_u32::<LittleEndian>()
        .map_err(|e| Error::from_read(e, what, 4))
}

#[inline]
fn read_f32(cursor: &mut Cursor<&[u8]>, what: &str) -> Result<f32> {
    cursor
        .read_f32::<LittleEndian>()
        .map_err(|e| Error::from_read(e, what, 4))
}
