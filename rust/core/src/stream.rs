// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Primitive reads for the float-oriented map container format.
//!
//! Counts, flags and skipped fields are all stored as little-endian `f32`;
//! strings are newline-terminated.

use crate::error::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Read;

/// Read one little-endian `f32`
#[inline]
pub fn read_f32<R: Read + ?Sized>(reader: &mut R, what: &str) -> Result<f32> {
    reader
        .read_f32::<LittleEndian>()
        .map_err(|e| Error::from_read(e, what, 4))
}

/// Read a count stored as a float, truncated toward zero.
///
/// NaN reads as zero and out-of-range values saturate.
#[inline]
pub fn read_count<R: Read + ?Sized>(reader: &mut R, what: &str) -> Result<i64> {
    Ok(read_f32(reader, what)? as i64)
}

/// Read a float used as a boolean flag (any non-zero value is true)
#[inline]
pub fn read_flag<R: Read + ?Sized>(reader: &mut R, what: &str) -> Result<bool> {
    Ok(read_f32(reader, what)? != 0.0)
}

/// Skip `count` floats of unknown meaning
pub fn skip_f32s<R: Read + ?Sized>(reader: &mut R, count: usize, what: &str) -> Result<()> {
    let needed = count as u64 * 4;
    let skipped = std::io::copy(&mut (&mut *reader).take(needed), &mut std::io::sink())?;
    if skipped < needed {
        return Err(Error::truncated(what, needed, skipped));
    }
    Ok(())
}

/// Read a `\n`-terminated line, dropping the terminator and a trailing `\r`.
///
/// A final line without terminator is returned as-is; end of stream before
/// any byte is `TruncatedInput`. Invalid UTF-8 is replaced, not rejected.
pub fn read_line<R: Read + ?Sized>(reader: &mut R, what: &str) -> Result<String> {
    let mut bytes = Vec::new();
    loop {
        match reader.read_u8() {
            Ok(b'\n') => break,
            Ok(byte) => bytes.push(byte),
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                if bytes.is_empty() {
                    return Err(Error::truncated(what, 1, 0));
                }
                break;
            }
            Err(e) => return Err(Error::Io(e)),
        }
    }
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn floats(values: &[f32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_count_truncates_toward_zero() {
        let data = floats(&[3.9, -1.5, f32::NAN]);
        let mut cursor = Cursor::new(data);
        assert_eq!(read_count(&mut cursor, "a").unwrap(), 3);
        assert_eq!(read_count(&mut cursor, "b").unwrap(), -1);
        assert_eq!(read_count(&mut cursor, "c").unwrap(), 0);
    }

    #[test]
    fn test_flag_is_non_zero() {
        let mut cursor = Cursor::new(floats(&[0.0, 1.0, -0.0]));
        assert!(!read_flag(&mut cursor, "flag").unwrap());
        assert!(read_flag(&mut cursor, "flag").unwrap());
        assert!(!read_flag(&mut cursor, "flag").unwrap());
    }

    #[test]
    fn test_skip_reports_truncation() {
        let mut cursor = Cursor::new(floats(&[1.0, 2.0]));
        skip_f32s(&mut cursor, 1, "skip").unwrap();
        assert_eq!(cursor.position(), 4);
        let err = skip_f32s(&mut cursor, 2, "trailer").unwrap_err();
        assert!(matches!(err, Error::TruncatedInput { needed: 8, available: 4, .. }));
    }

    #[test]
    fn test_read_line_variants() {
        let mut cursor = Cursor::new(b"light\r\nicon.png\nlast".to_vec());
        assert_eq!(read_line(&mut cursor, "name").unwrap(), "light");
        assert_eq!(read_line(&mut cursor, "icon").unwrap(), "icon.png");
        assert_eq!(read_line(&mut cursor, "tail").unwrap(), "last");
        assert!(matches!(
            read_line(&mut cursor, "missing"),
            Err(Error::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_empty_line_is_not_truncation() {
        let mut cursor = Cursor::new(b"\nx\n".to_vec());
        assert_eq!(read_line(&mut cursor, "empty").unwrap(), "");
        assert_eq!(read_line(&mut cursor, "x").unwrap(), "x");
    }
}
