//! Fixed-layout records
//!
//! A record is any value with a fixed encoded size and no versioning of its
//! own. The store only copies bytes in and out; it never keeps a reference to
//! a caller's record.
//!
//! Encoding is explicit little-endian, field by field, so the on-medium layout
//! does not depend on compiler struct layout.

/// Value stored in one table
pub trait Record: Sized {
    /// Encoded size in bytes
    const SIZE: usize;

    /// Serialise into `buf` (`buf.len() == Self::SIZE`)
    fn encode(&self, buf: &mut [u8]);

    /// Deserialise from `buf` (`buf.len() == Self::SIZE`)
    ///
    /// Must accept any byte pattern: an unformatted medium hands back whatever
    /// happens to be stored.
    fn decode(buf: &[u8]) -> Self;
}

/// Text did not fit its fixed-size field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextTooLong;

/// Sequential little-endian writer over a record buffer
///
/// Writes past the end of the buffer are dropped.
pub struct RecordWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> RecordWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes written so far
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn put_bytes(&mut self, data: &[u8]) {
        let start = core::cmp::min(self.pos, self.buf.len());
        let end = core::cmp::min(self.pos + data.len(), self.buf.len());
        self.buf[start..end].copy_from_slice(&data[..end - start]);
        self.pos += data.len();
    }

    pub fn put_u8(&mut self, value: u8) {
        self.put_bytes(&[value]);
    }

    pub fn put_u16(&mut self, value: u16) {
        self.put_bytes(&value.to_le_bytes());
    }

    pub fn put_u32(&mut self, value: u32) {
        self.put_bytes(&value.to_le_bytes());
    }

    pub fn put_i32(&mut self, value: i32) {
        self.put_bytes(&value.to_le_bytes());
    }
}

/// Sequential little-endian reader over a record buffer
///
/// Reads past the end of the buffer yield zero bytes, so decoding never fails.
pub struct RecordReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> RecordReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn get_array<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        let start = core::cmp::min(self.pos, self.buf.len());
        let end = core::cmp::min(self.pos + N, self.buf.len());
        out[..end - start].copy_from_slice(&self.buf[start..end]);
        self.pos += N;
        out
    }

    pub fn get_u8(&mut self) -> u8 {
        self.get_array::<1>()[0]
    }

    pub fn get_u16(&mut self) -> u16 {
        u16::from_le_bytes(self.get_array())
    }

    pub fn get_u32(&mut self) -> u32 {
        u32::from_le_bytes(self.get_array())
    }

    pub fn get_i32(&mut self) -> i32 {
        i32::from_le_bytes(self.get_array())
    }
}

/// View a NUL-padded text field as `&str`
///
/// Stops at the first NUL. Invalid UTF-8 (e.g. garbage from an unformatted
/// medium) reads as an empty string.
pub fn text(field: &[u8]) -> &str {
    let len = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    core::str::from_utf8(&field[..len]).unwrap_or("")
}

/// Store `value` into a NUL-padded text field
///
/// The field is left untouched when `value` does not fit.
pub fn set_text(field: &mut [u8], value: &str) -> Result<(), TextTooLong> {
    let bytes = value.as_bytes();
    if bytes.len() > field.len() {
        return Err(TextTooLong);
    }
    field.fill(0);
    field[..bytes.len()].copy_from_slice(bytes);
    Ok(())
}

/// Build a NUL-padded text field from `value`
pub fn text_field<const N: usize>(value: &str) -> Result<[u8; N], TextTooLong> {
    let mut field = [0u8; N];
    set_text(&mut field, value)?;
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_reader_little_endian() {
        let mut buf = [0u8; 11];
        let mut w = RecordWriter::new(&mut buf);
        w.put_u8(0xAB);
        w.put_u16(0x1234);
        w.put_u32(0xDEADBEEF);
        w.put_i32(-2);
        assert_eq!(w.position(), 11);
        assert_eq!(&buf[..3], &[0xAB, 0x34, 0x12]);

        let mut r = RecordReader::new(&buf);
        assert_eq!(r.get_u8(), 0xAB);
        assert_eq!(r.get_u16(), 0x1234);
        assert_eq!(r.get_u32(), 0xDEADBEEF);
        assert_eq!(r.get_i32(), -2);
        assert_eq!(r.position(), 11);
    }

    #[test]
    fn test_reader_past_end_yields_zero() {
        let buf = [0xFFu8; 2];
        let mut r = RecordReader::new(&buf);
        assert_eq!(r.get_u32(), 0x0000FFFF);
        assert_eq!(r.get_u16(), 0);
    }

    #[test]
    fn test_writer_drops_overflow() {
        let mut buf = [0u8; 2];
        let mut w = RecordWriter::new(&mut buf);
        w.put_u32(0x01020304);
        assert_eq!(buf, [0x04, 0x03]);
    }

    #[test]
    fn test_text_field() {
        let field: [u8; 8] = text_field("node").unwrap();
        assert_eq!(text(&field), "node");
        assert_eq!(&field[4..], &[0, 0, 0, 0]);

        // Exactly full, no terminator
        let full: [u8; 4] = text_field("abcd").unwrap();
        assert_eq!(text(&full), "abcd");

        assert_eq!(text_field::<3>("abcd"), Err(TextTooLong));
    }

    #[test]
    fn test_set_text_keeps_field_on_overflow() {
        let mut field: [u8; 4] = text_field("ab").unwrap();
        assert_eq!(set_text(&mut field, "too long"), Err(TextTooLong));
        assert_eq!(text(&field), "ab");

        set_text(&mut field, "x").unwrap();
        assert_eq!(field, [b'x', 0, 0, 0]);
    }

    #[test]
    fn test_text_invalid_utf8_is_empty() {
        assert_eq!(text(&[0xFF, 0xFE, 0x00]), "");
        assert_eq!(text(&[0, 0, 0]), "");
    }
}
