//! A bounds-checked cursor over the input bytes.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::error::{Error, Result};
use crate::read::Endian;

/// Wraps the input slice with a current offset and the two dialect flags.
/// Fixed-width reads honour `little`; varint reads are byte-oriented and do
/// not care.
pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    offset: usize,
    little: bool,
    varint: bool,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8], endian: Endian) -> Self {
        Cursor {
            data,
            offset: 0,
            little: endian != Endian::Big,
            varint: endian == Endian::LittleVarint,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn varint(&self) -> bool {
        self.varint
    }

    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.offset.checked_add(n).ok_or_else(Error::eof)?;
        if end > self.data.len() {
            return Err(Error::eof());
        }
        let bytes = &self.data[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.take(1)?[0] as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.take(2)?;
        Ok(if self.little {
            LittleEndian::read_u16(bytes)
        } else {
            BigEndian::read_u16(bytes)
        })
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.take(4)?;
        Ok(if self.little {
            LittleEndian::read_u32(bytes)
        } else {
            BigEndian::read_u32(bytes)
        })
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        let bytes = self.take(8)?;
        Ok(if self.little {
            LittleEndian::read_i64(bytes)
        } else {
            BigEndian::read_i64(bytes)
        })
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        let bytes = self.take(4)?;
        Ok(if self.little {
            LittleEndian::read_f32(bytes)
        } else {
            BigEndian::read_f32(bytes)
        })
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        let bytes = self.take(8)?;
        Ok(if self.little {
            LittleEndian::read_f64(bytes)
        } else {
            BigEndian::read_f64(bytes)
        })
    }

    /// LEB128, at most 32 payload bits. Used for string lengths in the
    /// varint dialect.
    pub fn read_unsigned_varint(&mut self) -> Result<u32> {
        let mut value = 0u32;
        let mut shift = 0;
        loop {
            if shift > 31 {
                return Err(Error::varnum_too_large());
            }
            let byte = self.read_u8()?;
            value |= u32::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    /// LEB128, at most 64 payload bits.
    pub fn read_unsigned_varlong(&mut self) -> Result<u64> {
        let mut value = 0u64;
        let mut shift = 0;
        loop {
            if shift > 63 {
                return Err(Error::varnum_too_large());
            }
            let byte = self.read_u8()?;
            value |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    pub fn read_zigzag_varint(&mut self) -> Result<i32> {
        let n = self.read_unsigned_varint()?;
        Ok((n >> 1) as i32 ^ -((n & 1) as i32))
    }

    pub fn read_zigzag_varlong(&mut self) -> Result<i64> {
        let n = self.read_unsigned_varlong()?;
        Ok((n >> 1) as i64 ^ -((n & 1) as i64))
    }

    pub fn has_gzip_magic(&self) -> bool {
        self.data.len() >= 2 && self.data[0] == 0x1f && self.data[1] == 0x8b
    }

    pub fn has_zlib_magic(&self) -> bool {
        !self.data.is_empty() && self.data[0] == 0x78
    }

    /// True when the input opens with a Bedrock level header: 4 bytes of
    /// version, then the byte length of the rest of the input as a
    /// little-endian u32. Only the plain little-endian dialect uses it;
    /// varint network streams are headerless.
    pub fn has_bedrock_level_header(&self) -> bool {
        self.little
            && !self.varint
            && self.data.len() >= 8
            && LittleEndian::read_u32(&self.data[4..8]) as usize == self.data.len() - 8
    }
}
