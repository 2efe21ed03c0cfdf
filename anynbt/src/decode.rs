//! Recursive descent over the tag grammar. One routine per kind, dispatched
//! on the kind byte just read from the stream.

use std::convert::TryFrom;
use std::mem;

use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::value::{Compound, Value};
use crate::Tag;

pub(crate) struct Decoder<'a> {
    pub(crate) cursor: Cursor<'a>,
    max_depth: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(cursor: Cursor<'a>, max_depth: usize) -> Self {
        Decoder { cursor, max_depth }
    }

    pub fn tag(&mut self) -> Result<Tag> {
        let byte = self.cursor.read_u8()?;
        Tag::try_from(byte).map_err(|_| Error::invalid_tag(byte))
    }

    /// Length-prefixed Modified UTF-8. The prefix is an unsigned varint in
    /// the varint dialect, an unsigned short otherwise.
    pub fn string(&mut self) -> Result<String> {
        let len = if self.cursor.varint() {
            self.cursor.read_unsigned_varint()? as usize
        } else {
            self.cursor.read_u16()? as usize
        };
        let bytes = self.cursor.take(len)?;
        Ok(cesu8::from_java_cesu8(bytes)
            .map_err(|_| Error::nonunicode(bytes))?
            .into_owned())
    }

    /// The payload of a tag whose kind byte has already been consumed.
    /// `depth` is the number of containers enclosing this value.
    pub fn payload(&mut self, tag: Tag, depth: usize) -> Result<Value> {
        match tag {
            Tag::Byte => Ok(Value::Int(i32::from(self.cursor.read_i8()?))),
            Tag::Short => Ok(Value::Int(i32::from(self.cursor.read_i16()?))),
            Tag::Int => Ok(Value::Int(self.int()?)),
            Tag::Long => Ok(Value::Long(self.long()?)),
            Tag::Float => Ok(Value::Double(f64::from(self.cursor.read_f32()?))),
            Tag::Double => Ok(Value::Double(self.cursor.read_f64()?)),
            Tag::String => Ok(Value::String(self.string()?)),
            Tag::ByteArray => {
                let len = self.len()?;
                let bytes = self.cursor.take(len)?;
                Ok(Value::ByteArray(bytes.iter().map(|&b| b as i8).collect()))
            }
            Tag::IntArray => {
                let len = self.len()?;
                Ok(Value::IntArray(self.fixed_i32s(len)?))
            }
            Tag::LongArray => {
                let len = self.len()?;
                Ok(Value::LongArray(self.fixed_i64s(len)?))
            }
            Tag::List => self.list(depth),
            Tag::Compound => Ok(Value::Compound(self.compound(depth)?)),
            Tag::End => Err(Error::invalid("unexpected end tag")),
        }
    }

    /// `INT` values follow the dialect; fixed in both fixed-width dialects,
    /// ZigZag varint otherwise.
    fn int(&mut self) -> Result<i32> {
        if self.cursor.varint() {
            self.cursor.read_zigzag_varint()
        } else {
            self.cursor.read_i32()
        }
    }

    fn long(&mut self) -> Result<i64> {
        if self.cursor.varint() {
            self.cursor.read_zigzag_varlong()
        } else {
            self.cursor.read_i64()
        }
    }

    /// List and array length prefixes: ZigZag varint in the varint dialect,
    /// signed int otherwise. Negative lengths are rejected.
    fn len(&mut self) -> Result<usize> {
        let n = self.int()?;
        usize::try_from(n).map_err(|_| Error::invalid(format!("negative length: {}", n)))
    }

    /// Refuse a declared element count that the remaining input cannot
    /// possibly back, before allocating for it.
    fn guard(&self, len: usize, width: usize) -> Result<()> {
        let need = len.checked_mul(width).ok_or_else(Error::eof)?;
        if need > self.cursor.remaining() {
            return Err(Error::eof());
        }
        Ok(())
    }

    /// Array tag elements are always fixed-width, even in the varint
    /// dialect; only their length prefix varies.
    fn fixed_i32s(&mut self, len: usize) -> Result<Vec<i32>> {
        self.guard(len, mem::size_of::<i32>())?;
        let mut values = Vec::with_capacity(len);
        for _ in 0..len {
            values.push(self.cursor.read_i32()?);
        }
        Ok(values)
    }

    fn fixed_i64s(&mut self, len: usize) -> Result<Vec<i64>> {
        self.guard(len, mem::size_of::<i64>())?;
        let mut values = Vec::with_capacity(len);
        for _ in 0..len {
            values.push(self.cursor.read_i64()?);
        }
        Ok(values)
    }

    fn list(&mut self, depth: usize) -> Result<Value> {
        if depth >= self.max_depth {
            return Err(Error::depth_limit(self.max_depth));
        }
        let element = self.tag()?;
        let len = self.len()?;

        // Lists of numeric scalars are packed into one buffer of the
        // element width instead of a vector of boxed values.
        if let Some(width) = element.scalar_width() {
            let per = if self.cursor.varint() && matches!(element, Tag::Int | Tag::Long) {
                1 // varint elements occupy at least one byte each
            } else {
                width
            };
            self.guard(len, per)?;
            return self.packed_list(element, len);
        }

        if element == Tag::End {
            if len == 0 {
                // The canonical empty list.
                return Ok(Value::List(Vec::new()));
            }
            return Err(Error::invalid("end tag as list element"));
        }

        self.guard(len, 1)?;
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(self.payload(element, depth + 1)?);
        }
        Ok(Value::List(items))
    }

    fn packed_list(&mut self, element: Tag, len: usize) -> Result<Value> {
        Ok(match element {
            Tag::Byte => {
                let bytes = self.cursor.take(len)?;
                Value::ByteArray(bytes.iter().map(|&b| b as i8).collect())
            }
            Tag::Short => {
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(self.cursor.read_i16()?);
                }
                Value::ShortArray(values)
            }
            Tag::Int => {
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(self.int()?);
                }
                Value::IntArray(values)
            }
            Tag::Long => {
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(self.long()?);
                }
                Value::LongArray(values)
            }
            Tag::Float => {
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(self.cursor.read_f32()?);
                }
                Value::FloatArray(values)
            }
            Tag::Double => {
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(self.cursor.read_f64()?);
                }
                Value::DoubleArray(values)
            }
            _ => unreachable!(),
        })
    }

    /// `EXPECT_KIND -> (END: done) | (k: EXPECT_NAME -> EXPECT_CHILD(k) ->
    /// EXPECT_KIND)`. Duplicate names overwrite, last wins.
    fn compound(&mut self, depth: usize) -> Result<Compound> {
        if depth >= self.max_depth {
            return Err(Error::depth_limit(self.max_depth));
        }
        let mut compound = Compound::new();
        loop {
            let tag = self.tag()?;
            if tag == Tag::End {
                return Ok(compound);
            }
            let name = self.string()?;
            let value = self.payload(tag, depth + 1)?;
            compound.insert(name, value);
        }
    }
}
