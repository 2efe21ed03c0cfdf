//! The format driver. Resolves the framing parameters the caller left open,
//! decompresses, and hands a cursor to the grammar decoder.

use std::borrow::Cow;
use std::fmt;
use std::io::Read;
use std::str::FromStr;

use crate::compression::{decompress, Compression};
use crate::cursor::Cursor;
use crate::decode::Decoder;
use crate::error::{Error, Result};
use crate::value::Value;
use crate::Tag;

/// The three wire dialects: Java edition, Bedrock files, Bedrock network
/// streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    /// Network byte order for every multi-byte value. Java edition.
    Big,
    /// Least significant byte first. Bedrock files.
    Little,
    /// Little-endian floats and array elements, but ints, longs and
    /// length prefixes are ZigZag varints. Bedrock network streams.
    LittleVarint,
}

impl FromStr for Endian {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "big" => Endian::Big,
            "little" => Endian::Little,
            "little-varint" | "varint" => Endian::LittleVarint,
            _ => return Err(Error::validation(format!("unknown endian: {:?}", s))),
        })
    }
}

impl fmt::Display for Endian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Endian::Big => "big",
            Endian::Little => "little",
            Endian::LittleVarint => "little-varint",
        })
    }
}

/// Whether, and how, a name precedes the root payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootName {
    /// A name is present; any value is accepted.
    Named,
    /// No name on the wire, as in Bedrock network streams.
    Nameless,
    /// A name is present and must match exactly.
    Exact(String),
}

const DEFAULT_MAX_DEPTH: usize = 512;

/// Framing hints for [`read`]. Every `None` is resolved by the driver:
/// compression by header sniffing then trial, endianness and root naming by
/// trial in a fixed order. Trials keep the first error they saw, so a
/// totally unreadable input reports the failure of its most likely shape.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    pub compression: Option<Compression>,
    pub endian: Option<Endian>,
    pub root_name: Option<RootName>,
    /// Whether an 8 byte level header (version, then payload length)
    /// precedes the root. Resolved against the input when unset.
    pub bedrock_level: Option<bool>,
    /// When set, bytes after the root tag are an error. Defaults to true.
    pub strict: bool,
    /// Maximum container nesting before the decoder gives up. Defaults
    /// to 512.
    pub max_depth: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            compression: None,
            endian: None,
            root_name: None,
            bedrock_level: None,
            strict: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// A decoded tree along with the framing that was resolved while reading it.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub root: Value,
    /// `None` for a nameless stream.
    pub root_name: Option<String>,
    pub endian: Endian,
    pub compression: Compression,
    pub bedrock_level: bool,
    /// The final offset reached in the decompressed payload. Equal to the
    /// payload length unless `strict` was turned off.
    pub bytes_read: usize,
}

/// Decode one NBT document from `input`.
///
/// ```
/// use anynbt::{read, Compression, Endian, ReadOptions, Value};
/// # use anynbt::error::Result;
/// #
/// # fn main() -> Result<()> {
/// // An unnamed compound holding byte "bar" = 127, Java dialect.
/// let buf = [0x0a, 0x00, 0x00, 0x01, 0x00, 0x03, b'b', b'a', b'r', 0x7f, 0x00];
/// let doc = read(&buf, &ReadOptions::default())?;
///
/// assert_eq!(doc.root_name.as_deref(), Some(""));
/// assert_eq!(doc.endian, Endian::Big);
/// assert_eq!(doc.compression, Compression::None);
/// match &doc.root {
///     Value::Compound(c) => assert_eq!(c["bar"], Value::Int(127)),
///     _ => unreachable!(),
/// }
/// # Ok(())
/// # }
/// ```
pub fn read(input: impl AsRef<[u8]>, options: &ReadOptions) -> Result<Document> {
    read_slice(input.as_ref(), options)
}

/// Read `reader` to its end and decode as [`read`] does. NBT documents are
/// small, so buffering the whole stream first costs little and lets the
/// driver re-enter the bytes during framing detection.
pub fn read_from(mut reader: impl Read, options: &ReadOptions) -> Result<Document> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    read_slice(&data, options)
}

fn read_slice(data: &[u8], options: &ReadOptions) -> Result<Document> {
    let compression = match options.compression {
        Some(compression) => compression,
        None => {
            let sniff = Cursor::new(data, Endian::Big);
            if sniff.has_gzip_magic() {
                Compression::Gzip
            } else if sniff.has_zlib_magic() {
                Compression::Zlib
            } else {
                // No header to go by. Try reading uncompressed, fall back
                // to a bare deflate stream, and report the first failure.
                let none = ReadOptions {
                    compression: Some(Compression::None),
                    ..options.clone()
                };
                return read_slice(data, &none).or_else(|first| {
                    let raw = ReadOptions {
                        compression: Some(Compression::RawDeflate),
                        ..options.clone()
                    };
                    read_slice(data, &raw).map_err(|_| first)
                });
            }
        }
    };

    let endian = match options.endian {
        Some(endian) => endian,
        None => {
            let big = ReadOptions {
                compression: Some(compression),
                endian: Some(Endian::Big),
                ..options.clone()
            };
            return read_slice(data, &big).or_else(|first| {
                let little = ReadOptions {
                    endian: Some(Endian::Little),
                    ..big.clone()
                };
                read_slice(data, &little).or_else(|_| {
                    let varint = ReadOptions {
                        endian: Some(Endian::LittleVarint),
                        ..big.clone()
                    };
                    read_slice(data, &varint).map_err(|_| first)
                })
            });
        }
    };

    let root_name = match &options.root_name {
        Some(root_name) => root_name.clone(),
        None => {
            let named = ReadOptions {
                compression: Some(compression),
                endian: Some(endian),
                root_name: Some(RootName::Named),
                ..options.clone()
            };
            return read_slice(data, &named).or_else(|first| {
                let nameless = ReadOptions {
                    root_name: Some(RootName::Nameless),
                    ..named.clone()
                };
                read_slice(data, &nameless).map_err(|_| first)
            });
        }
    };

    // Framing is settled; from here every failure is final.
    let payload: Cow<[u8]> = match compression {
        Compression::None => Cow::Borrowed(data),
        compression => Cow::Owned(decompress(data, compression)?),
    };

    let mut cursor = Cursor::new(&payload, endian);
    let bedrock_level = options
        .bedrock_level
        .unwrap_or_else(|| cursor.has_bedrock_level_header());
    if bedrock_level {
        // 4 bytes of version, then the payload length. Neither drives the
        // decode.
        cursor.read_u32()?;
        cursor.read_u32()?;
    }

    let mut decoder = Decoder::new(cursor, options.max_depth);
    let opening = decoder.tag()?;
    if opening != Tag::Compound && opening != Tag::List {
        return Err(Error::invalid_opening_tag(opening));
    }
    let resolved_name = match &root_name {
        RootName::Nameless => None,
        RootName::Named => Some(decoder.string()?),
        RootName::Exact(want) => {
            let got = decoder.string()?;
            if got != *want {
                return Err(Error::unexpected_root_name(&got, want));
            }
            Some(got)
        }
    };
    let root = decoder.payload(opening, 0)?;

    let bytes_read = decoder.cursor.offset();
    if options.strict && bytes_read < payload.len() {
        return Err(Error::trailing_data(payload.len() - bytes_read, bytes_read));
    }

    Ok(Document {
        root,
        root_name: resolved_name,
        endian,
        compression,
        bedrock_level,
        bytes_read,
    })
}
