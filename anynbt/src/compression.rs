//! The decompression shim between the format driver and flate2.

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};

use crate::error::{Error, Result};

/// The compression wrapper around an NBT payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    /// Deflate with the zlib header, as region files use.
    Zlib,
    /// A bare deflate stream with no header at all.
    RawDeflate,
}

/// Inflate `data` according to `compression` into a fresh buffer.
/// `Compression::None` copies the input through unchanged.
pub fn decompress(data: &[u8], compression: Compression) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    match compression {
        Compression::None => out.extend_from_slice(data),
        Compression::Gzip => {
            GzDecoder::new(data).read_to_end(&mut out)?;
        }
        Compression::Zlib => {
            ZlibDecoder::new(data).read_to_end(&mut out)?;
        }
        Compression::RawDeflate => {
            DeflateDecoder::new(data).read_to_end(&mut out)?;
        }
    }
    Ok(out)
}

impl FromStr for Compression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "none" => Compression::None,
            "gzip" => Compression::Gzip,
            "zlib" | "deflate" => Compression::Zlib,
            "raw-deflate" | "deflate-raw" => Compression::RawDeflate,
            _ => return Err(Error::validation(format!("unknown compression: {:?}", s))),
        })
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Compression::None => "none",
            Compression::Gzip => "gzip",
            Compression::Zlib => "zlib",
            Compression::RawDeflate => "raw-deflate",
        })
    }
}
