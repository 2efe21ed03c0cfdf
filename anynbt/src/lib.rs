//! anynbt decodes *Minecraft* NBT data in any of its three wire dialects:
//! the big-endian form Java edition uses, the little-endian form Bedrock
//! edition stores files in, and the ZigZag-varint form Bedrock speaks on the
//! network.
//!
//! The decoder is read-only. It produces an owned [`Value`] tree plus the
//! framing it resolved along the way; there is no encoder and no SNBT/JSON
//! output in this crate.
//!
//! ```toml
//! [dependencies]
//! anynbt = "0.1"
//! ```
//!
//! # Framing detection
//!
//! NBT in the wild rarely announces how it is framed. A level.dat may or may
//! not be gzipped, a Bedrock file may carry an 8 byte level header, network
//! NBT drops the root name entirely. [`read`] takes a [`ReadOptions`] of
//! hints and resolves every hint left unset by speculative trial: sniff or
//! trial the compression, then try big, little and varint dialects in that
//! order, then a named root before a nameless one. The resolved framing
//! comes back on the [`Document`] beside the tree.
//!
//! ```no_run
//! use anynbt::{read_from, ReadOptions};
//!
//! fn main() -> anynbt::error::Result<()> {
//!     let file = std::fs::File::open("level.dat").unwrap();
//!     let doc = read_from(file, &ReadOptions::default())?;
//!
//!     println!(
//!         "{:?} ({}, {})",
//!         doc.root_name, doc.endian, doc.compression
//!     );
//!     println!("{:#?}", doc.root);
//!     Ok(())
//! }
//! ```
//!
//! # What the tree keeps, and what it drops
//!
//! [`Value`] deliberately forgets the wire width of scalars (a `SHORT` and
//! an `INT` both come back as [`Value::Int`]) and collapses lists of numeric
//! scalars into packed buffers ([`Value::IntArray`] and friends) rather than
//! vectors of boxed elements. Consumers that need to re-emit byte-identical
//! NBT need more than this crate retains.

pub mod compression;
pub mod error;

mod cursor;
mod decode;
mod read;
mod value;

pub use compression::{decompress, Compression};
pub use read::{read, read_from, Document, Endian, ReadOptions, RootName};
pub use value::{Compound, Value};

#[cfg(test)]
mod test;

use std::convert::TryFrom;

/// An NBT tag kind. This carries neither the value nor the name of the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Tag {
    /// Terminates a Compound; never opens a value.
    End = 0,
    /// Signed 8-bit.
    Byte = 1,
    /// Signed 16-bit.
    Short = 2,
    /// Signed 32-bit, or a ZigZag varint on the network.
    Int = 3,
    /// Signed 64-bit, or a ZigZag varint on the network.
    Long = 4,
    /// IEEE-754 32-bit.
    Float = 5,
    /// IEEE-754 64-bit.
    Double = 6,
    /// Length-prefixed signed bytes.
    ByteArray = 7,
    /// Length-prefixed Modified UTF-8.
    String = 8,
    /// Element kind, length, then the payloads.
    List = 9,
    /// (kind, name, payload) triples until an End kind.
    Compound = 10,
    /// Length-prefixed signed 32-bit values.
    IntArray = 11,
    /// Length-prefixed signed 64-bit values.
    LongArray = 12,
}

impl Tag {
    /// The byte width of the packed element this kind collapses into, for
    /// the six numeric scalar kinds. None for everything else.
    pub fn scalar_width(self) -> Option<usize> {
        match self {
            Tag::Byte => Some(1),
            Tag::Short => Some(2),
            Tag::Int | Tag::Float => Some(4),
            Tag::Long | Tag::Double => Some(8),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag as u8
    }
}
