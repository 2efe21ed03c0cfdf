use std::iter::FromIterator;
use std::ops::Index;
use std::slice;
use std::vec;

/// A complete NBT value. It owns its data.
///
/// The wire width of scalars is not retained: `BYTE`, `SHORT` and `INT` all
/// surface as [`Value::Int`], and `FLOAT` widens into [`Value::Double`]. In
/// the same spirit a list whose declared element kind is a numeric scalar is
/// packed into the matching array variant, so a list of `INT` cannot be told
/// apart from an `INT_ARRAY` once decoded.
///
/// ```
/// use anynbt::{read, ReadOptions, Value};
/// # use anynbt::error::Result;
/// #
/// # fn main() -> Result<()> {
/// let buf = [10, 0, 0, 3, 0, 3, b'v', b'e', b'r', 0, 0, 2, 88, 0];
/// let doc = read(&buf, &ReadOptions::default())?;
/// match &doc.root {
///     Value::Compound(c) => match c["ver"] {
///         Value::Int(n) => println!("version: {}", n),
///         _ => {}
///     },
///     _ => {}
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `BYTE`, `SHORT` or `INT`.
    Int(i32),
    /// `LONG`. Kept apart from [`Value::Int`] since it does not fit 32 bits.
    Long(i64),
    /// `FLOAT` or `DOUBLE`.
    Double(f64),
    /// Never produced by the decoder; NBT has no boolean kind. Exists so
    /// consumers building trees by hand have somewhere to put flags.
    Bool(bool),
    String(String),
    /// `BYTE_ARRAY`, or a list of `BYTE`.
    ByteArray(Vec<i8>),
    /// A list of `SHORT`.
    ShortArray(Vec<i16>),
    /// `INT_ARRAY`, or a list of `INT`.
    IntArray(Vec<i32>),
    /// `LONG_ARRAY`, or a list of `LONG`.
    LongArray(Vec<i64>),
    /// A list of `FLOAT`.
    FloatArray(Vec<f32>),
    /// A list of `DOUBLE`.
    DoubleArray(Vec<f64>),
    /// A list of any non-scalar element kind, or the empty list.
    List(Vec<Value>),
    Compound(Compound),
}

/// A compound: names mapped to values, iterating in the order names first
/// appeared on the wire.
///
/// Backed by a plain vector. Compounds in real NBT are small, and keeping
/// wire order matters more than sublinear lookup.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compound {
    entries: Vec<(String, Value)>,
}

impl Compound {
    pub fn new() -> Self {
        Compound {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert a value under `name`. A duplicate name replaces the value in
    /// place, keeping the position of the name's first occurrence; the
    /// replaced value is returned.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        let name = name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> slice::Iter<'_, (String, Value)> {
        self.entries.iter()
    }
}

impl<'a> Index<&'a str> for Compound {
    type Output = Value;

    fn index(&self, name: &str) -> &Value {
        self.get(name)
            .unwrap_or_else(|| panic!("no value for name: {:?}", name))
    }
}

impl IntoIterator for Compound {
    type Item = (String, Value);
    type IntoIter = vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = &'a (String, Value);
    type IntoIter = slice::Iter<'a, (String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(String, Value)> for Compound {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut compound = Compound::new();
        for (name, value) in iter {
            compound.insert(name, value);
        }
        compound
    }
}
