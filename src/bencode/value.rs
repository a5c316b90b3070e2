use bytes::Bytes;
use std::collections::BTreeMap;

/// A decoded bencode value.
///
/// The four variants mirror the four grammar rules. Containers own their
/// children, so a decoded tree is fully owned by whoever called the decoder.
///
/// # Examples
///
/// ```
/// use bdecode::bencode::Value;
///
/// let int: Value = 42i64.into();
/// let string: Value = "spam".into();
/// let list = Value::List(vec![int.clone(), string.clone()]);
///
/// assert_eq!(int.as_integer(), Some(42));
/// assert_eq!(string.as_str(), Some("spam"));
/// assert_eq!(list.as_list().map(|l| l.len()), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A length-prefixed run of raw bytes, not necessarily UTF-8.
    Bytes(Bytes),
    /// A signed 64-bit integer.
    Integer(i64),
    /// Values in the order they were encountered.
    List(Vec<Value>),
    /// Byte-string keys mapped to values.
    Dict(BTreeMap<Bytes, Value>),
}

impl Value {
    /// Creates a byte string value from UTF-8 text.
    pub fn string(s: &str) -> Self {
        Value::Bytes(Bytes::copy_from_slice(s.as_bytes()))
    }

    /// Names the variant, as used in error messages.
    ///
    /// ```
    /// use bdecode::bencode::Value;
    ///
    /// assert_eq!(Value::Integer(1).kind(), "integer");
    /// assert_eq!(Value::string("x").kind(), "byte string");
    /// ```
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bytes(_) => "byte string",
            Value::Integer(_) => "integer",
            Value::List(_) => "list",
            Value::Dict(_) => "dictionary",
        }
    }

    /// Returns the value as an integer, if it is one.
    ///
    /// ```
    /// use bdecode::bencode::Value;
    ///
    /// assert_eq!(Value::Integer(-7).as_integer(), Some(-7));
    /// assert_eq!(Value::string("7").as_integer(), None);
    /// ```
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the raw payload of a byte string.
    ///
    /// ```
    /// use bdecode::bencode::Value;
    ///
    /// let value = Value::string("spam");
    /// assert_eq!(value.as_bytes().map(|b| b.as_ref()), Some(b"spam".as_slice()));
    /// ```
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the value as UTF-8 text.
    ///
    /// `None` for non-strings and for byte strings that are not valid UTF-8;
    /// use [`Value::as_bytes`] for the raw payload.
    ///
    /// ```
    /// use bdecode::bencode::{decode, Value};
    ///
    /// let value = decode(&b"4:spam"[..]).unwrap().unwrap();
    /// assert_eq!(value.as_str(), Some("spam"));
    ///
    /// let raw = decode(&b"2:\xff\xfe"[..]).unwrap().unwrap();
    /// assert_eq!(raw.as_str(), None);
    /// assert_eq!(raw.as_bytes().map(|b| b.len()), Some(2));
    /// ```
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Bytes(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Returns the elements of a list, in encounter order.
    ///
    /// ```
    /// use bdecode::bencode::decode;
    ///
    /// let value = decode(&b"li1ei2ee"[..]).unwrap().unwrap();
    /// assert_eq!(value.as_list().map(|l| l.len()), Some(2));
    /// ```
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the dictionary, if this value is one.
    ///
    /// ```
    /// use bdecode::bencode::decode;
    ///
    /// let value = decode(&b"d3:foo3:bare"[..]).unwrap().unwrap();
    /// assert!(value.as_dict().unwrap().contains_key(b"foo".as_slice()));
    /// ```
    pub fn as_dict(&self) -> Option<&BTreeMap<Bytes, Value>> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Consumes the value and returns the byte string payload.
    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Consumes the value and returns the list without cloning it.
    pub fn into_list(self) -> Option<Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Consumes the value and returns the dictionary without cloning it.
    pub fn into_dict(self) -> Option<BTreeMap<Bytes, Value>> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Looks up `key` if this value is a dictionary.
    ///
    /// ```
    /// use bdecode::bencode::decode;
    ///
    /// let value = decode(&b"d3:cow3:mooe"[..]).unwrap().unwrap();
    /// assert_eq!(value.get(b"cow").and_then(|v| v.as_str()), Some("moo"));
    /// assert_eq!(value.get(b"pig"), None);
    /// ```
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dict()?.get(key)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Value::List(l)
    }
}

impl From<BTreeMap<Bytes, Value>> for Value {
    fn from(d: BTreeMap<Bytes, Value>) -> Self {
        Value::Dict(d)
    }
}
