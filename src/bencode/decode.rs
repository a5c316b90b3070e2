use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Read};
use std::str::FromStr;

use bytes::Bytes;

use super::error::{BencodeError, Stage};
use super::value::Value;
use crate::constants::{
    DEFAULT_MAX_DEPTH, DICT_PREFIX, END_SUFFIX, INTEGER_PREFIX, LENGTH_DELIMITER, LIST_PREFIX,
    STRING_PREALLOC_LIMIT,
};

/// Decodes one value from `reader` with default options.
///
/// Returns `Ok(None)` if the reader is empty. The reader is used directly,
/// without an extra buffer, so bytes following the value stay in it and a
/// later call picks up from there. Wrap an unbuffered source such as a
/// `File` in a [`std::io::BufReader`] and keep that wrapper for all calls.
///
/// # Errors
///
/// Any grammar violation, truncation or I/O failure aborts the whole decode.
///
/// # Examples
///
/// ```
/// use bdecode::bencode::{decode, Value};
///
/// let value = decode(&b"i-42e"[..]).unwrap();
/// assert_eq!(value, Some(Value::Integer(-42)));
///
/// assert_eq!(decode(&b""[..]).unwrap(), None);
/// assert!(decode(&b"5:abc"[..]).is_err());
///
/// let mut stream = &b"i1ei2e"[..];
/// assert_eq!(decode(&mut stream).unwrap(), Some(Value::Integer(1)));
/// assert_eq!(decode(&mut stream).unwrap(), Some(Value::Integer(2)));
/// ```
pub fn decode<R: BufRead>(reader: R) -> Result<Option<Value>, BencodeError> {
    Decoder::new(reader).decode_next()
}

/// A recursive-descent decoder over a buffered byte stream.
///
/// The decoder looks at most one byte ahead, so after each value the
/// underlying reader is positioned right after that value's last byte.
///
/// ```
/// use bdecode::bencode::{Decoder, Value};
///
/// let mut decoder = Decoder::new(&b"i1e3:twole"[..]);
/// assert_eq!(decoder.decode_next().unwrap(), Some(Value::Integer(1)));
/// assert_eq!(decoder.decode_next().unwrap(), Some(Value::string("two")));
/// assert_eq!(decoder.decode_next().unwrap(), Some(Value::List(vec![])));
/// assert_eq!(decoder.decode_next().unwrap(), None);
/// ```
#[derive(Debug)]
pub struct Decoder<R> {
    reader: R,
    max_depth: usize,
    strict: bool,
}

impl<R: BufRead> Decoder<R> {
    /// Creates a permissive decoder with the default depth limit.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            max_depth: DEFAULT_MAX_DEPTH,
            strict: false,
        }
    }

    /// Sets how many containers may enclose a value.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enables or disables canonical-form checks.
    ///
    /// A strict decoder rejects integers with leading zeros, `-0` or a `+`
    /// sign, string lengths with leading zeros or a `+` sign, and dictionaries
    /// whose keys are not strictly increasing.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Returns a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Returns the underlying reader, positioned after the last decoded value.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Decodes the next value, or returns `Ok(None)` at a clean end of input.
    pub fn decode_next(&mut self) -> Result<Option<Value>, BencodeError> {
        let first = self
            .peek()
            .map_err(|e| BencodeError::io(Stage::StructurePrefix, e))?;
        if first.is_none() {
            tracing::trace!("end of input, no value to decode");
            return Ok(None);
        }

        match self.decode_value(0) {
            Ok(value) => {
                tracing::trace!("decoded {}", value.kind());
                Ok(Some(value))
            }
            Err(e) => {
                tracing::debug!("bencode decode failed: {}", e);
                Err(e)
            }
        }
    }

    /// Checks that the input is exhausted and returns the reader.
    ///
    /// # Errors
    ///
    /// Returns [`BencodeError::TrailingData`] if any byte remains.
    pub fn finish(mut self) -> Result<R, BencodeError> {
        match self
            .peek()
            .map_err(|e| BencodeError::io(Stage::StructurePrefix, e))?
        {
            Some(_) => Err(BencodeError::TrailingData),
            None => Ok(self.reader),
        }
    }

    fn decode_value(&mut self, depth: usize) -> Result<Value, BencodeError> {
        if depth > self.max_depth {
            return Err(BencodeError::NestingTooDeep {
                limit: self.max_depth,
            });
        }

        let tag = self
            .peek()
            .map_err(|e| BencodeError::io(Stage::StructurePrefix, e))?
            .ok_or(BencodeError::UnexpectedEof {
                stage: Stage::StructurePrefix,
            })?;

        match tag {
            DICT_PREFIX => {
                self.reader.consume(1);
                self.decode_dict(depth).map(Value::Dict)
            }
            LIST_PREFIX => {
                self.reader.consume(1);
                self.decode_list(depth).map(Value::List)
            }
            INTEGER_PREFIX => {
                self.reader.consume(1);
                self.decode_integer().map(Value::Integer)
            }
            // Anything else should be the first digit of a length prefix and
            // stays in the buffer for the string rule.
            _ => self.decode_bytes().map(Value::Bytes),
        }
    }

    fn decode_bytes(&mut self) -> Result<Bytes, BencodeError> {
        let digits = self.read_through(LENGTH_DELIMITER, Stage::StringLength)?;
        if self.strict && !is_canonical_length(&digits) {
            return Err(non_canonical(Stage::StringLength, &digits));
        }

        let len: usize = parse_number(&digits, Stage::StringLength)?;
        if len == 0 {
            return Ok(Bytes::new());
        }

        let mut buf = Vec::with_capacity(len.min(STRING_PREALLOC_LIMIT));
        self.reader
            .by_ref()
            .take(len as u64)
            .read_to_end(&mut buf)
            .map_err(|e| BencodeError::io(Stage::StringValue, e))?;

        if buf.len() < len {
            return Err(BencodeError::ShortRead {
                expected: len,
                actual: buf.len(),
            });
        }

        Ok(Bytes::from(buf))
    }

    fn decode_integer(&mut self) -> Result<i64, BencodeError> {
        let digits = self.read_through(END_SUFFIX, Stage::IntegerValue)?;
        if self.strict && !is_canonical_integer(&digits) {
            return Err(non_canonical(Stage::IntegerValue, &digits));
        }

        parse_number(&digits, Stage::IntegerValue)
    }

    fn decode_list(&mut self, depth: usize) -> Result<Vec<Value>, BencodeError> {
        let mut list = Vec::new();

        while self.has_next_item(Stage::ListSuffix)? {
            list.push(self.decode_value(depth + 1)?);
        }

        Ok(list)
    }

    fn decode_dict(&mut self, depth: usize) -> Result<BTreeMap<Bytes, Value>, BencodeError> {
        let mut dict = BTreeMap::new();
        let mut last_key: Option<Bytes> = None;

        while self.has_next_item(Stage::DictSuffix)? {
            let key = match self
                .decode_value(depth + 1)
                .map_err(|e| e.within(Stage::DictKey))?
            {
                Value::Bytes(key) => key,
                other => {
                    return Err(BencodeError::NonStringKey {
                        found: other.kind(),
                    })
                }
            };

            if self.strict {
                if let Some(prev) = &last_key {
                    match key.cmp(prev) {
                        Ordering::Greater => {}
                        Ordering::Equal => return Err(BencodeError::DuplicateKey),
                        Ordering::Less => return Err(BencodeError::UnsortedKeys),
                    }
                }
                last_key = Some(key.clone());
            }

            let value = self
                .decode_value(depth + 1)
                .map_err(|e| e.within(Stage::DictVal))?;

            if dict.insert(key, value).is_some() {
                tracing::debug!("duplicate dict key, keeping the later value");
            }
        }

        Ok(dict)
    }

    /// Consumes a container's terminator if it is next.
    ///
    /// Returns `true` while another item precedes the terminator.
    fn has_next_item(&mut self, stage: Stage) -> Result<bool, BencodeError> {
        match self.peek().map_err(|e| BencodeError::io(stage, e))? {
            None => Err(BencodeError::UnexpectedEof { stage }),
            Some(END_SUFFIX) => {
                self.reader.consume(1);
                Ok(false)
            }
            Some(_) => Ok(true),
        }
    }

    /// Reads up to and including `delimiter`, returning the bytes before it.
    fn read_through(&mut self, delimiter: u8, stage: Stage) -> Result<Vec<u8>, BencodeError> {
        let mut buf = Vec::new();
        self.reader
            .read_until(delimiter, &mut buf)
            .map_err(|e| BencodeError::io(stage, e))?;

        match buf.pop() {
            Some(last) if last == delimiter => Ok(buf),
            _ => Err(BencodeError::UnexpectedEof { stage }),
        }
    }

    fn peek(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

fn parse_number<T: FromStr>(digits: &[u8], stage: Stage) -> Result<T, BencodeError> {
    std::str::from_utf8(digits)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| BencodeError::InvalidNumber {
            stage,
            text: String::from_utf8_lossy(digits).into_owned(),
        })
}

fn non_canonical(stage: Stage, digits: &[u8]) -> BencodeError {
    BencodeError::NonCanonical {
        stage,
        text: String::from_utf8_lossy(digits).into_owned(),
    }
}

fn is_canonical_length(digits: &[u8]) -> bool {
    !matches!(digits, [b'0', _, ..] | [b'+', ..])
}

// Malformed numbers are left for the parser to reject.
fn is_canonical_integer(digits: &[u8]) -> bool {
    let magnitude = digits.strip_prefix(b"-").unwrap_or(digits);
    match magnitude {
        [b'0'] => magnitude.len() == digits.len(),
        [b'0', ..] | [b'+', ..] => false,
        _ => true,
    }
}
