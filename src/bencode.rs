//! Bencode decoding ([BEP-3]).
//!
//! Bencode is the length-prefixed format BitTorrent uses for `.torrent`
//! files, tracker responses and DHT messages. This module turns a byte stream
//! into a [`Value`] tree without interpreting what the tree means.
//!
//! # Data Types
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! # Examples
//!
//! ```
//! use bdecode::bencode::{decode, Value};
//!
//! let value = decode(&b"d3:keyl1:a1:bee"[..]).unwrap().unwrap();
//! let list = value.get(b"key").and_then(|v| v.as_list()).unwrap();
//! assert_eq!(list, &[Value::string("a"), Value::string("b")]);
//! ```
//!
//! Reading from a file or socket works the same way, since [`decode`]
//! accepts any [`std::io::BufRead`]:
//!
//! ```no_run
//! use std::io::BufReader;
//!
//! use bdecode::bencode::decode;
//!
//! let file = std::fs::File::open("example.torrent").unwrap();
//! let torrent = decode(BufReader::new(file)).unwrap();
//! ```
//!
//! # Permissive and strict decoding
//!
//! By default the decoder accepts anything the grammar can make sense of:
//! leading zeros in numbers, `i-0e`, unsorted dictionary keys. When a key
//! repeats, the later value wins. [`Decoder::with_strict`] turns these into
//! errors instead:
//!
//! ```
//! use bdecode::bencode::{BencodeError, Decoder};
//!
//! let lenient = Decoder::new(&b"d1:ai1e1:ai2ee"[..]).decode_next().unwrap().unwrap();
//! assert_eq!(lenient.get(b"a").and_then(|v| v.as_integer()), Some(2));
//!
//! let err = Decoder::new(&b"d1:ai1e1:ai2ee"[..])
//!     .with_strict(true)
//!     .decode_next()
//!     .unwrap_err();
//! assert!(matches!(err, BencodeError::DuplicateKey));
//! ```
//!
//! # Error Handling
//!
//! Every [`BencodeError`] reports malformed input. [`BencodeError::stage`]
//! names the grammar rule that failed:
//!
//! - [`BencodeError::UnexpectedEof`] - Input ended inside a value
//! - [`BencodeError::ShortRead`] - A byte string is shorter than its length prefix
//! - [`BencodeError::InvalidNumber`] - A length or integer is not a number
//! - [`BencodeError::NonStringKey`] - A dictionary key is not a byte string
//! - [`BencodeError::NestingTooDeep`] - Recursion limit exceeded (64 levels by default)
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod error;
mod value;

pub use decode::{decode, Decoder};
pub use error::{BencodeError, Stage};
pub use value::Value;
