//! bdecode - A bencode decoder
//!
//! Decodes the bencode format used by BitTorrent metadata into a dynamic
//! value tree, reading from any byte stream.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 Bencode decoding
//! - [`constants`] - Grammar markers and decoder defaults

pub mod bencode;
pub mod constants;

pub use bencode::{decode, BencodeError, Decoder, Stage, Value};
