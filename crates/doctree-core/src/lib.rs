//! # doctree-core
//!
//! Typed decoding and encoding between Rust values and a generic **document
//! tree** (the shape shared by JSON and property lists), without reflection.
//! Every type states how it reads itself from a [`Value`] by implementing
//! [`Decode`], and how it writes itself by implementing [`Encode`].
//!
//! ## Quick start
//!
//! ```rust
//! use doctree_core::{decode, encode, Decode, DecodeError, Decoder, Encode, Encoded, Encoder, Format};
//!
//! #[derive(Debug, PartialEq)]
//! struct Track {
//!     title: String,
//!     plays: u32,
//!     rating: Option<u8>,
//! }
//!
//! impl Decode for Track {
//!     fn decode(decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
//!         Ok(Track {
//!             title: decoder.decode("title")?,
//!             plays: decoder.decode("plays")?,
//!             rating: decoder.decode("rating")?,
//!         })
//!     }
//! }
//!
//! impl Encode for Track {
//!     fn encode(&self, encoder: &mut Encoder) -> Encoded {
//!         encoder.encode_field("title", &self.title);
//!         encoder.encode_field("plays", &self.plays);
//!         encoder.encode_field("rating", &self.rating);
//!         Encoded::Produced
//!     }
//! }
//!
//! // A malformed optional field is treated as absent.
//! let json = br#"{"title":"Intro","plays":12,"rating":"five"}"#;
//! let track: Track = decode(json, Format::Json).unwrap();
//! assert_eq!(track.rating, None);
//!
//! // Absent optionals are omitted, not written as null.
//! let bytes = encode(&track, Format::Json, false).unwrap();
//! assert_eq!(bytes, br#"{"title":"Intro","plays":12}"#);
//! ```
//!
//! ## Modules
//!
//! - [`value`]: the `Value` tree, lookups, mutation, and classification
//! - [`key_path`]: `Key`/`KeyPath` addressing and navigation
//! - [`decode`]: the `Decode` trait, `Decoder` handle, and built-in conformances
//! - [`encode`]: the `Encode` trait, `Encoder` handle, and built-in conformances
//! - [`describe`]: the pretty/compact description layout
//! - [`format`]: JSON and property-list adapters
//! - [`error`]: error types

pub mod decode;
pub mod describe;
pub mod encode;
pub mod error;
pub mod format;
pub mod key_path;
pub mod value;

pub use decode::{decode, decode_value, decode_value_with, decode_with, Decode, Decoder, Diagnostics};
pub use encode::{encode, encode_value, Encode, Encoded, Encoder};
pub use error::{DecodeError, Error, ParseFormatError, ParsePathError, Result, SetError};
pub use format::Format;
pub use key_path::{Key, KeyPath};
pub use value::{Map, Number, Value};
