//! morse-kana: Latin / Wabun Morse lookup
//!
//! `MorseLookup::builtin()` is the usual entry point:
//!
//! ```
//! use morse_kana::{MorseLookup, Mode};
//!
//! let l = MorseLookup::builtin();
//! assert_eq!(l.encode_to_string("SOS", Mode::En), "... --- ...");
//! assert_eq!(l.decode_str(".-.. ..", Mode::Ja), "ガ");
//! ```
pub mod morse;

pub use morse::{Fallback, Mode, MorseData, MorseError, MorseLookup, MorseTable, UnknownSymbol};
