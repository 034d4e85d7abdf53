// src/morse/mod.rs  |  Tables, kana folding, encode/decode
pub mod data;
pub mod error;
pub mod kana;
pub mod lookup;
pub mod mode;
pub mod table;

pub use data::MorseData;
pub use error::{MorseError, UnknownSymbol};
pub use lookup::{Fallback, MorseLookup, DEFAULT_PLACEHOLDER, WORD_GAP};
pub use mode::Mode;
pub use table::MorseTable;
