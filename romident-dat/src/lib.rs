//! Signature file parsing for the ROM identification catalog.
//!
//! Two grammars are supported: the line-oriented ClrMamePro-style DAT
//! (`dat`) and JSON signature exports (`hasheous`). Both produce
//! [`GameRecord`]s; `dedup` collapses them on content-derived keys.

pub mod dat;
pub mod dedup;
pub mod error;
pub mod hasheous;
pub mod parser;
pub mod platform;
pub mod record;

pub use dat::{DatFile, DatParser, parse_dat_file};
pub use dedup::{dedup_records, dedup_roms, merge_across_batches};
pub use error::DatError;
pub use hasheous::{GameData, RomDescriptor, parse_document};
pub use parser::{
    JsonParser, ParsedSource, SignatureFormat, SignatureParser, SourceHint, parse_signature_file,
    parser_for,
};
pub use platform::platform_from_filename;
pub use record::{GameRecord, GrammarProfile, RecordKey};
