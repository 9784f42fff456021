//! The extraction contract shared by both signature grammars.

use std::path::Path;

use crate::dat::{DatFile, DatParser};
use crate::error::DatError;
use crate::hasheous::{self, GameData};
use crate::platform::platform_from_filename;
use crate::record::{GameRecord, GrammarProfile};

/// Which grammar a signature file is written in, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureFormat {
    Dat,
    Json,
}

impl SignatureFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "dat" => Some(SignatureFormat::Dat),
            "json" => Some(SignatureFormat::Json),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SignatureFormat::Dat => "dat",
            SignatureFormat::Json => "json",
        }
    }
}

/// What a parser knows about the file it is reading.
#[derive(Debug, Clone)]
pub struct SourceHint {
    /// File name of the source, extension included.
    pub document_name: String,
    /// Platform derived from the file name; may be empty.
    pub platform: String,
}

impl SourceHint {
    pub fn from_path(path: &Path) -> Self {
        let document_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let platform = platform_from_filename(&document_name);
        Self {
            document_name,
            platform,
        }
    }
}

/// Output of one source file, in the shape its grammar produces.
#[derive(Debug, Clone)]
pub enum ParsedSource {
    /// Flat records from the line grammar.
    Dat(DatFile),
    /// Games with full ROM sets from the JSON grammar.
    Games(Vec<GameData>),
}

impl ParsedSource {
    pub fn into_records(self) -> Vec<GameRecord> {
        match self {
            ParsedSource::Dat(dat) => dat.records,
            ParsedSource::Games(games) => games.iter().flat_map(|g| g.records()).collect(),
        }
    }
}

/// A signature grammar.
pub trait SignatureParser {
    fn format(&self) -> SignatureFormat;

    /// Extract everything the grammar carries from raw file bytes.
    fn parse_source(&self, content: &[u8], hint: &SourceHint) -> Result<ParsedSource, DatError>;

    /// Extract records only.
    fn parse_records(&self, content: &[u8], hint: &SourceHint) -> Result<Vec<GameRecord>, DatError> {
        self.parse_source(content, hint).map(ParsedSource::into_records)
    }
}

impl SignatureParser for DatParser {
    fn format(&self) -> SignatureFormat {
        SignatureFormat::Dat
    }

    fn parse_source(&self, content: &[u8], hint: &SourceHint) -> Result<ParsedSource, DatError> {
        self.parse(content, &hint.platform).map(ParsedSource::Dat)
    }
}

/// The JSON signature grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl SignatureParser for JsonParser {
    fn format(&self) -> SignatureFormat {
        SignatureFormat::Json
    }

    fn parse_source(&self, content: &[u8], hint: &SourceHint) -> Result<ParsedSource, DatError> {
        hasheous::parse_document(content, &hint.document_name).map(ParsedSource::Games)
    }
}

/// The parser for `format`. `profile` only affects the DAT grammar.
pub fn parser_for(format: SignatureFormat, profile: GrammarProfile) -> Box<dyn SignatureParser> {
    match format {
        SignatureFormat::Dat => Box::new(DatParser::new(profile)),
        SignatureFormat::Json => Box::new(JsonParser),
    }
}

/// Read and parse a signature file, picking the grammar from its extension.
pub fn parse_signature_file(path: &Path, profile: GrammarProfile) -> Result<ParsedSource, DatError> {
    let format = SignatureFormat::from_path(path)
        .ok_or_else(|| DatError::unsupported(path.display().to_string()))?;
    let content = std::fs::read(path)?;
    parser_for(format, profile).parse_source(&content, &SourceHint::from_path(path))
}
