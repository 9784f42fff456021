//! Structured JSON signature exports (one title per document).
//!
//! ```json
//! {
//!   "Id": 1234,
//!   "Name": "Tetris",
//!   "SignatureDataObjects": [ { "Name": "Tetris (World)", "Year": "1989", "Platform": "Nintendo Game Boy" } ],
//!   "Attributes": [
//!     { "attributeName": "ROMs", "Value": [ { "Name": "Tetris (World).gb", "Size": 32768, "Crc": "46df91ad", "Sha1": "..." } ] }
//!   ]
//! }
//! ```
//!
//! The `ROMs` attribute value is either an array of ROM objects or a single
//! ROM object. Both shapes are resolved by [`RomsValue`] while deserializing.

use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::dedup::dedup_roms;
use crate::error::DatError;
use crate::platform::{file_stem, platform_from_filename};
use crate::record::GameRecord;

const ROMS_ATTRIBUTE: &str = "ROMs";

/// One ROM of a title, with every digest the export declared.
///
/// Digests are lowercase hex; a missing digest is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RomDescriptor {
    pub name: String,
    pub size: i64,
    pub crc: String,
    pub md5: String,
    pub sha1: String,
    pub sha256: String,
}

impl RomDescriptor {
    pub fn has_digest(&self) -> bool {
        !(self.crc.is_empty() && self.md5.is_empty() && self.sha1.is_empty() && self.sha256.is_empty())
    }
}

/// A title on one platform together with its ROM set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameData {
    pub name: String,
    /// Source document name without extension.
    pub filename: String,
    pub platform: String,
    pub roms: Vec<RomDescriptor>,
}

impl GameData {
    /// One record per ROM, keyed on the ROM's SHA-1 (empty if it had none).
    pub fn records(&self) -> impl Iterator<Item = GameRecord> + '_ {
        self.roms
            .iter()
            .map(|rom| GameRecord::new(self.name.as_str(), self.filename.as_str(), self.platform.as_str(), &rom.sha1))
    }
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

// Exports are PascalCase with a camelCase `attributeName`; other casings of
// the same keys turn up in hand-edited documents and are accepted too.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SignatureDocument {
    #[serde(alias = "name", default, deserialize_with = "lenient_string")]
    name: String,
    #[serde(alias = "signatureDataObjects", alias = "signaturedataobjects", default)]
    signature_data_objects: Vec<SignatureDescriptor>,
    #[serde(alias = "attributes", default)]
    attributes: Vec<Attribute>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SignatureDescriptor {
    #[serde(alias = "platform", default, deserialize_with = "lenient_string")]
    platform: String,
}

#[derive(Debug, Deserialize)]
struct Attribute {
    #[serde(
        rename = "attributeName",
        alias = "AttributeName",
        alias = "attributename",
        default,
        deserialize_with = "lenient_string"
    )]
    attribute_name: String,
    #[serde(rename = "Value", alias = "value", default)]
    value: Option<RomsValue>,
}

/// The `Value` of an attribute: a list of ROMs, a single ROM, or anything else.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RomsValue {
    Many(Vec<RomItem>),
    One(RawRom),
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RomItem {
    Rom(RawRom),
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawRom {
    #[serde(alias = "name", default, deserialize_with = "lenient_string")]
    name: String,
    #[serde(alias = "size", default, deserialize_with = "lenient_size")]
    size: i64,
    #[serde(alias = "crc", default, deserialize_with = "lenient_string")]
    crc: String,
    #[serde(alias = "md5", default, deserialize_with = "lenient_string")]
    md5: String,
    #[serde(alias = "sha1", default, deserialize_with = "lenient_string")]
    sha1: String,
    #[serde(alias = "sha256", default, deserialize_with = "lenient_string")]
    sha256: String,
}

impl From<RawRom> for RomDescriptor {
    fn from(raw: RawRom) -> Self {
        Self {
            name: raw.name,
            size: raw.size,
            crc: raw.crc.trim().to_ascii_lowercase(),
            md5: raw.md5.trim().to_ascii_lowercase(),
            sha1: raw.sha1.trim().to_ascii_lowercase(),
            sha256: raw.sha256.trim().to_ascii_lowercase(),
        }
    }
}

/// Strings pass through; any other JSON value reads as absent.
fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Numbers are truncated to an integer; any other JSON value reads as 0.
fn lenient_size<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        _ => 0,
    })
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Parse one JSON signature document.
///
/// `document_name` is the document's file name; its stem becomes the
/// `filename` of every game. When the descriptors name more than one distinct
/// platform, the same ROM set is returned once per platform, in order of first
/// appearance.
pub fn parse_document(content: &[u8], document_name: &str) -> Result<Vec<GameData>, DatError> {
    let doc: SignatureDocument = serde_json::from_slice(content)?;

    if doc.name.trim().is_empty() {
        return Err(DatError::invalid_dat(format!("{document_name}: document has no title")));
    }

    let mut roms = Vec::new();
    for attr in doc.attributes {
        if attr.attribute_name != ROMS_ATTRIBUTE {
            continue;
        }
        match attr.value {
            Some(RomsValue::Many(items)) => {
                roms.extend(items.into_iter().filter_map(|item| match item {
                    RomItem::Rom(raw) => Some(RomDescriptor::from(raw)),
                    RomItem::Other(v) => {
                        log::debug!("{}: skipping non-ROM entry: {}", document_name, v);
                        None
                    }
                }));
            }
            Some(RomsValue::One(raw)) => roms.push(RomDescriptor::from(raw)),
            Some(RomsValue::Other(v)) => {
                log::debug!("{}: ignoring ROMs attribute of unexpected shape: {}", document_name, v);
            }
            None => {}
        }
    }
    roms.retain(RomDescriptor::has_digest);
    let roms = dedup_roms(roms);

    let mut platforms: Vec<&str> = Vec::new();
    for sig in &doc.signature_data_objects {
        let p = sig.platform.trim();
        if !p.is_empty() && !platforms.contains(&p) {
            platforms.push(p);
        }
    }

    let path = Path::new(document_name);
    let game = GameData {
        name: doc.name.clone(),
        filename: file_stem(path),
        platform: String::new(),
        roms,
    };

    if platforms.is_empty() {
        let fallback = platform_from_filename(document_name);
        if fallback.is_empty() {
            return Err(DatError::invalid_dat(format!(
                "{document_name}: no platform in signature descriptors or file name"
            )));
        }
        return Ok(vec![GameData { platform: fallback, ..game }]);
    }

    Ok(platforms
        .into_iter()
        .map(|p| GameData {
            platform: p.to_string(),
            ..game.clone()
        })
        .collect())
}

#[cfg(test)]
#[path = "tests/hasheous_tests.rs"]
mod tests;
