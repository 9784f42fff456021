//! ClrMamePro-style DAT reader.
//!
//! Format:
//! ```text
//! clrmamepro (
//!     name "Nintendo - Game Boy"
//!     version 20240101-000000
//! )
//!
//! game (
//!     name "Tetris (World)"
//!     rom ( name Tetris.gb size 32768 crc 46DF91AD sha1 74591CC9501AF93873F9A5D3EB12DA12C0723BBC )
//! )
//! ```
//!
//! The text is split into tokens (`(`, `)`, quoted strings, bare words) and
//! every top-level `keyword ( ... )` entry is read into a tree, so nested
//! groups and clause order never confuse the extraction. Each `rom` clause of
//! a `game` block carrying the fields the active [`GrammarProfile`] needs
//! becomes one [`GameRecord`].

use std::iter::Peekable;
use std::path::Path;

use crate::error::DatError;
use crate::platform::platform_from_filename;
use crate::record::{GameRecord, GrammarProfile};

/// Groups nested deeper than this are treated as a broken file.
const MAX_DEPTH: usize = 64;

const SHA1_HEX_LEN: usize = 40;

/// A parsed DAT file.
#[derive(Debug, Clone, Default)]
pub struct DatFile {
    /// Header `name`, if a `clrmamepro ( ... )` block was present.
    pub name: String,
    pub description: String,
    pub version: String,
    pub records: Vec<GameRecord>,
    /// Game blocks that produced no record (missing name, filename or sha1).
    pub skipped: usize,
}

/// Reads the line-grammar DAT format under one [`GrammarProfile`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DatParser {
    profile: GrammarProfile,
}

impl DatParser {
    pub fn new(profile: GrammarProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> GrammarProfile {
        self.profile
    }

    /// Parse DAT text. `platform_hint` is usually derived from the file name;
    /// when it is empty the header `name` is used instead.
    ///
    /// A file that breaks off mid-block still returns the records read before
    /// the break. It is an error only when nothing usable was found.
    pub fn parse(&self, content: &[u8], platform_hint: &str) -> Result<DatFile, DatError> {
        let text = String::from_utf8_lossy(content);
        let mut tokens = Lexer::new(&text).peekable();

        let mut dat = DatFile::default();
        let mut entries: Vec<(String, String, String)> = Vec::new();
        let mut blocks_seen = 0usize;
        let mut broken: Option<DatError> = None;
        let mut resume: Option<&str> = None;

        loop {
            let keyword = match resume.take() {
                Some(word) => word,
                None => match tokens.next() {
                    None => break,
                    Some(Token::Bare(word)) => word,
                    Some(Token::Open) => {
                        // Anonymous group; read it to stay aligned.
                        match read_group(&mut tokens, 1) {
                            Ok(group) => resume = group.resume,
                            Err(e) => {
                                broken = Some(e);
                                break;
                            }
                        }
                        continue;
                    }
                    Some(Token::Close) | Some(Token::Quoted(_)) => continue,
                },
            };

            if tokens.peek() != Some(&Token::Open) {
                continue;
            }
            tokens.next();

            let group = match read_group(&mut tokens, 1) {
                Ok(group) => group,
                Err(e) => {
                    broken = Some(e);
                    break;
                }
            };

            if let Some(next) = group.resume {
                log::warn!(
                    "DAT '{}' block is missing its closing ')'; resuming at the next '{}' block",
                    keyword,
                    next
                );
                resume = Some(next);
                blocks_seen += 1;
                dat.skipped += 1;
                continue;
            }

            match keyword.to_ascii_lowercase().as_str() {
                "clrmamepro" => {
                    blocks_seen += 1;
                    read_header(&group.nodes, &mut dat);
                }
                "game" => {
                    blocks_seen += 1;
                    let before = entries.len();
                    self.read_game(&group.nodes, &mut entries);
                    if entries.len() == before {
                        dat.skipped += 1;
                    }
                }
                other => log::trace!("Ignoring DAT block '{}'", other),
            }
        }

        if let Some(err) = broken {
            if entries.is_empty() {
                return Err(err);
            }
            log::warn!(
                "DAT ends inside an unterminated block ({}); keeping {} records parsed before it",
                err,
                entries.len()
            );
        }

        if blocks_seen == 0 {
            return Err(DatError::invalid_dat("No header or game blocks found"));
        }

        let platform = if !platform_hint.trim().is_empty() {
            platform_hint.trim().to_string()
        } else if !dat.name.trim().is_empty() {
            dat.name.trim().to_string()
        } else {
            return Err(DatError::invalid_dat(
                "Cannot determine platform: no file name hint and no header name",
            ));
        };

        dat.records = entries
            .into_iter()
            .map(|(name, filename, hash)| GameRecord::new(name, filename, platform.as_str(), &hash))
            .collect();

        Ok(dat)
    }

    /// Collect `(name, filename, sha1)` for every usable `rom` clause in a game body.
    fn read_game(&self, body: &[Node<'_>], out: &mut Vec<(String, String, String)>) {
        let name = match value_after(body, "name") {
            Some(Node::Quoted(n)) if !n.trim().is_empty() => n.to_string(),
            _ => {
                log::debug!("Skipping game block without a quoted name");
                return;
            }
        };

        for rom in groups_after(body, "rom") {
            let filename = match self.profile {
                GrammarProfile::NameOnly => String::new(),
                GrammarProfile::Filename => match value_after(rom, "name") {
                    Some(Node::Bare(f)) => f.to_string(),
                    Some(Node::Quoted(f)) => {
                        // The filename token itself starts with a quote. Keep the
                        // record for hash identification, drop the filename.
                        log::debug!("Quoted ROM filename \"{}\" in '{}', storing empty filename", f, name);
                        String::new()
                    }
                    _ => {
                        log::debug!("Skipping ROM without a name in '{}'", name);
                        continue;
                    }
                },
            };

            let hash = match value_after(rom, "sha1").and_then(Node::text) {
                Some(h) if is_sha1_hex(h) => h.to_string(),
                _ => {
                    log::debug!("Skipping ROM without a valid sha1 in '{}'", name);
                    continue;
                }
            };

            out.push((name.clone(), filename, hash));
        }
    }
}

/// Parse a DAT file from disk, deriving the platform from its file name.
pub fn parse_dat_file(path: &Path, profile: GrammarProfile) -> Result<DatFile, DatError> {
    let content = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    DatParser::new(profile).parse(&content, &platform_from_filename(&file_name))
}

fn read_header(body: &[Node<'_>], dat: &mut DatFile) {
    if let Some(v) = value_after(body, "name").and_then(Node::text) {
        dat.name = v.to_string();
    }
    if let Some(v) = value_after(body, "description").and_then(Node::text) {
        dat.description = v.to_string();
    }
    if let Some(v) = value_after(body, "version").and_then(Node::text) {
        dat.version = v.to_string();
    }
}

fn is_sha1_hex(s: &str) -> bool {
    s.len() == SHA1_HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// The node following the first bare `key` at this level of a group.
fn value_after<'n, 'a>(body: &'n [Node<'a>], key: &str) -> Option<&'n Node<'a>> {
    body.windows(2)
        .find(|pair| matches!(pair[0], Node::Bare(k) if k.eq_ignore_ascii_case(key)))
        .map(|pair| &pair[1])
}

/// Every group introduced by a bare `key` at this level of a group.
fn groups_after<'n, 'a>(body: &'n [Node<'a>], key: &'n str) -> impl Iterator<Item = &'n [Node<'a>]> {
    body.windows(2).filter_map(move |pair| match (&pair[0], &pair[1]) {
        (Node::Bare(k), Node::Group(inner)) if k.eq_ignore_ascii_case(key) => Some(inner.as_slice()),
        _ => None,
    })
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node<'a> {
    Bare(&'a str),
    Quoted(&'a str),
    Group(Vec<Node<'a>>),
}

impl<'a> Node<'a> {
    fn text(&self) -> Option<&'a str> {
        match *self {
            Node::Bare(s) | Node::Quoted(s) => Some(s),
            Node::Group(_) => None,
        }
    }
}

/// Keywords that only ever open a top-level block.
const BLOCK_KEYWORDS: &[&str] = &["clrmamepro", "game", "machine", "resource"];

/// Contents of one group.
struct Group<'a> {
    nodes: Vec<Node<'a>>,
    /// Set when the group was cut short by a new top-level `keyword (`
    /// before its closing `)`. Parsing resumes at that keyword.
    resume: Option<&'a str>,
}

/// Read group contents up to the matching `)`. The opening `(` is already consumed.
fn read_group<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> Result<Group<'a>, DatError>
where
    I: Iterator<Item = Token<'a>>,
{
    if depth > MAX_DEPTH {
        return Err(DatError::parse(format!("groups nested deeper than {MAX_DEPTH}")));
    }

    let mut nodes = Vec::new();
    loop {
        match tokens.next() {
            None => return Err(DatError::parse("unexpected end of input inside a block")),
            Some(Token::Close) => return Ok(Group { nodes, resume: None }),
            Some(Token::Open) => {
                let inner = read_group(tokens, depth + 1)?;
                nodes.push(Node::Group(inner.nodes));
                if inner.resume.is_some() {
                    return Ok(Group {
                        nodes,
                        resume: inner.resume,
                    });
                }
            }
            Some(Token::Bare(s)) if is_block_keyword(s) && tokens.peek() == Some(&Token::Open) => {
                return Ok(Group {
                    nodes,
                    resume: Some(s),
                });
            }
            Some(Token::Bare(s)) => nodes.push(Node::Bare(s)),
            Some(Token::Quoted(s)) => nodes.push(Node::Quoted(s)),
        }
    }
}

fn is_block_keyword(word: &str) -> bool {
    BLOCK_KEYWORDS.iter().any(|k| word.eq_ignore_ascii_case(k))
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Open,
    Close,
    /// Quoted string without its quotes. Runs to end of input if unterminated.
    Quoted(&'a str),
    Bare(&'a str),
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        if self.pos >= bytes.len() {
            return None;
        }

        let start = self.pos;
        match bytes[start] {
            b'(' => {
                self.pos += 1;
                Some(Token::Open)
            }
            b')' => {
                self.pos += 1;
                Some(Token::Close)
            }
            b'"' => {
                let body_start = start + 1;
                match self.src[body_start..].find('"') {
                    Some(len) => {
                        self.pos = body_start + len + 1;
                        Some(Token::Quoted(&self.src[body_start..body_start + len]))
                    }
                    None => {
                        self.pos = bytes.len();
                        Some(Token::Quoted(&self.src[body_start..]))
                    }
                }
            }
            _ => {
                // Balanced parens stay inside a bare word (`game(1).bin`). A
                // `)` with no partner ends it, and so does a `(` left open.
                let mut depth = 0usize;
                let mut unclosed_at = None;
                while self.pos < bytes.len() {
                    match bytes[self.pos] {
                        b if b.is_ascii_whitespace() || b == b'"' => break,
                        b'(' => {
                            if depth == 0 {
                                unclosed_at = Some(self.pos);
                            }
                            depth += 1;
                        }
                        b')' => {
                            if depth == 0 {
                                break;
                            }
                            depth -= 1;
                            if depth == 0 {
                                unclosed_at = None;
                            }
                        }
                        _ => {}
                    }
                    self.pos += 1;
                }
                if let Some(at) = unclosed_at {
                    self.pos = at;
                }
                Some(Token::Bare(&self.src[start..self.pos]))
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/dat_tests.rs"]
mod tests;
