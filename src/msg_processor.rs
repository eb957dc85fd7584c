/*!
 * Dialogue file handling and processing.
 *
 * This module models `.msg` dialogue files: one record per line in the form
 * `{id}{speaker}{text}`, where the trailing free-text field may itself contain
 * braces. Blank lines and comment lines are carried through untouched.
 */

use std::path::{Path, PathBuf};

/// A single parsed record line from a dialogue file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsgRecord {
    /// Leading identifier token (integer-like, but not necessarily numeric)
    pub id: String,

    /// Free-text payload, the content of the last brace pair on the line
    pub text: String,

    /// The full raw line as read from disk
    pub raw: String,
}

/// An ordered collection of dialogue lines sourced from one file
#[derive(Debug, Clone)]
pub struct MsgFile {
    /// Path of the source file
    pub source_file: PathBuf,

    /// Decoded file content
    pub content: String,
}

impl MsgFile {
    /// Create a collection from already-decoded content
    pub fn new<P: AsRef<Path>>(source_file: P, content: String) -> Self {
        Self {
            source_file: source_file.as_ref().to_path_buf(),
            content,
        }
    }

    /// Parse every well-formed record line into an [`MsgRecord`].
    ///
    /// Lines that do not start with `{` or that carry no extractable payload
    /// are skipped; they stay part of `content` but are not records.
    pub fn records(&self) -> Vec<MsgRecord> {
        self.content
            .lines()
            .filter_map(|line| {
                let id = leading_field(line)?;
                let text = last_payload(line)?;
                Some(MsgRecord {
                    id: id.to_string(),
                    text: text.to_string(),
                    raw: line.to_string(),
                })
            })
            .collect()
    }

    /// Extract the free-text payloads of this file, one per line
    pub fn extract_payloads(&self) -> String {
        extract_payloads(&self.content)
    }
}

/// The leading brace field of a line: the text between the first `{` and the
/// first `}`. Returns `None` when the line does not start with `{` or has no
/// closing brace.
pub fn leading_field(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('{')?;
    let close = rest.find('}')?;
    Some(&rest[..close])
}

/// The free-text payload of a line: the substring strictly between the
/// rightmost `{` and the first `}` following it.
///
/// Taking the rightmost open brace isolates the dialogue text and discards the
/// positional metadata fields, which must stay numeric and untranslated.
pub fn last_payload(line: &str) -> Option<&str> {
    let open = line.rfind('{')?;
    let rest = &line[open + 1..];
    let close = rest.find('}')?;
    Some(&rest[..close])
}

/// Pull the free-text payload out of every line of `text`.
///
/// Lines without a `{`...`}` pair are dropped entirely; the remaining payloads
/// are joined with newlines.
pub fn extract_payloads(text: &str) -> String {
    text.lines()
        .filter_map(last_payload)
        .collect::<Vec<_>>()
        .join("\n")
}
