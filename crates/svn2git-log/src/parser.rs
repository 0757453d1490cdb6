// Copyright (c) 2026 - present svn2git contributors
// SPDX-License-Identifier: MIT

//! Subversion XML log parsing
//!
//! This module reads the document printed by `svn log --xml`:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <log>
//! <logentry revision="2">
//! <author>jdoe</author>
//! <date>2015-02-05T16:12:08.123456Z</date>
//! <msg>Fix parser</msg>
//! </logentry>
//! </log>
//! ```
//!
//! Entries are returned in document order. Elements other than `author`,
//! `date` and `msg` (such as `paths` from `svn log -v`) are skipped.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use crate::authors::{AuthorMap, DEFAULT_DOMAIN};
use crate::error::LogError;
use crate::revision::{Revision, RevisionSequence};

const LOG: &[u8] = b"log";
const LOGENTRY: &[u8] = b"logentry";
const AUTHOR: &[u8] = b"author";
const DATE: &[u8] = b"date";
const MSG: &[u8] = b"msg";

/// Parser for `svn log --xml` documents
#[derive(Debug, Clone)]
pub struct LogParser {
    authors: AuthorMap,
    default_domain: String,
}

impl Default for LogParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LogParser {
    /// Create a parser with no author mappings and the default mail domain
    #[must_use]
    pub fn new() -> Self {
        Self {
            authors: AuthorMap::new(),
            default_domain: DEFAULT_DOMAIN.to_string(),
        }
    }

    /// Remap authors through the given table
    #[must_use]
    pub fn with_authors(mut self, authors: AuthorMap) -> Self {
        self.authors = authors;
        self
    }

    /// Set the mail domain used for unmapped authors
    #[must_use]
    pub fn with_default_domain(mut self, domain: impl Into<String>) -> Self {
        self.default_domain = domain.into();
        self
    }

    /// Get the author table
    #[must_use]
    pub fn authors(&self) -> &AuthorMap {
        &self.authors
    }

    /// Parse a log file
    ///
    /// # Errors
    ///
    /// Returns `LogError::FileNotFound` if the file does not exist, otherwise
    /// the same errors as [`LogParser::parse_str`].
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<RevisionSequence, LogError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LogError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let xml = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), bytes = xml.len(), "Read log file");
        self.parse_str(&xml)
    }

    /// Parse a log document held in memory
    ///
    /// # Errors
    ///
    /// Returns `LogError::Xml` for malformed XML, `LogError::InvalidDocument`
    /// when there is no `<log>` root or the document is truncated, and
    /// `LogError::MissingRevision`, `LogError::InvalidRevision` or
    /// `LogError::MissingField` for incomplete entries.
    pub fn parse_str(&self, xml: &str) -> Result<RevisionSequence, LogError> {
        let mut reader = Reader::from_str(xml);

        let mut seen_log = false;
        let mut log_closed = false;
        let mut entry: Option<EntryBuilder> = None;
        let mut field: Option<(Field, String)> = None;
        let mut revisions = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.name().as_ref() {
                    LOG => seen_log = true,
                    LOGENTRY => entry = Some(EntryBuilder::new(revision_attribute(&e)?)),
                    name => {
                        if entry.is_some() && field.is_none() {
                            field = Field::from_name(name).map(|f| (f, String::new()));
                        }
                    }
                },
                Event::Empty(e) => match e.name().as_ref() {
                    LOG => {
                        seen_log = true;
                        log_closed = true;
                    }
                    LOGENTRY => {
                        let builder = EntryBuilder::new(revision_attribute(&e)?);
                        revisions.push(self.build(builder)?);
                    }
                    name => {
                        if let (Some(builder), None) = (entry.as_mut(), field.as_ref()) {
                            if let Some(f) = Field::from_name(name) {
                                builder.set(f, String::new());
                            }
                        }
                    }
                },
                Event::Text(t) => {
                    if let Some((_, buf)) = field.as_mut() {
                        buf.push_str(&t.unescape()?);
                    }
                }
                Event::CData(c) => {
                    if let Some((_, buf)) = field.as_mut() {
                        buf.push_str(&String::from_utf8_lossy(&c.into_inner()));
                    }
                }
                Event::End(e) => match e.name().as_ref() {
                    LOG => log_closed = true,
                    LOGENTRY => {
                        if let Some(builder) = entry.take() {
                            revisions.push(self.build(builder)?);
                        }
                    }
                    name => {
                        if let Some((f, buf)) = field.take() {
                            if f.name() == name {
                                if let Some(builder) = entry.as_mut() {
                                    builder.set(f, buf);
                                }
                            } else {
                                field = Some((f, buf));
                            }
                        }
                    }
                },
                Event::Eof => break,
                _ => {}
            }
        }

        if !seen_log {
            return Err(LogError::InvalidDocument {
                reason: "missing <log> root element",
            });
        }
        if entry.is_some() || !log_closed {
            return Err(LogError::InvalidDocument {
                reason: "document ends before </log>",
            });
        }

        debug!(revisions = revisions.len(), "Parsed svn log");
        Ok(RevisionSequence::new(revisions))
    }

    fn build(&self, builder: EntryBuilder) -> Result<Revision, LogError> {
        let revision = builder.revision;
        let missing = |field: Field| LogError::MissingField {
            revision,
            field: field.label(),
        };

        let author = builder.author.ok_or_else(|| missing(Field::Author))?;
        let date = builder.date.ok_or_else(|| missing(Field::Date))?;
        let message = builder.message.ok_or_else(|| missing(Field::Message))?;

        Ok(Revision {
            revision,
            author: self.authors.resolve(&author, &self.default_domain),
            date,
            message,
        })
    }
}

/// Child elements of a `logentry` that make up a revision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Author,
    Date,
    Message,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            AUTHOR => Some(Self::Author),
            DATE => Some(Self::Date),
            MSG => Some(Self::Message),
            _ => None,
        }
    }

    fn name(self) -> &'static [u8] {
        match self {
            Self::Author => AUTHOR,
            Self::Date => DATE,
            Self::Message => MSG,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Date => "date",
            Self::Message => "msg",
        }
    }
}

#[derive(Debug)]
struct EntryBuilder {
    revision: u64,
    author: Option<String>,
    date: Option<String>,
    message: Option<String>,
}

impl EntryBuilder {
    fn new(revision: u64) -> Self {
        Self {
            revision,
            author: None,
            date: None,
            message: None,
        }
    }

    fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Author => self.author = Some(value),
            Field::Date => self.date = Some(value),
            Field::Message => self.message = Some(value),
        }
    }
}

fn revision_attribute(e: &BytesStart<'_>) -> Result<u64, LogError> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() == b"revision" {
            let value = attr.unescape_value()?;
            return value
                .trim()
                .parse()
                .map_err(|_| LogError::InvalidRevision {
                    value: value.into_owned(),
                });
        }
    }
    Err(LogError::MissingRevision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    const SAMPLE_LOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<log>
<logentry
   revision="3">
<author>jdoe</author>
<date>2015-02-05T16:12:08.123456Z</date>
<msg>Third &amp; last</msg>
</logentry>
<logentry
   revision="2">
<author>asmith</author>
<date>2015-02-04T10:00:00.000000Z</date>
<msg></msg>
</logentry>
</log>
"#;

    #[test]
    fn test_parse_sample_log() {
        let seq = LogParser::new().parse_str(SAMPLE_LOG).expect("parse");
        assert_eq!(seq.len(), 2);

        let first = &seq.as_slice()[0];
        assert_eq!(first.revision, 3);
        assert_eq!(first.author, "jdoe <jdoe@slct.pl>");
        assert_eq!(first.date, "2015-02-05T16:12:08.123456Z");
        assert_eq!(first.message, "Third & last");

        let second = &seq.as_slice()[1];
        assert_eq!(second.revision, 2);
        assert_eq!(second.message, "");
    }

    #[test]
    fn test_parse_keeps_document_order() {
        let seq = LogParser::new().parse_str(SAMPLE_LOG).expect("parse");
        let numbers: Vec<u64> = seq.iter().map(|r| r.revision).collect();
        assert_eq!(numbers, vec![3, 2]);
        assert!(!seq.is_chronological());
    }

    #[test]
    fn test_parse_with_author_map() {
        let authors: AuthorMap = [("jdoe", "Jane Doe <jane@x.com>")].into_iter().collect();
        let seq = LogParser::new()
            .with_authors(authors)
            .parse_str(SAMPLE_LOG)
            .expect("parse");
        assert_eq!(seq.as_slice()[0].author, "Jane Doe <jane@x.com>");
        assert_eq!(seq.as_slice()[1].author, "asmith <asmith@slct.pl>");
    }

    #[test]
    fn test_parse_with_default_domain() {
        let seq = LogParser::new()
            .with_default_domain("example.org")
            .parse_str(SAMPLE_LOG)
            .expect("parse");
        assert_eq!(seq.as_slice()[0].author, "jdoe <jdoe@example.org>");
    }

    #[test]
    fn test_parse_empty_msg_element() {
        let xml = r#"<log><logentry revision="1"><author>a</author><date>d</date><msg/></logentry></log>"#;
        let seq = LogParser::new().parse_str(xml).expect("parse");
        assert_eq!(seq.as_slice()[0].message, "");
    }

    #[test]
    fn test_parse_multiline_message_verbatim() {
        let xml = "<log><logentry revision=\"1\"><author>a</author><date>d</date><msg>  line one\n\n  line two\n</msg></logentry></log>";
        let seq = LogParser::new().parse_str(xml).expect("parse");
        assert_eq!(seq.as_slice()[0].message, "  line one\n\n  line two\n");
    }

    #[test]
    fn test_parse_cdata_message() {
        let xml = "<log><logentry revision=\"1\"><author>a</author><date>d</date><msg><![CDATA[<b>bold</b>]]></msg></logentry></log>";
        let seq = LogParser::new().parse_str(xml).expect("parse");
        assert_eq!(seq.as_slice()[0].message, "<b>bold</b>");
    }

    #[test]
    fn test_parse_ignores_paths() {
        let xml = r#"<log>
<logentry revision="5">
<author>jdoe</author>
<date>d</date>
<paths>
<path action="M" kind="file">/trunk/author</path>
</paths>
<msg>m</msg>
</logentry>
</log>"#;
        let seq = LogParser::new().parse_str(xml).expect("parse");
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.as_slice()[0].author, "jdoe <jdoe@slct.pl>");
        assert_eq!(seq.as_slice()[0].message, "m");
    }

    #[test]
    fn test_parse_empty_log() {
        let seq = LogParser::new().parse_str("<log></log>").expect("parse");
        assert!(seq.is_empty());
        let seq = LogParser::new().parse_str("<log/>").expect("parse");
        assert!(seq.is_empty());
    }

    #[test]
    fn test_parse_missing_author() {
        let xml = r#"<log><logentry revision="9"><date>d</date><msg>m</msg></logentry></log>"#;
        match LogParser::new().parse_str(xml) {
            Err(LogError::MissingField { revision, field }) => {
                assert_eq!(revision, 9);
                assert_eq!(field, "author");
            }
            other => panic!("Expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_missing_msg() {
        let xml = r#"<log><logentry revision="4"><author>a</author><date>d</date></logentry></log>"#;
        assert!(matches!(
            LogParser::new().parse_str(xml),
            Err(LogError::MissingField { field: "msg", .. })
        ));
    }

    #[test]
    fn test_parse_empty_logentry() {
        let xml = r#"<log><logentry revision="4"/></log>"#;
        assert!(matches!(
            LogParser::new().parse_str(xml),
            Err(LogError::MissingField { revision: 4, .. })
        ));
    }

    #[test]
    fn test_parse_missing_revision_attribute() {
        let xml = r#"<log><logentry><author>a</author><date>d</date><msg>m</msg></logentry></log>"#;
        assert!(matches!(
            LogParser::new().parse_str(xml),
            Err(LogError::MissingRevision)
        ));
    }

    #[test]
    fn test_parse_non_numeric_revision() {
        let xml = r#"<log><logentry revision="abc"><author>a</author><date>d</date><msg>m</msg></logentry></log>"#;
        match LogParser::new().parse_str(xml) {
            Err(LogError::InvalidRevision { value }) => assert_eq!(value, "abc"),
            other => panic!("Expected InvalidRevision, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_not_a_log() {
        assert!(matches!(
            LogParser::new().parse_str("just some text"),
            Err(LogError::InvalidDocument { .. })
        ));
    }

    #[test]
    fn test_parse_truncated_document() {
        let xml = r#"<log><logentry revision="1"><author>a</author>"#;
        assert!(LogParser::new().parse_str(xml).is_err());
    }

    #[test]
    fn test_parse_mismatched_tags() {
        let xml = r#"<log><logentry revision="1"></log>"#;
        assert!(matches!(
            LogParser::new().parse_str(xml),
            Err(LogError::Xml(_))
        ));
    }

    #[test]
    fn test_parse_file_missing() {
        let result = LogParser::new().parse_file("/nonexistent/log-12345.xml");
        assert!(matches!(result, Err(LogError::FileNotFound { .. })));
    }
}
