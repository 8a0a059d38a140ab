//! # NZB Reader
//!
//! Pull reader over an NZB manifest. Yields one [`NzbFile`] per closed
//! `<file>` element; each subject is parsed as soon as its attribute has
//! been read. Files are produced strictly in document order.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::iter::FusedIterator;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, trace, warn};

use super::file::{NzbFile, NzbMeta, Segment};
use super::names;
use super::stack::ElementStack;
use crate::error::{NzbError, Result};
use crate::subject::{SubjectParser, SubjectParserConfig, rolling_hash};

/// Configuration for the manifest reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NzbReaderConfig {
    /// Deepest element nesting accepted.
    pub max_depth: usize,
    /// Settings for every subject in the manifest.
    pub subject: SubjectParserConfig,
}

impl Default for NzbReaderConfig {
    fn default() -> Self {
        Self {
            max_depth: 32,
            subject: SubjectParserConfig::default(),
        }
    }
}

impl NzbReaderConfig {
    /// Create a new reader configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum element depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the subject parser configuration.
    pub fn with_subject(mut self, subject: SubjectParserConfig) -> Self {
        self.subject = subject;
        self
    }
}

/// Streaming NZB reader.
pub struct NzbReader<R> {
    reader: Reader<R>,
    subjects: SubjectParser,
    stack: ElementStack,
    pending: Option<NzbFile>,
    metadata: Vec<NzbMeta>,
    finished: bool,
}

impl NzbReader<BufReader<File>> {
    /// Opens the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns `NzbError::Io` if the file cannot be opened.
    pub fn from_path(path: impl AsRef<Path>, config: NzbReaderConfig) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file), config)
    }
}

impl<'a> NzbReader<&'a [u8]> {
    /// Reads a manifest held in memory.
    ///
    /// # Errors
    ///
    /// See [`NzbReader::new`].
    pub fn from_bytes(bytes: &'a [u8], config: NzbReaderConfig) -> Result<Self> {
        Self::new(bytes, config)
    }
}

impl<R: BufRead> NzbReader<R> {
    /// Wraps any buffered source.
    ///
    /// # Errors
    ///
    /// Returns `NzbError::RegexError` if the subject parser cannot be built.
    pub fn new(source: R, config: NzbReaderConfig) -> Result<Self> {
        let mut reader = Reader::from_reader(source);
        reader.config_mut().trim_text(true);

        Ok(Self {
            reader,
            subjects: SubjectParser::new(config.subject)?,
            stack: ElementStack::new(config.max_depth),
            pending: None,
            metadata: Vec::new(),
            finished: false,
        })
    }

    /// `<head>` metadata seen so far. Complete once the first file has
    /// been read, since `<head>` precedes every `<file>`.
    pub fn metadata(&self) -> &[NzbMeta] {
        &self.metadata
    }

    /// Reads up to the end of the next `<file>` element.
    ///
    /// Returns `Ok(None)` at the end of the manifest.
    ///
    /// # Errors
    ///
    /// Returns `NzbError::Xml` for malformed XML, and the element stack
    /// errors for nesting that is too deep or unbalanced.
    pub fn next_file(&mut self) -> Result<Option<NzbFile>> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let event = match self.reader.read_event_into(&mut buf) {
                Ok(event) => event,
                Err(err) => return Err(self.xml_error(err)),
            };

            match event {
                Event::Start(element) => self.open_element(&element)?,
                Event::Empty(element) => {
                    self.open_element(&element)?;
                    if let Some(file) = self.close_element(element.local_name().as_ref())? {
                        return Ok(Some(file));
                    }
                }
                Event::End(element) => {
                    if let Some(file) = self.close_element(element.local_name().as_ref())? {
                        return Ok(Some(file));
                    }
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(|err| self.xml_error(err))?;
                    self.stack.append_text(&text);
                }
                Event::CData(data) => {
                    let data = data.into_inner();
                    self.stack.append_text(&String::from_utf8_lossy(&data));
                }
                Event::Eof => {
                    if !self.stack.is_empty() {
                        warn!(
                            depth = self.stack.depth(),
                            "manifest ended with elements still open"
                        );
                    }
                    return Ok(None);
                }
                _ => {}
            }
        }
    }

    fn open_element(&mut self, element: &BytesStart<'_>) -> Result<()> {
        let name = rolling_hash(element.local_name().as_ref());
        self.stack.push(name)?;
        trace!(
            element = names::describe(name).unwrap_or("?"),
            depth = self.stack.depth(),
            "open"
        );

        let mut file = (name == names::FILE).then(NzbFile::default);
        for attribute in element.attributes() {
            let attribute = attribute.map_err(|err| self.xml_error(err.into()))?;
            let raw_key = attribute.key.local_name();
            let key = rolling_hash(raw_key.as_ref());
            let value = attribute
                .unescape_value()
                .map_err(|err| self.xml_error(err))?
                .into_owned();

            if let Some(file) = file.as_mut() {
                match key {
                    names::SUBJECT => file.subject = Some(self.subjects.parse(&value)),
                    names::POSTER => file.poster = Some(value.clone()),
                    names::DATE => file.date = value.trim().parse().ok(),
                    _ => {}
                }
            }
            self.stack.add_attribute(raw_key.as_ref(), key, value)?;
        }

        if let Some(file) = file {
            if self.pending.replace(file).is_some() {
                warn!("nested <file> element; the outer entry is discarded");
            }
        }
        Ok(())
    }

    fn close_element(&mut self, raw_name: &[u8]) -> Result<Option<NzbFile>> {
        let element = self.stack.pop(raw_name)?;

        match element.name {
            names::GROUP => {
                if let Some(file) = self.pending.as_mut() {
                    file.groups.push(element.contents.trim().to_owned());
                }
            }
            names::SEGMENT => {
                if let Some(file) = self.pending.as_mut() {
                    file.segments.push(Segment::from_element(element));
                }
            }
            names::META => {
                let kind = element.attribute(names::TYPE).map(str::to_owned);
                self.metadata.push(NzbMeta {
                    kind,
                    value: element.contents,
                });
            }
            names::FILE => {
                if let Some(file) = self.pending.take() {
                    debug!(
                        segments = file.segments.len(),
                        matched = file.subject.as_ref().is_some_and(|s| s.is_matched()),
                        "file entry read"
                    );
                    return Ok(Some(file));
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn xml_error(&self, source: quick_xml::Error) -> NzbError {
        NzbError::Xml {
            position: self.reader.buffer_position() as u64,
            source,
        }
    }
}

impl<R: BufRead> Iterator for NzbReader<R> {
    type Item = Result<NzbFile>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_file() {
            Ok(Some(file)) => Some(Ok(file)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

impl<R: BufRead> FusedIterator for NzbReader<R> {}
