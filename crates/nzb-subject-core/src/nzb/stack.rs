//! Bounded element stack.
//!
//! Frames live in one vector and their attributes in a second one; a frame
//! records where its attributes start, so popping a frame drains exactly
//! the attributes it owns. Both vectors are reserved up front and depth is
//! capped, which turns runaway nesting into an error instead of growth.

use crate::error::{NzbError, Result};

/// Attribute slots reserved per level of depth.
const ATTRIBUTES_PER_FRAME: usize = 4;

/// One attribute of an open element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Rolling hash of the attribute's local name.
    pub name: u64,
    /// Unescaped value.
    pub value: String,
}

#[derive(Debug)]
struct Frame {
    name: u64,
    first_attribute: usize,
    contents: String,
}

/// An element taken off the stack by its closing tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedElement {
    /// Rolling hash of the element's local name.
    pub name: u64,
    /// Attributes in document order.
    pub attributes: Vec<Attribute>,
    /// Text content, concatenated across chunks.
    pub contents: String,
}

impl ClosedElement {
    /// Value of the first attribute with the given name hash.
    #[must_use]
    pub fn attribute(&self, name: u64) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }
}

/// Arena-backed stack of open elements.
#[derive(Debug)]
pub struct ElementStack {
    frames: Vec<Frame>,
    attributes: Vec<Attribute>,
    max_depth: usize,
}

impl ElementStack {
    /// Creates a stack that holds at most `max_depth` open elements.
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self {
            frames: Vec::with_capacity(max_depth),
            attributes: Vec::with_capacity(max_depth * ATTRIBUTES_PER_FRAME),
            max_depth,
        }
    }

    /// Number of open elements.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` when no element is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Name hash of the innermost open element.
    #[must_use]
    pub fn top(&self) -> Option<u64> {
        self.frames.last().map(|frame| frame.name)
    }

    /// Opens an element.
    ///
    /// # Errors
    ///
    /// Returns `NzbError::NestingTooDeep` when the stack is full.
    pub fn push(&mut self, name: u64) -> Result<()> {
        if self.frames.len() >= self.max_depth {
            return Err(NzbError::NestingTooDeep {
                max: self.max_depth,
            });
        }
        self.frames.push(Frame {
            name,
            first_attribute: self.attributes.len(),
            contents: String::new(),
        });
        Ok(())
    }

    /// Attaches an attribute to the innermost open element.
    ///
    /// # Errors
    ///
    /// Returns `NzbError::DetachedAttribute` when no element is open.
    pub fn add_attribute(&mut self, raw_name: &[u8], name: u64, value: String) -> Result<()> {
        if self.frames.is_empty() {
            return Err(NzbError::DetachedAttribute {
                attribute: String::from_utf8_lossy(raw_name).into_owned(),
            });
        }
        self.attributes.push(Attribute { name, value });
        Ok(())
    }

    /// Appends a text chunk to the innermost open element. Text outside
    /// the root element has no owner and is dropped.
    pub fn append_text(&mut self, text: &str) {
        if let Some(frame) = self.frames.last_mut() {
            frame.contents.push_str(text);
        }
    }

    /// Closes the innermost element.
    ///
    /// # Errors
    ///
    /// Returns `NzbError::UnbalancedClose` when no element is open.
    pub fn pop(&mut self, raw_name: &[u8]) -> Result<ClosedElement> {
        let frame = self.frames.pop().ok_or_else(|| NzbError::UnbalancedClose {
            element: String::from_utf8_lossy(raw_name).into_owned(),
        })?;
        let attributes = self.attributes.drain(frame.first_attribute..).collect();
        Ok(ClosedElement {
            name: frame.name,
            attributes,
            contents: frame.contents,
        })
    }
}
