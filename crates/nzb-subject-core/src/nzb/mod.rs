pub mod file;
pub mod names;
pub mod reader;
pub mod stack;

pub use file::{NzbFile, NzbMeta, Segment};
pub use reader::{NzbReader, NzbReaderConfig};
pub use stack::{Attribute, ClosedElement, ElementStack};
