//! Event-level XML access for the package parts of a workbook.

use crate::error::NestingError;
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::BytesRef;
use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::borrow::Cow;
use std::io::BufRead;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum XmlError {
    #[error("Unknown XML entity '&{0};'")]
    UnknownEntity(String),
    #[error("Character reference '&{0};' is not a valid code point")]
    InvalidCharacter(String),
}

/// Pull reader over one package part, reusing a single event buffer.
pub(crate) struct XmlReader<R: BufRead> {
    reader: Reader<R>,
    buffer: Vec<u8>,
}

impl<R: BufRead> XmlReader<R> {
    /// Creates a new XML reader; empty elements are expanded so `<c/>` yields start and end events
    pub(crate) fn new(buf_reader: R) -> XmlReader<R> {
        let mut reader = Reader::from_reader(buf_reader);
        let config = reader.config_mut();
        config.check_comments = false;
        config.check_end_names = false;
        config.expand_empty_elements = true;
        config.trim_text(false);

        let buffer = Vec::with_capacity(1024);
        XmlReader { reader, buffer }
    }

    /// Next event, or `None` at end of input.
    pub(crate) fn next(&'_ mut self) -> Result<Option<Event<'_>>, NestingError> {
        self.buffer.clear();
        match self.reader.read_event_into(&mut self.buffer) {
            Ok(Event::Eof) => Ok(None),
            Ok(event) => Ok(Some(event)),
            Err(error) => Err(NestingError::XmlError(error)),
        }
    }
}

pub(crate) trait XmlAttributeHelper<'a> {
    /// Unescaped attribute value
    fn get_value(&self) -> Result<Cow<'a, str>, NestingError>;
}

impl<'a> XmlAttributeHelper<'a> for Attribute<'a> {
    fn get_value(&self) -> Result<Cow<'a, str>, NestingError> {
        Ok(self.unescape_value()?)
    }
}

pub(crate) trait XmlNodeHelper<'a> {
    /// Unescaped value of the named attribute, if present
    fn get_attribute_value(&'a self, name: &str) -> Result<Option<Cow<'a, str>>, NestingError>;
}

impl<'a> XmlNodeHelper<'a> for BytesStart<'a> {
    fn get_attribute_value(&'a self, name: &str) -> Result<Option<Cow<'a, str>>, NestingError> {
        self.try_get_attribute(name)?
            .map(|attribute| attribute.get_value())
            .transpose()
    }
}

/// Appends entity and character references (`&amp;`, `&#x41;`) to decoded text.
pub(crate) trait XmlTextContextHelper {
    fn push_bytes_ref(&mut self, bytes: &BytesRef) -> Result<(), NestingError>;
}

impl XmlTextContextHelper for String {
    fn push_bytes_ref(&mut self, bytes: &BytesRef) -> Result<(), NestingError> {
        let raw = bytes.xml_content()?;
        match raw.strip_prefix('#') {
            Some(code) => self.push(decode_character(code).ok_or_else(|| XmlError::InvalidCharacter(raw.to_string()))?),
            None => self.push_str(resolve_xml_entity(&raw).ok_or_else(|| XmlError::UnknownEntity(raw.to_string()))?),
        }
        Ok(())
    }
}

fn decode_character(code: &str) -> Option<char> {
    let value = match code.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => code.parse::<u32>().ok()?,
    };
    char::from_u32(value)
}

#[macro_export]
macro_rules! match_xml_events {
    ($reader:expr => { $($arms:tt)* }) => {
        while let Some(result) = $reader.next()? {
            match result {
                Event::Eof => break,
                $($arms)*
                _ => (),
            }
        }
    };
}
