use crate::error::LabelError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;

use super::text::canonicalize;

/// Known false positives for the "only not used" filter: description and
/// name-suffix fields, calendar unit names, single-purpose bookkeeping keys,
/// and keys carrying legacy locale markers. Maintained exception list;
/// extend it rather than re-deriving entries.
const UNUSED_KEY_EXCEPTIONS: &[&str] = &[
    ".description.",
    ".transitionName.",
    ".partyRelationshipName.",
    ".geoName.",
    ".categoryName.",
    "FieldDescription.",
    "TemporalExpression_",
    ".portalPageName.",
    "ProductStoreGroup.productStoreGroupName.NA",
    "buildEbayConfig.",
    "week.",
    "second.",
    "hour.",
    "millisecond.",
    "service.",
    "check.",
    "pt_",
    "en_",
];

fn is_unused_exception(key: &str) -> bool {
    // Two-character keys are bare language ids
    key.len() == 2 || UNUSED_KEY_EXCEPTIONS.iter().any(|fragment| key.contains(fragment))
}

/// Reject the legacy underscore-separated locale form (`en_AU`); only the
/// dash-separated form (`en-AU`) identifies one locale unambiguously.
pub fn validate_locale(locale: &str, file_name: &str, key: &str) -> Result<(), LabelError> {
    if locale.contains('_') {
        return Err(LabelError::UnderscoreLocale {
            file: file_name.to_string(),
            key: key.to_string(),
            locale: locale.to_string(),
        });
    }
    Ok(())
}

/// One locale's text for a label, as read from the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawValue {
    pub locale: String,
    pub value: String,
    pub comment: String,
}

/// One `<property>` element: a logical label key plus its per-locale values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawLabel {
    pub key: String,
    pub key_comment: String,
    pub values: Vec<RawValue>,
}

/// Streaming reader over the `<property>` children of a label resource
/// document root. Yields one [`RawLabel`] per property element; the
/// iteration is lazy, finite, and ends permanently at the first error.
pub struct LabelReader<'a> {
    file_name: String,
    reader: Reader<&'a [u8]>,
    buf: Vec<u8>,
    only_unused: bool,
    /// Comment text accumulated since the previous property element
    key_comment: String,
    in_root: bool,
    done: bool,
}

impl<'a> LabelReader<'a> {
    pub fn new(file_name: &str, contents: &'a str, only_unused: bool) -> Self {
        let mut reader = Reader::from_str(contents);
        reader.trim_text(true);
        Self {
            file_name: file_name.to_string(),
            reader,
            buf: Vec::new(),
            only_unused,
            key_comment: String::new(),
            in_root: false,
            done: false,
        }
    }
}

impl Iterator for LabelReader<'_> {
    type Item = Result<RawLabel, LabelError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf) {
                Ok(Event::Start(e)) => {
                    if !self.in_root {
                        // The document root itself
                        self.in_root = true;
                        continue;
                    }
                    let key = match attr_value(&e, b"key", &self.file_name) {
                        Ok(key) => key,
                        Err(err) => {
                            self.done = true;
                            return Some(Err(err));
                        }
                    };
                    if self.only_unused && is_unused_exception(&key) {
                        let name = e.name().as_ref().to_vec();
                        if let Err(source) = skip_subtree(&mut self.reader, &name) {
                            self.done = true;
                            let file = self.file_name.clone();
                            return Some(Err(LabelError::MalformedXml { file, source }));
                        }
                        continue;
                    }
                    let key_comment = std::mem::take(&mut self.key_comment);
                    match read_property_body(&mut self.reader, &self.file_name, key, key_comment) {
                        Ok(label) => return Some(Ok(label)),
                        Err(err) => {
                            self.done = true;
                            return Some(Err(err));
                        }
                    }
                }
                Ok(Event::Empty(e)) => {
                    if !self.in_root {
                        self.in_root = true;
                        continue;
                    }
                    let key = match attr_value(&e, b"key", &self.file_name) {
                        Ok(key) => key,
                        Err(err) => {
                            self.done = true;
                            return Some(Err(err));
                        }
                    };
                    if self.only_unused && is_unused_exception(&key) {
                        continue;
                    }
                    let key_comment = std::mem::take(&mut self.key_comment);
                    return Some(Ok(RawLabel {
                        key,
                        key_comment,
                        values: Vec::new(),
                    }));
                }
                Ok(Event::Comment(e)) => {
                    if self.in_root {
                        let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                        self.key_comment.push_str(&canonicalize(&text));
                    }
                }
                Ok(Event::End(_)) | Ok(Event::Eof) => {
                    // Root closed; nothing after it concerns us
                    self.done = true;
                    return None;
                }
                Err(source) => {
                    self.done = true;
                    let file = self.file_name.clone();
                    return Some(Err(LabelError::MalformedXml { file, source }));
                }
                _ => {}
            }
        }
    }
}

/// Read the value elements of one property, up to its closing tag.
/// Comments between value elements attach to the next value element.
fn read_property_body(
    reader: &mut Reader<&[u8]>,
    file_name: &str,
    key: String,
    key_comment: String,
) -> Result<RawLabel, LabelError> {
    let mut label = RawLabel {
        key,
        key_comment,
        values: Vec::new(),
    };
    let mut value_comment = String::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let locale = attr_value(&e, b"xml:lang", file_name)?;
                validate_locale(&locale, file_name, &label.key)?;
                let name = e.name().as_ref().to_vec();
                let value = read_element_text(reader, file_name, &name)?;
                label.values.push(RawValue {
                    locale,
                    value: canonicalize(&value),
                    comment: std::mem::take(&mut value_comment),
                });
            }
            Ok(Event::Empty(e)) => {
                let locale = attr_value(&e, b"xml:lang", file_name)?;
                validate_locale(&locale, file_name, &label.key)?;
                label.values.push(RawValue {
                    locale,
                    value: String::new(),
                    comment: std::mem::take(&mut value_comment),
                });
            }
            Ok(Event::Comment(e)) => {
                let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                value_comment.push_str(&canonicalize(&text));
            }
            Ok(Event::End(_)) => return Ok(label),
            Ok(Event::Eof) => {
                return Err(malformed(
                    file_name,
                    quick_xml::Error::UnexpectedEof("property".to_string()),
                ))
            }
            Err(source) => return Err(malformed(file_name, source)),
            _ => {}
        }
    }
}

/// Collect the text content of one value element, ignoring nested markup
fn read_element_text(
    reader: &mut Reader<&[u8]>,
    file_name: &str,
    end_name: &[u8],
) -> Result<String, LabelError> {
    let mut text = String::new();
    let mut depth = 0usize;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(e)) => {
                if depth == 0 && e.name().as_ref() == end_name {
                    return Ok(text);
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Text(e)) => match e.unescape() {
                Ok(t) => text.push_str(&t),
                Err(source) => return Err(malformed(file_name, source)),
            },
            Ok(Event::CData(e)) => {
                text.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Ok(Event::Eof) => {
                return Err(malformed(
                    file_name,
                    quick_xml::Error::UnexpectedEof("value".to_string()),
                ))
            }
            Err(source) => return Err(malformed(file_name, source)),
            _ => {}
        }
    }
}

/// Read an attribute by name, canonicalized; absent attributes read as empty
fn attr_value(e: &BytesStart<'_>, name: &[u8], file_name: &str) -> Result<String, LabelError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|source| malformed(file_name, source.into()))?;
        if attr.key.as_ref() == name {
            let value = attr
                .unescape_value()
                .map_err(|source| malformed(file_name, source))?;
            return Ok(canonicalize(&value));
        }
    }
    Ok(String::new())
}

fn skip_subtree(reader: &mut Reader<&[u8]>, name: &[u8]) -> Result<(), quick_xml::Error> {
    let mut buf = Vec::new();
    reader.read_to_end_into(QName(name), &mut buf)?;
    Ok(())
}

fn malformed(file_name: &str, source: quick_xml::Error) -> LabelError {
    LabelError::MalformedXml {
        file: file_name.to_string(),
        source,
    }
}
