//! The append-only tag stream a record is serialized into.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Display;
use quick_xml::escape::escape;

/// A tag under construction. Attributes keep the order they were added in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: &'static str,
    attrs: String,
}

impl Tag {
    pub fn new(name: &'static str) -> Tag {
        return Tag {
            name,
            attrs: String::new(),
        };
    }

    pub fn attr(mut self, key: &'static str, value: impl Display) -> Tag {
        let value = format!("{}", value);
        self.attrs.push(' ');
        self.attrs.push_str(key);
        self.attrs.push_str("=\"");
        self.attrs.push_str(&escape(value.as_str()));
        self.attrs.push('"');
        return self;
    }

    pub fn attr_opt<T: Display>(self, key: &'static str, value: Option<T>) -> Tag {
        return match value {
            Some(v) => self.attr(key, v),
            None => self,
        };
    }

    /// Set a flag attribute to `1`, or leave it out.
    pub fn flag(self, key: &'static str, set: bool) -> Tag {
        if set {
            return self.attr(key, 1);
        }
        return self;
    }

    pub fn name(&self) -> &'static str {
        return self.name;
    }
}

/// Collects fragments for one record and joins them on flush.
///
/// Consecutive characters are gathered into a single text fragment.
#[derive(Debug, Clone, Default)]
pub struct TagWriter {
    fragments: Vec<String>,
    in_text: bool,
}

impl TagWriter {
    pub fn new() -> TagWriter {
        return TagWriter::default();
    }

    pub fn start(&mut self, tag: Tag) {
        self.push(format!("<{}{}>", tag.name, tag.attrs));
    }

    pub fn empty(&mut self, tag: Tag) {
        self.push(format!("<{}{}/>", tag.name, tag.attrs));
    }

    pub fn end(&mut self, name: &str) {
        self.push(format!("</{}>", name));
    }

    /// Append character data. Special characters are escaped.
    pub fn text(&mut self, raw: &str) {
        for c in raw.chars() {
            self.push_char(c);
        }
    }

    pub fn push_char(&mut self, c: char) {
        if !self.in_text {
            self.fragments.push(String::new());
            self.in_text = true;
        }
        if let Some(last) = self.fragments.last_mut() {
            match c {
                '&' | '<' | '>' | '"' | '\'' => {
                    let mut buf = [0u8; 4];
                    last.push_str(&escape(&*c.encode_utf8(&mut buf)));
                }
                _ => last.push(c),
            }
        }
    }

    fn push(&mut self, fragment: String) {
        self.in_text = false;
        self.fragments.push(fragment);
    }

    pub fn fragment_count(&self) -> usize {
        return self.fragments.len();
    }

    pub fn flush(self) -> String {
        return self.fragments.concat();
    }
}
