//! Character sources consumed by the tokenizer.
//!
//! A [`CharSource`] yields one `char` at a time. In-memory text is read
//! directly; byte streams are decoded as UTF-8 incrementally, so a
//! tokenizer never needs the whole input up front.

use std::io::{self, BufRead, BufReader, Read};
use std::str::Chars;
use std::vec;

/// A pull-based stream of characters.
pub struct CharSource<'a> {
    inner: Inner<'a>,
}

enum Inner<'a> {
    Borrowed(Chars<'a>),
    Owned(vec::IntoIter<char>),
    Reader(Utf8Reader<'a>),
}

impl<'a> CharSource<'a> {
    /// Read characters from a borrowed string.
    pub fn from_text(text: &'a str) -> Self {
        CharSource {
            inner: Inner::Borrowed(text.chars()),
        }
    }

    /// Read characters from an owned string.
    pub fn from_string(text: String) -> Self {
        CharSource {
            inner: Inner::Owned(text.chars().collect::<Vec<_>>().into_iter()),
        }
    }

    /// Decode UTF-8 characters from a byte stream.
    ///
    /// Invalid or truncated sequences surface as `io::ErrorKind::InvalidData`.
    pub fn from_reader(reader: impl Read + 'a) -> Self {
        CharSource {
            inner: Inner::Reader(Utf8Reader {
                reader: Box::new(BufReader::new(reader)),
            }),
        }
    }

    /// Read the next character, or `None` at end of input.
    pub fn read(&mut self) -> io::Result<Option<char>> {
        match &mut self.inner {
            Inner::Borrowed(chars) => Ok(chars.next()),
            Inner::Owned(chars) => Ok(chars.next()),
            Inner::Reader(reader) => reader.read_char(),
        }
    }
}

impl<'a> From<&'a str> for CharSource<'a> {
    fn from(text: &'a str) -> Self {
        CharSource::from_text(text)
    }
}

impl<'a> From<&'a String> for CharSource<'a> {
    fn from(text: &'a String) -> Self {
        CharSource::from_text(text)
    }
}

impl From<String> for CharSource<'_> {
    fn from(text: String) -> Self {
        CharSource::from_string(text)
    }
}

struct Utf8Reader<'a> {
    reader: Box<dyn BufRead + 'a>,
}

impl Utf8Reader<'_> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = match self.reader.fill_buf()?.first() {
            Some(&byte) => byte,
            None => return Ok(None),
        };
        self.reader.consume(1);
        Ok(Some(byte))
    }

    fn read_char(&mut self) -> io::Result<Option<char>> {
        let Some(lead) = self.read_byte()? else {
            return Ok(None);
        };
        let width = match lead {
            0x00..=0x7F => return Ok(Some(char::from(lead))),
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return Err(invalid_utf8()),
        };
        let mut buf = [lead, 0, 0, 0];
        for slot in &mut buf[1..width] {
            *slot = self.read_byte()?.ok_or_else(invalid_utf8)?;
        }
        std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .map(Some)
            .ok_or_else(invalid_utf8)
    }
}

fn invalid_utf8() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8")
}
