//! Story source text.

use std::convert::Infallible;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use story_lines::SourceText;

/// The source of one story, used to fill the `src` of compiled lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Story {
    text: String,
}

impl Story {
    pub fn new(text: impl Into<String>) -> Self {
        Story { text: text.into() }
    }

    pub fn from_file(path: impl AsRef<Path>) -> io::Result<Self> {
        fs::read_to_string(path).map(Story::new)
    }

    pub fn from_reader(mut reader: impl Read) -> io::Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Story::new(text))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Raw text of a 1-based line.
    pub fn line(&self, line: u32) -> Option<&str> {
        SourceText::line(self.text.as_str(), line)
    }
}

impl FromStr for Story {
    type Err = Infallible;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(Story::new(text))
    }
}

impl SourceText for Story {
    fn line(&self, line: u32) -> Option<&str> {
        Story::line(self, line)
    }
}
