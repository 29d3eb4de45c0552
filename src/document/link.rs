//! Locator links embedded in the document
//!
//! Calibre's markdown export links every highlight back to the book:
//!
//! ```text
//! [selected text](calibre://view-book/_hex_-4c6962/42/EPUB?open_at=epubcfi%28%2F8%2F4%2F2%2F6%29)
//! ```
//!
//! The percent-encoded part between `epubcfi%28` and `%29` is the full locator,
//! spine step included.

use std::borrow::Cow;
use std::string::FromUtf8Error;
use std::sync::LazyLock;

use regex::Regex;

static LOCATOR_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(.*?)\]\(([A-Za-z][A-Za-z0-9+.\-]*://.*?open_at=epubcfi%28(.*?)%29)\)")
        .expect("locator link pattern is valid")
});

/// A markdown link carrying an encoded locator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkReference<'a> {
    /// The whole `[text](url)` as written
    pub literal: &'a str,
    /// Display text between the brackets
    pub text: &'a str,
    /// Link target
    pub url: &'a str,
    /// Locator, still percent-encoded
    pub encoded_locator: &'a str,
}

impl<'a> LinkReference<'a> {
    /// Percent-decode the locator
    pub fn decoded_locator(&self) -> Result<Cow<'a, str>, FromUtf8Error> {
        urlencoding::decode(self.encoded_locator)
    }

    /// Render as an HTML anchor. Text and URL are substituted literally.
    pub fn to_anchor(&self) -> String {
        format!("<a href=\"{}\">{}</a>", self.url, self.text)
    }
}

/// Find the first locator link in a piece of text.
pub fn find_link(text: &str) -> Option<LinkReference<'_>> {
    let caps = LOCATOR_LINK.captures(text)?;
    Some(LinkReference {
        literal: caps.get(0)?.as_str(),
        text: caps.get(1)?.as_str(),
        url: caps.get(2)?.as_str(),
        encoded_locator: caps.get(3)?.as_str(),
    })
}
