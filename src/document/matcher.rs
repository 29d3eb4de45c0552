//! Resolve a content segment's locator link against the record index

use super::link::{find_link, LinkReference};
use crate::annotations::{Record, RecordIndex};

/// What a content segment resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentMatch<'a, 'r> {
    /// No locator link in the segment
    NoLink,
    /// The link's locator is not valid percent-encoded UTF-8
    Undecodable(LinkReference<'a>),
    /// The locator decoded, but no record carries it
    Unresolved {
        link: LinkReference<'a>,
        locator: String,
    },
    /// The segment references a known record
    Matched {
        link: LinkReference<'a>,
        record: &'r Record,
    },
}

/// Find the first locator link in `content` and look it up in `index`.
pub fn match_segment<'a, 'r>(content: &'a str, index: &'r RecordIndex) -> SegmentMatch<'a, 'r> {
    let Some(link) = find_link(content) else {
        return SegmentMatch::NoLink;
    };

    let locator = match link.decoded_locator() {
        Ok(locator) => locator,
        Err(e) => {
            tracing::warn!("Could not decode CFI from link {}: {}", link.url, e);
            return SegmentMatch::Undecodable(link);
        }
    };

    match index.get(&locator) {
        Some(record) => SegmentMatch::Matched { link, record },
        None => {
            tracing::debug!("No annotation for locator {}", locator);
            SegmentMatch::Unresolved {
                link,
                locator: locator.into_owned(),
            }
        }
    }
}
