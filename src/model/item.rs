use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::types::{Category, Link, Person};

/// A feed item: an RSS `<item>` or the format-neutral part of an Atom entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub published: Option<DateTime<FixedOffset>>,
    pub last_updated: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub contributors: Vec<Person>,
}

/// A full Atom entry: an [`Item`] plus the Atom-only fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub item: Item,
    pub summary: Option<String>,
    pub rights: Option<String>,
    /// Media type of the entry content (`text`, `html`, `xhtml`, ...).
    pub content_type: Option<String>,
}

impl From<Item> for Entry {
    fn from(item: Item) -> Self {
        Self {
            item,
            ..Self::default()
        }
    }
}

/// Either a plain item or a full entry.
///
/// Formatters only emit entry-specific fields (summary, rights, content
/// type) for the `Entry` variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedItem {
    Item(Item),
    Entry(Entry),
}

impl FeedItem {
    pub fn item(&self) -> &Item {
        match self {
            Self::Item(item) => item,
            Self::Entry(entry) => &entry.item,
        }
    }

    pub fn into_item(self) -> Item {
        match self {
            Self::Item(item) => item,
            Self::Entry(entry) => entry.item,
        }
    }

    pub fn as_entry(&self) -> Option<&Entry> {
        match self {
            Self::Entry(entry) => Some(entry),
            Self::Item(_) => None,
        }
    }
}

impl From<Item> for FeedItem {
    fn from(item: Item) -> Self {
        Self::Item(item)
    }
}

impl From<Entry> for FeedItem {
    fn from(entry: Entry) -> Self {
        Self::Entry(entry)
    }
}
