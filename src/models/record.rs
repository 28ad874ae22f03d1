//! Open Access search response structures.
//!
//! The EDAN record tree is deep and sparsely populated. Every level that
//! can be missing is an `Option` here, and each collapse point has exactly
//! one accessor on [`Record`].

use serde::{Deserialize, Serialize};

/// Embedded status the API reports for a successful query.
pub const STATUS_OK: i64 = 200;

/// Top-level body of a search call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub status: Option<i64>,

    #[serde(default)]
    pub response: Option<ResponseBody>,
}

impl SearchResult {
    pub fn is_ok(&self) -> bool {
        self.status == Some(STATUS_OK)
    }

    pub fn row_count(&self) -> u64 {
        self.response.as_ref().map_or(0, |r| r.row_count)
    }

    pub fn rows(&self) -> &[Record] {
        self.response
            .as_ref()
            .map(|r| r.rows.as_slice())
            .unwrap_or(&[])
    }

    /// Error message the API attached to a failed query.
    pub fn message(&self) -> &str {
        self.response
            .as_ref()
            .and_then(|r| r.message.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(default)]
    pub row_count: u64,

    #[serde(default)]
    pub rows: Vec<Record>,

    #[serde(default)]
    pub message: Option<String>,
}

/// One candidate item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub unit_code: Option<String>,

    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default)]
    pub descriptive_non_repeating: Option<Descriptive>,

    #[serde(default)]
    pub freetext: Option<Freetext>,

    #[serde(default)]
    pub place: Option<Vec<FreetextEntry>>,
}

/// The `descriptiveNonRepeating` block. Keys inside it are snake_case.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Descriptive {
    #[serde(default)]
    pub unit_code: Option<String>,

    #[serde(default)]
    pub record_link: Option<String>,

    #[serde(default)]
    pub metadata_usage: Option<MetadataUsage>,

    #[serde(default)]
    pub online_media: Option<OnlineMedia>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataUsage {
    #[serde(default)]
    pub access: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnlineMedia {
    #[serde(default)]
    pub media: Option<Vec<MediaCandidate>>,
}

/// One renderable image variant of a record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaCandidate {
    /// Direct URL of the image
    #[serde(default)]
    pub content: Option<String>,

    #[serde(default, rename = "type")]
    pub media_type: Option<String>,

    #[serde(default)]
    pub ids_id: Option<String>,
}

impl MediaCandidate {
    /// Non-empty URL of this variant.
    pub fn url(&self) -> Option<&str> {
        self.content.as_deref().filter(|u| !u.trim().is_empty())
    }
}

/// Labeled free-text categories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Freetext {
    #[serde(default)]
    pub name: Vec<FreetextEntry>,

    #[serde(default)]
    pub notes: Vec<FreetextEntry>,

    #[serde(default)]
    pub physical_description: Vec<FreetextEntry>,

    #[serde(default)]
    pub object_type: Vec<FreetextEntry>,

    #[serde(default)]
    pub credit_line: Vec<FreetextEntry>,

    #[serde(default)]
    pub data_source: Vec<FreetextEntry>,

    #[serde(default)]
    pub date: Vec<FreetextEntry>,

    #[serde(default)]
    pub place: Vec<FreetextEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreetextEntry {
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub content: Option<String>,
}

impl FreetextEntry {
    pub fn new(label: &str, content: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            content: Some(content.to_string()),
        }
    }

    fn text(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.trim().is_empty())
    }
}

impl Record {
    /// Non-empty title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }

    fn descriptive(&self) -> Option<&Descriptive> {
        self.content.as_ref()?.descriptive_non_repeating.as_ref()
    }

    pub fn freetext(&self) -> Option<&Freetext> {
        self.content.as_ref()?.freetext.as_ref()
    }

    /// Usage flag from `metadata_usage.access`.
    pub fn access(&self) -> Option<&str> {
        self.descriptive()?.metadata_usage.as_ref()?.access.as_deref()
    }

    /// Media list; any missing level yields an empty slice.
    pub fn media(&self) -> &[MediaCandidate] {
        self.descriptive()
            .and_then(|d| d.online_media.as_ref())
            .and_then(|m| m.media.as_deref())
            .unwrap_or(&[])
    }

    /// Unit code recorded on the item itself.
    pub fn unit_code(&self) -> Option<&str> {
        self.descriptive()
            .and_then(|d| d.unit_code.as_deref())
            .or(self.unit_code.as_deref())
    }

    pub fn record_link(&self) -> Option<&str> {
        self.descriptive()?
            .record_link
            .as_deref()
            .filter(|l| !l.trim().is_empty())
    }

    /// First place value, from `content.place` then `freetext.place`.
    pub fn place(&self) -> Option<&str> {
        self.content
            .as_ref()
            .and_then(|c| c.place.as_deref())
            .and_then(|p| p.first())
            .and_then(FreetextEntry::text)
            .or_else(|| self.freetext()?.place.first()?.text())
    }

    /// First collection date.
    pub fn date(&self) -> Option<&str> {
        self.freetext()?.date.first()?.text()
    }
}
