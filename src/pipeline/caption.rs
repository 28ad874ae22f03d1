// src/pipeline/caption.rs

//! Caption and alt text composition.
//!
//! The status is built from fixed lines (title, museum, place, date, link)
//! followed by an optional block of labeled free-text categories:
//!
//! ```text
//! Morpho menelaus
//! NMNH - Entomology Dept.
//! Brazil
//! 1923
//! http://n2t.net/ark:/65665/...
//!
//! Collector: Jane Doe
//! Credit Line: Gift of ...
//! ```
//!
//! A category longer than `field_max_chars` is dropped whole. The block is
//! dropped whole when adding it would exceed `max_chars - field_max_chars`.
//! The fixed lines themselves never exceed `max_chars`; an overlong title
//! is shortened with an ellipsis before anything else is cut.

use crate::models::{CaptionConfig, FreetextEntry, Record};
use crate::utils::{char_len, truncate_graphemes};

/// Composed post text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub status: String,
    pub alt_text: String,
}

/// Free-text categories in the order they appear in the post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Name,
    Notes,
    PhysicalDescription,
    ObjectType,
    CreditLine,
    DataSource,
}

impl Category {
    const ALL: [Category; 6] = [
        Category::Name,
        Category::Notes,
        Category::PhysicalDescription,
        Category::ObjectType,
        Category::CreditLine,
        Category::DataSource,
    ];

    fn entries(self, record: &Record) -> &[FreetextEntry] {
        let Some(freetext) = record.freetext() else {
            return &[];
        };
        match self {
            Category::Name => &freetext.name,
            Category::Notes => &freetext.notes,
            Category::PhysicalDescription => &freetext.physical_description,
            Category::ObjectType => &freetext.object_type,
            Category::CreditLine => &freetext.credit_line,
            Category::DataSource => &freetext.data_source,
        }
    }

    fn in_alt_text(self) -> bool {
        matches!(self, Category::Name | Category::PhysicalDescription)
    }
}

/// Render entries as newline-joined `label: content` lines.
pub fn render_entries(entries: &[FreetextEntry]) -> String {
    entries
        .iter()
        .filter_map(|entry| {
            let content = entry.content.as_deref()?.trim();
            if content.is_empty() {
                return None;
            }
            match entry.label.as_deref().map(str::trim) {
                Some(label) if !label.is_empty() => Some(format!("{label}: {content}")),
                _ => Some(content.to_string()),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Join the title and the remaining fixed lines within `max_chars`.
///
/// The title is shortened first so the museum, place, date and link
/// survive whenever they fit on their own.
fn fit_fixed_lines(title: &str, rest: &[&str], max_chars: usize) -> String {
    let tail = rest.join("\n");
    let joined = format!("{title}\n{tail}");
    if char_len(&joined) <= max_chars {
        return joined;
    }

    let room = max_chars.saturating_sub(char_len(&tail) + 1);
    if room > 1 {
        log::debug!("Shortening title to {} chars", room);
        return format!("{}\u{2026}\n{tail}", truncate_graphemes(title, room - 1));
    }

    truncate_graphemes(&joined, max_chars)
}

/// Compose the status and alt text for a record.
pub fn compose_caption(record: &Record, museum: &str, config: &CaptionConfig) -> Caption {
    let title = record.title().unwrap_or_default();

    let mut rest = vec![museum];
    rest.extend(record.place());
    rest.extend(record.date());
    rest.extend(record.record_link());
    let mut status = fit_fixed_lines(title, &rest, config.max_chars);

    let sections: Vec<(Category, String)> = Category::ALL
        .into_iter()
        .filter_map(|category| {
            let rendered = render_entries(category.entries(record));
            if rendered.is_empty() {
                return None;
            }
            if char_len(&rendered) > config.field_max_chars {
                log::debug!("Dropping {:?}: {} chars", category, char_len(&rendered));
                return None;
            }
            Some((category, rendered))
        })
        .collect();

    let info = sections
        .iter()
        .map(|(_, rendered)| rendered.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    if !info.is_empty() {
        let budget = config.max_chars.saturating_sub(config.field_max_chars);
        let total = char_len(&status) + 2 + char_len(&info);
        if total <= budget {
            status.push_str("\n\n");
            status.push_str(&info);
        } else {
            log::debug!("Dropping free-text block: {} > {}", total, budget);
        }
    }

    let mut alt_lines = vec![title];
    alt_lines.extend(
        sections
            .iter()
            .filter(|(category, _)| category.in_alt_text())
            .map(|(_, rendered)| rendered.as_str()),
    );
    let alt_text = truncate_graphemes(&alt_lines.join("\n"), config.alt_max_chars);

    Caption { status, alt_text }
}
