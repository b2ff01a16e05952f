//! Parse free-text analysis output into labeled sections for display.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Heading marker that opens a new section.
const HEADING_PREFIX: &str = "## ";

/// `- **Label:** rest` (colon inside or outside the bold markers).
static LABELED_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*]\s+\*\*(.+?)(?::\*\*|\*\*:)\s*(.*)$").unwrap());

/// A titled fragment of the parsed analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Heading text with the marker stripped; `None` for text that
    /// precedes the first heading.
    pub title: Option<String>,
    pub lines: Vec<SectionLine>,
}

/// One classified line of a section body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionLine {
    /// A `- **Label:** rest` bullet.
    Labeled { label: String, text: String },
    /// A plain bullet with the marker stripped.
    Bullet { text: String },
    /// Anything else, preserved verbatim.
    Text { text: String },
}

/// Classify a single body line. Malformed markers fall through to
/// verbatim text; this never fails.
fn classify_line(line: &str) -> SectionLine {
    if let Some(caps) = LABELED_BULLET.captures(line.trim_start()) {
        let label = caps[1].trim().trim_end_matches(':').trim().to_string();
        let text = caps[2].trim().to_string();
        return SectionLine::Labeled { label, text };
    }

    let trimmed = line.trim_start();
    for marker in ["- ", "* "] {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            return SectionLine::Bullet {
                text: rest.trim_start().to_string(),
            };
        }
    }

    SectionLine::Text {
        text: line.to_string(),
    }
}

/// Split analysis text into sections at each `## ` heading.
///
/// Text before the first heading becomes a title-less section when it has
/// any visible content. Body lines keep their order; empty lines are kept
/// verbatim.
pub fn parse_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section {
        title: None,
        lines: Vec::new(),
    };

    for line in text.lines() {
        if let Some(heading) = line.strip_prefix(HEADING_PREFIX) {
            flush(&mut sections, current);
            current = Section {
                title: Some(heading.trim().to_string()),
                lines: Vec::new(),
            };
        } else {
            current.lines.push(classify_line(line));
        }
    }
    flush(&mut sections, current);

    sections
}

fn flush(sections: &mut Vec<Section>, section: Section) {
    let blank = section.title.is_none()
        && section
            .lines
            .iter()
            .all(|l| matches!(l, SectionLine::Text { text } if text.trim().is_empty()));
    if !blank {
        sections.push(section);
    }
}
