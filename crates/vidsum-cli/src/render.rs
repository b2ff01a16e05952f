//! Terminal rendering of parsed summary sections.

use vidsum_format::{Section, SectionLine};

pub fn render_sections(sections: &[Section]) -> String {
    let mut out = String::new();
    for section in sections {
        if let Some(title) = &section.title {
            out.push_str(&format!("\n{title}\n"));
            out.push_str(&format!("{}\n", "─".repeat(title.chars().count())));
        }
        for line in &section.lines {
            match line {
                SectionLine::Labeled { label, text } => {
                    out.push_str(&format!("  • {label}: {text}\n"));
                }
                SectionLine::Bullet { text } => {
                    out.push_str(&format!("  • {text}\n"));
                }
                SectionLine::Text { text } => {
                    out.push_str(text);
                    out.push('\n');
                }
            }
        }
    }
    out
}
