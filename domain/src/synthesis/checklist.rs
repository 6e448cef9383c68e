//! Itemized lists and the category lookups that feed them.

use std::fmt::Write;

/// Numbered list, one item per line: `{glyph}{i}. {item}`.
///
/// Numbering starts at 1. Pass an empty glyph for a plain numbered list.
pub fn render_checklist<S: AsRef<str>>(items: &[S], glyph: &str) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(out, "{}{}. {}", glyph, i + 1, item.as_ref());
    }
    out
}

/// Unnumbered list: `- {item}` per line.
pub fn render_bullets<S: AsRef<str>>(items: &[S]) -> String {
    let mut out = String::new();
    for item in items {
        let _ = writeln!(out, "- {}", item.as_ref());
    }
    out
}

/// Fixed mapping from category names to item lists, with a fallback.
///
/// Several names may share one list (`document`, `plan`, `proposal`).
/// Lookup is by lower-cased key.
#[derive(Debug, Clone, Copy)]
pub struct CategoryTable {
    entries: &'static [(&'static [&'static str], &'static [&'static str])],
    fallback: &'static [&'static str],
}

impl CategoryTable {
    pub const fn new(
        entries: &'static [(&'static [&'static str], &'static [&'static str])],
        fallback: &'static [&'static str],
    ) -> Self {
        Self { entries, fallback }
    }

    pub fn lookup(&self, key: &str) -> &'static [&'static str] {
        let key = key.to_lowercase();
        self.entries
            .iter()
            .find(|(names, _)| names.contains(&key.as_str()))
            .map(|(_, items)| *items)
            .unwrap_or(self.fallback)
    }

    pub fn fallback(&self) -> &'static [&'static str] {
        self.fallback
    }
}
