//! Picking one test (or history entry) by name without a menu.

use crate::engine::TestCase;
use crate::history::HistoryEntry;

pub trait Selectable {
    fn display_name(&self) -> String;
}

impl Selectable for TestCase {
    fn display_name(&self) -> String {
        self.qualified_name.clone()
    }
}

/// Stored benchmark keys.
impl Selectable for String {
    fn display_name(&self) -> String {
        self.clone()
    }
}

impl Selectable for HistoryEntry {
    fn display_name(&self) -> String {
        self.command().to_string()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Selection<'a, T> {
    Chosen(&'a T),
    /// Nothing or more than one thing matched.
    Candidates(Vec<&'a T>),
}

/// Items whose display name contains `query`, ignoring case.
pub fn search<'a, T: Selectable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let query = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.display_name().to_lowercase().contains(&query))
        .collect()
}

/// An exact name match wins; otherwise a single substring match.
pub fn choose<'a, T: Selectable>(items: &'a [T], query: &str) -> Selection<'a, T> {
    if let Some(exact) = items.iter().find(|item| item.display_name() == query) {
        return Selection::Chosen(exact);
    }

    let mut matches = search(items, query);
    if matches.len() == 1 {
        return Selection::Chosen(matches.remove(0));
    }
    Selection::Candidates(matches)
}
