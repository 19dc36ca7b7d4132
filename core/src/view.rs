//! Pure projections of the page model: list entries, HTML fragments for the
//! `checklist` and `searchResults` containers, and plain-text lines for
//! terminal hosts.

use std::fmt::Write as _;

use crate::types::ChecklistItem;

/// Message shown for an empty search and for a failed one alike.
pub const NO_MATCHES_MESSAGE: &str = "No matching tasks found.";

/// CSS class applied to the title of a completed item.
pub const COMPLETED_CLASS: &str = "completed";

/// Element id of the list entry for `id`.
pub fn entry_dom_id(id: u64) -> String {
    format!("task-{id}")
}

/// One rendered row of the checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistEntry {
    pub dom_id: String,
    pub id: u64,
    pub title: String,
    pub checked: bool,
    pub title_class: Option<&'static str>,
}

impl From<&ChecklistItem> for ChecklistEntry {
    fn from(item: &ChecklistItem) -> Self {
        Self {
            dom_id: entry_dom_id(item.id),
            id: item.id,
            title: item.title.clone(),
            checked: item.completed,
            title_class: item.completed.then_some(COMPLETED_CLASS),
        }
    }
}

pub fn checklist_entries(items: &[ChecklistItem]) -> Vec<ChecklistEntry> {
    items.iter().map(ChecklistEntry::from).collect()
}

/// Markup for the children of the `checklist` list container.
pub fn render_checklist_html(items: &[ChecklistItem]) -> String {
    let mut html = String::new();
    for entry in checklist_entries(items) {
        let checked = if entry.checked { " checked" } else { "" };
        let class = entry.title_class.unwrap_or("");
        let _ = write!(
            html,
            "<li id=\"{dom_id}\">\
             <input type=\"checkbox\"{checked} onchange=\"toggleChecklistItem({id}, this.checked)\">\
             <span class=\"{class}\">{title}</span>\
             <button onclick=\"editChecklistItem({id})\">View/Edit</button>\
             <button onclick=\"removeChecklistItem({id})\">Delete</button>\
             </li>",
            dom_id = entry.dom_id,
            id = entry.id,
            title = escape_html(&entry.title),
        );
    }
    html
}

/// Terminal rendering: one `[x] #id title` line per item.
pub fn render_checklist_text(items: &[ChecklistItem]) -> String {
    if items.is_empty() {
        return "(no tasks)\n".to_string();
    }
    let mut out = String::new();
    for item in items {
        let mark = if item.completed { 'x' } else { ' ' };
        let _ = writeln!(out, "[{mark}] #{} {}", item.id, item.title);
    }
    out
}

/// Content of the `searchResults` container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchResults {
    #[default]
    Cleared,
    NoMatches,
    /// `(title, description)` pairs in backend order.
    Found(Vec<(String, String)>),
}

impl SearchResults {
    pub fn from_items(items: &[ChecklistItem]) -> Self {
        if items.is_empty() {
            return SearchResults::NoMatches;
        }
        SearchResults::Found(
            items
                .iter()
                .map(|item| (item.title.clone(), item.description_or_empty().to_string()))
                .collect(),
        )
    }

    pub fn to_html(&self) -> String {
        match self {
            SearchResults::Cleared => String::new(),
            SearchResults::NoMatches => {
                format!("<p style='color: red;'>{NO_MATCHES_MESSAGE}</p>")
            }
            SearchResults::Found(hits) => hits
                .iter()
                .map(|(title, description)| {
                    format!(
                        "<p><strong>{}</strong>: {}</p>",
                        escape_html(title),
                        escape_html(description)
                    )
                })
                .collect(),
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            SearchResults::Cleared => String::new(),
            SearchResults::NoMatches => format!("{NO_MATCHES_MESSAGE}\n"),
            SearchResults::Found(hits) => hits
                .iter()
                .map(|(title, description)| format!("{title}: {description}\n"))
                .collect(),
        }
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, title: &str, completed: bool) -> ChecklistItem {
        ChecklistItem {
            id,
            title: title.to_string(),
            description: None,
            completed,
            version: 0,
        }
    }

    #[test]
    fn completed_entry_is_checked_and_styled() {
        let entry = ChecklistEntry::from(&item(3, "Pay rent", true));
        assert_eq!(entry.dom_id, "task-3");
        assert!(entry.checked);
        assert_eq!(entry.title_class, Some("completed"));

        let open = ChecklistEntry::from(&item(4, "Call mom", false));
        assert!(!open.checked);
        assert_eq!(open.title_class, None);
    }

    #[test]
    fn checklist_html_has_one_li_per_item() {
        let html = render_checklist_html(&[item(1, "A", false), item(2, "B", true)]);
        assert_eq!(html.matches("<li ").count(), 2);
        assert!(html.contains("<li id=\"task-1\">"));
        assert!(html.contains("<input type=\"checkbox\" checked onchange=\"toggleChecklistItem(2, this.checked)\">"));
        assert!(html.contains("<span class=\"completed\">B</span>"));
        assert!(html.contains("<span class=\"\">A</span>"));
    }

    #[test]
    fn checklist_html_escapes_titles() {
        let html = render_checklist_html(&[item(1, "<b>bold</b> & co", false)]);
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt; &amp; co"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn text_rendering_marks_completion() {
        let text = render_checklist_text(&[item(1, "A", false), item(2, "B", true)]);
        assert_eq!(text, "[ ] #1 A\n[x] #2 B\n");
        assert_eq!(render_checklist_text(&[]), "(no tasks)\n");
    }

    #[test]
    fn no_matches_renders_red_message() {
        assert_eq!(
            SearchResults::NoMatches.to_html(),
            "<p style='color: red;'>No matching tasks found.</p>"
        );
        assert_eq!(SearchResults::from_items(&[]), SearchResults::NoMatches);
    }

    #[test]
    fn found_results_pair_title_and_description() {
        let mut milk = item(1, "Milk", false);
        milk.description = Some("2 litres".to_string());
        let results = SearchResults::from_items(&[milk, item(2, "Milkshake", false)]);
        assert_eq!(
            results.to_html(),
            "<p><strong>Milk</strong>: 2 litres</p><p><strong>Milkshake</strong>: </p>"
        );
        assert_eq!(SearchResults::Cleared.to_html(), "");
    }
}
