use serde::{Deserialize, Serialize};

/// Page whose links are pruned or redirected when nothing else is configured.
pub const DEFAULT_TARGET_PAGE: &str = "programs.html";

/// Page that button links are redirected to when nothing else is configured.
pub const DEFAULT_REDIRECT_PAGE: &str = "contact.html";

/// Substring that marks a line as a button.
pub const DEFAULT_BUTTON_MARKER: &str = "btn";

/// The literal substrings that drive line classification.
///
/// Matching is plain substring containment on a single physical line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRules {
    /// Reference that selects a line for pruning or redirection, e.g. `href="programs.html"`.
    pub target_href: String,

    /// Replacement for `target_href` on button lines, e.g. `href="contact.html"`.
    pub redirect_href: String,

    pub item_open: String,
    pub item_close: String,
    pub button_marker: String,
}

impl LinkRules {
    /// Build rules for the given pages using the standard list-item and button markers.
    pub fn for_pages(target_page: &str, redirect_page: &str) -> Self {
        Self {
            target_href: href(target_page),
            redirect_href: href(redirect_page),
            item_open: "<li".to_string(),
            item_close: "</li>".to_string(),
            button_marker: DEFAULT_BUTTON_MARKER.to_string(),
        }
    }

    pub fn with_button_marker(mut self, marker: impl Into<String>) -> Self {
        self.button_marker = marker.into();
        self
    }
}

impl Default for LinkRules {
    fn default() -> Self {
        Self::for_pages(DEFAULT_TARGET_PAGE, DEFAULT_REDIRECT_PAGE)
    }
}

/// Format a page name as a double-quoted `href` attribute.
pub fn href(page: &str) -> String {
    format!("href=\"{page}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_retired_programs_page() {
        let rules = LinkRules::default();
        assert_eq!(rules.target_href, r#"href="programs.html""#);
        assert_eq!(rules.redirect_href, r#"href="contact.html""#);
        assert_eq!(rules.item_open, "<li");
        assert_eq!(rules.item_close, "</li>");
        assert_eq!(rules.button_marker, "btn");
    }

    #[test]
    fn for_pages_quotes_page_names() {
        let rules = LinkRules::for_pages("old.html", "new.html").with_button_marker("button");
        assert_eq!(rules.target_href, r#"href="old.html""#);
        assert_eq!(rules.redirect_href, r#"href="new.html""#);
        assert_eq!(rules.button_marker, "button");
    }
}
