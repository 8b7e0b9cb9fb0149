//! Search execution and result highlighting.
//!
//! Result fragments are document text and are escaped before any markup is
//! added. Matches are located on the raw text, so a query can never match
//! inside an escape entity, and the query itself is matched literally.

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::client::session::{Body, Session};
use crate::client::store::{SectionStore, StoreError};

pub const EMPTY_QUERY_PROMPT: &str = "Please enter a search term.";
pub const NO_RESULTS_PLACEHOLDER: &str = "No results found.";
pub const RESULT_SEPARATOR: &str = "<br><br>";
pub const HIGHLIGHT_OPEN: &str = "<span class=\"highlight\">";
pub const HIGHLIGHT_CLOSE: &str = "</span>";

impl<S: SectionStore> Session<S> {
    /// Runs a search and shows highlighted results.
    ///
    /// A blank query only writes a prompt to the status slot. Results never
    /// change the current section or the draft.
    pub async fn search(&mut self, query: &str) -> Result<(), StoreError> {
        let query = query.trim();
        if query.is_empty() {
            self.state.status.report(EMPTY_QUERY_PROMPT);
            return Ok(());
        }

        debug!(query, "searching");
        let reply = match self.store.search(query).await {
            Ok(reply) => reply,
            Err(e) => return Err(self.report_failure("search", e)),
        };

        self.state.view.title = format!("Search Results for \"{query}\"");
        self.state.view.body = if reply.results.is_empty() {
            Body::Text(NO_RESULTS_PLACEHOLDER.to_string())
        } else {
            Body::Markup(render_results(&reply.results, query))
        };
        self.state
            .status
            .report(format!("Search completed for \"{query}\"."));
        Ok(())
    }
}

/// Escapes the characters that are significant in markup.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Case-insensitive literal matcher for `query`. `None` for an empty query
/// or one too large to compile.
fn query_matcher(query: &str) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Escapes `fragment` and wraps every match of `matcher` in the highlight
/// marker. Matched text keeps its original case.
fn highlight_fragment(fragment: &str, matcher: Option<&Regex>) -> String {
    let Some(matcher) = matcher else {
        return escape_markup(fragment);
    };

    let mut out = String::with_capacity(fragment.len());
    let mut last = 0;
    for m in matcher.find_iter(fragment) {
        out.push_str(&escape_markup(&fragment[last..m.start()]));
        out.push_str(HIGHLIGHT_OPEN);
        out.push_str(&escape_markup(m.as_str()));
        out.push_str(HIGHLIGHT_CLOSE);
        last = m.end();
    }
    out.push_str(&escape_markup(&fragment[last..]));
    out
}

/// Joins result fragments with a paragraph break and highlights `query`.
pub fn render_results(results: &[String], query: &str) -> String {
    let matcher = query_matcher(query);
    results
        .iter()
        .map(|fragment| highlight_fragment(fragment, matcher.as_ref()))
        .collect::<Vec<_>>()
        .join(RESULT_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::{Call, FakeStore, Op};
    use crate::client::section::SectionId;

    #[test]
    fn test_highlight_is_case_insensitive_and_keeps_case() {
        let out = render_results(&["Senior Engineer".to_string()], "eng");
        assert_eq!(out, "Senior <span class=\"highlight\">Eng</span>ineer");
    }

    #[test]
    fn test_highlight_every_occurrence() {
        let out = render_results(&["go Go GO".to_string()], "go");
        assert_eq!(out.matches(HIGHLIGHT_OPEN).count(), 3);
    }

    #[test]
    fn test_fragment_markup_renders_literally() {
        let out = render_results(&["<b>Rust</b> & C".to_string()], "rust");
        assert_eq!(
            out,
            "&lt;b&gt;<span class=\"highlight\">Rust</span>&lt;/b&gt; &amp; C"
        );
    }

    #[test]
    fn test_query_with_regex_metacharacters_matches_literally() {
        let out = render_results(&["C++ and C#".to_string()], "c++");
        assert_eq!(out, "<span class=\"highlight\">C++</span> and C#");

        let out = render_results(&["(a.b)".to_string()], "a.b");
        assert_eq!(out, "(<span class=\"highlight\">a.b</span>)");
        let out = render_results(&["axb".to_string()], "a.b");
        assert_eq!(out, "axb");
    }

    #[test]
    fn test_query_cannot_match_escape_entities() {
        let out = render_results(&["R&D".to_string()], "amp");
        assert_eq!(out, "R&amp;D");
    }

    #[test]
    fn test_markup_query_is_escaped_when_matched() {
        let out = render_results(&["use <br> tags".to_string()], "<br>");
        assert_eq!(
            out,
            "use <span class=\"highlight\">&lt;br&gt;</span> tags"
        );
    }

    #[test]
    fn test_fragments_joined_with_separator() {
        let out = render_results(&["one".to_string(), "two".to_string()], "zzz");
        assert_eq!(out, "one<br><br>two");
    }

    #[tokio::test]
    async fn test_blank_query_sends_nothing() {
        let mut session = Session::new(FakeStore::with_resume());
        session.search("   \t").await.unwrap();
        assert!(session.store().calls().is_empty());
        assert_eq!(session.state().status.message(), EMPTY_QUERY_PROMPT);
    }

    #[tokio::test]
    async fn test_search_sends_trimmed_query_and_renders() {
        let mut session = Session::new(FakeStore::with_resume());
        session
            .store()
            .set_search_results(&["Found in Experience:\n>>> Senior Engineer\n"]);
        session.search("  eng ").await.unwrap();

        let state = session.state();
        assert_eq!(session.store().calls(), vec![Call::Search("eng".into())]);
        assert_eq!(state.view.title, "Search Results for \"eng\"");
        match &state.view.body {
            Body::Markup(m) => {
                assert!(m.contains("&gt;&gt;&gt; Senior <span class=\"highlight\">Eng</span>ineer"))
            }
            other => panic!("expected markup, got {other:?}"),
        }
        assert_eq!(state.status.message(), "Search completed for \"eng\".");
    }

    #[tokio::test]
    async fn test_empty_results_show_placeholder() {
        let mut session = Session::new(FakeStore::with_resume());
        session.search("cobol").await.unwrap();
        assert_eq!(
            session.state().view.body,
            Body::Text(NO_RESULTS_PLACEHOLDER.into())
        );
    }

    #[tokio::test]
    async fn test_search_leaves_current_section() {
        let mut session = Session::new(FakeStore::with_resume());
        session.load_section(SectionId::new("Skills")).await.unwrap();
        session.store().set_search_results(&["Rust"]);
        session.search("rust").await.unwrap();
        assert_eq!(session.state().current, SectionId::new("Skills"));
        assert_eq!(session.state().loaded_content, "Rust, Go");
    }

    #[tokio::test]
    async fn test_search_failure_keeps_display() {
        let mut session = Session::new(FakeStore::with_resume());
        session.load_section(SectionId::new("Skills")).await.unwrap();
        session.store().reject(Op::Search, "Please upload a resume first.");

        assert!(session.search("rust").await.is_err());
        assert_eq!(session.state().view.title, "SKILLS");
        assert_eq!(
            session.state().status.message(),
            "Please upload a resume first."
        );
    }
}
