// Markup extraction — raw markup file text → one plain-text block per document.
//
// A document is everything between an opening document tag (attributes
// allowed, any case) and its closing tag. Inner tags are dropped and their
// text concatenated, comments are removed, and character references are
// decoded. A final document whose closing tag is missing runs to end of file.

use regex_lite::Regex;

use crate::errors::{PipelineError, Result};

/// Trait for splitting a markup file into per-document plain text.
pub trait MarkupExtractor {
    /// Extract the plain text of every document, in file order.
    fn extract_documents(&self, markup: &str) -> Vec<String>;
}

/// Extractor for files where each record is wrapped in `<doc>...</doc>`
/// (or another configurable tag name).
pub struct DocTagExtractor {
    tag: String,
    document: Regex,
    comment: Regex,
    element: Regex,
}

impl DocTagExtractor {
    /// Build an extractor for documents delimited by `<tag>`.
    pub fn new(tag: &str) -> Result<Self> {
        let valid = !tag.is_empty()
            && tag
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'));
        if !valid {
            return Err(PipelineError::Markup(format!(
                "invalid document tag name {tag:?}: expected letters, digits, '-', '_' or ':'"
            )));
        }

        let escaped = regex_lite::escape(tag);
        let document = format!(r"(?is)<{escaped}(?:\s[^>]*)?>(.*?)(?:</{escaped}\s*>|\z)");

        Ok(Self {
            tag: tag.to_string(),
            document: compile(&document)?,
            comment: compile(r"(?s)<!--.*?-->")?,
            element: compile(r"<[^>]*>")?,
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Drop tags from a comment-free document body and decode entities.
    fn plain_text(&self, body: &str) -> String {
        let without_tags = self.element.replace_all(body, "");
        html_escape::decode_html_entities(&without_tags).into_owned()
    }
}

impl Default for DocTagExtractor {
    fn default() -> Self {
        // "doc" is a valid tag and every pattern is a literal, so this cannot fail
        match Self::new("doc") {
            Ok(extractor) => extractor,
            Err(e) => unreachable!("default document tag rejected: {e}"),
        }
    }
}

impl MarkupExtractor for DocTagExtractor {
    fn extract_documents(&self, markup: &str) -> Vec<String> {
        let markup = self.comment.replace_all(markup, "");
        let documents = self
            .document
            .captures_iter(&markup)
            .map(|caps| self.plain_text(caps.get(1).map_or("", |m| m.as_str())))
            .collect();
        documents
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| PipelineError::Markup(format!("invalid markup pattern {pattern:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_documents_in_file_order() {
        let markup = "<doc id=\"1\">First <b>one</b></doc>\n<DOC>Second</DOC>";
        let docs = DocTagExtractor::default().extract_documents(markup);
        assert_eq!(docs, vec!["First one", "Second"]);
    }

    #[test]
    fn ignores_text_outside_documents() {
        let markup = "header text <doc>body</doc> trailer";
        let docs = DocTagExtractor::default().extract_documents(markup);
        assert_eq!(docs, vec!["body"]);
    }

    #[test]
    fn does_not_match_longer_tag_names() {
        let markup = "<docs>not a doc</docs><doc>real</doc>";
        let docs = DocTagExtractor::default().extract_documents(markup);
        assert_eq!(docs, vec!["real"]);
    }

    #[test]
    fn decodes_entities_and_drops_comments() {
        let markup = "<doc>Fish &amp; chips<!-- hidden <b>x</b> --> &#65;&#x42;</doc>";
        let docs = DocTagExtractor::default().extract_documents(markup);
        assert_eq!(docs, vec!["Fish & chips AB"]);
    }

    #[test]
    fn decodes_named_entities_beyond_the_basic_set() {
        let markup = "<doc>caf&eacute; &copy; na&iuml;ve</doc>";
        let docs = DocTagExtractor::default().extract_documents(markup);
        assert_eq!(docs, vec!["caf\u{e9} \u{a9} na\u{ef}ve"]);
    }

    #[test]
    fn comment_hides_document_tags() {
        let markup = "<!-- <doc>commented out</doc> --><doc>kept</doc>";
        let docs = DocTagExtractor::default().extract_documents(markup);
        assert_eq!(docs, vec!["kept"]);
    }

    #[test]
    fn unterminated_final_document_runs_to_end() {
        let markup = "<doc>one</doc><doc>two and more";
        let docs = DocTagExtractor::default().extract_documents(markup);
        assert_eq!(docs, vec!["one", "two and more"]);
    }

    #[test]
    fn custom_tag_and_invalid_tag() {
        let extractor = DocTagExtractor::new("article").unwrap();
        assert_eq!(extractor.tag(), "article");
        assert_eq!(
            extractor.extract_documents("<article>a</article><doc>b</doc>"),
            vec!["a"]
        );

        for bad in ["", "doc>"] {
            let err = DocTagExtractor::new(bad).err().unwrap();
            assert!(matches!(err, PipelineError::Markup(_)));
            assert_eq!(err.stage(), "load");
        }
    }
}
