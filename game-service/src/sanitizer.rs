//! Post-processing of raw model output into an HTML document.
//!
//! Models often wrap code in markdown fences even when told not to. This is a
//! best-effort unwrap followed by a check of the document declaration; it is
//! not an HTML parser.

use thiserror::Error;

const HTML_FENCE: &str = "```html";
const FENCE: &str = "```";
const DOCTYPE_PREFIX: &str = "<!doctype html";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("generated content is not valid HTML")]
pub struct InvalidHtml;

/// Strips an optional surrounding code fence and surrounding whitespace.
pub fn strip_code_fences(raw: &str) -> &str {
    let text = raw.trim();

    let text = if let Some(rest) = text.strip_prefix(HTML_FENCE) {
        rest
    } else if let Some(rest) = text.strip_prefix(FENCE) {
        rest
    } else {
        text
    };

    let text = text.strip_suffix(FENCE).unwrap_or(text);

    text.trim()
}

/// Returns the cleaned document, or [`InvalidHtml`] if it does not open with
/// `<!DOCTYPE html` (any case).
pub fn sanitize_html(raw: &str) -> Result<String, InvalidHtml> {
    let html = strip_code_fences(raw);

    let starts_with_doctype = html
        .get(..DOCTYPE_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(DOCTYPE_PREFIX));

    if starts_with_doctype {
        Ok(html.to_string())
    } else {
        Err(InvalidHtml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "<!DOCTYPE html><html><body>quiz</body></html>";

    #[test]
    fn strips_html_fence() {
        let raw = format!("```html\n{}\n```", DOC);
        assert_eq!(sanitize_html(&raw).unwrap(), DOC);
    }

    #[test]
    fn strips_bare_fence() {
        let raw = format!("```\n{}\n```", DOC);
        assert_eq!(sanitize_html(&raw).unwrap(), DOC);
    }

    #[test]
    fn strips_surrounding_whitespace() {
        let raw = format!("\n\n  ```html\n{}\n```  \n", DOC);
        assert_eq!(sanitize_html(&raw).unwrap(), DOC);
    }

    #[test]
    fn unfenced_document_is_unchanged() {
        assert_eq!(sanitize_html(DOC).unwrap(), DOC);
        assert_eq!(strip_code_fences(DOC), DOC);
    }

    #[test]
    fn stripping_is_idempotent() {
        let once = strip_code_fences("```html\n<!doctype html><p>x</p>\n```");
        assert_eq!(strip_code_fences(once), once);
    }

    #[test]
    fn doctype_check_ignores_case() {
        let doc = "<!doctype HTML><html></html>";
        assert_eq!(sanitize_html(doc).unwrap(), doc);
    }

    #[test]
    fn only_trailing_fence_is_removed() {
        let raw = format!("{}\n```", DOC);
        assert_eq!(sanitize_html(&raw).unwrap(), DOC);
    }

    #[test]
    fn fragment_is_rejected() {
        assert_eq!(sanitize_html("<p>not a document</p>"), Err(InvalidHtml));
    }

    #[test]
    fn prose_before_document_is_rejected() {
        let raw = format!("Here is your game:\n{}", DOC);
        assert_eq!(sanitize_html(&raw), Err(InvalidHtml));
    }

    #[test]
    fn empty_and_short_input_is_rejected() {
        assert_eq!(sanitize_html(""), Err(InvalidHtml));
        assert_eq!(sanitize_html("```"), Err(InvalidHtml));
        assert_eq!(sanitize_html("<!doc"), Err(InvalidHtml));
    }

    #[test]
    fn multibyte_prefix_does_not_panic() {
        assert_eq!(sanitize_html("ééééééééééééééé"), Err(InvalidHtml));
    }
}
