use crate::HtmlError;
use htmd::{
    options::{HeadingStyle, Options},
    HtmlToMarkdown,
};
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, warn};

/// Elements that never carry readable page content.
pub const DEFAULT_REMOVED_TAGS: &[&str] = &[
    "img", "script", "style", "noscript", "iframe", "svg", "canvas", "template", "form", "input",
    "button", "select", "option", "label", "dialog", "aside", "picture", "source", "video",
    "audio", "link", "meta", "object", "embed", "nav",
];

/// Blocks removed by the regex fallback before all remaining tags are stripped.
const FALLBACK_REMOVED_BLOCKS: &[&str] = &["script", "style", "header", "footer", "nav"];

/// Parses `html` permissively and detaches every element matching `tags`.
///
/// `None` uses [`DEFAULT_REMOVED_TAGS`]. An empty slice returns the input untouched.
pub fn clean_html(html: &str, tags: Option<&[&str]>) -> String {
    let tags = tags.unwrap_or(DEFAULT_REMOVED_TAGS);
    if tags.is_empty() {
        return html.to_string();
    }

    let mut document = Html::parse_document(html);
    let mut doomed = Vec::new();
    for tag in tags {
        let Ok(selector) = Selector::parse(tag) else {
            debug!("Skipping unparseable selector '{tag}'");
            continue;
        };
        doomed.extend(document.select(&selector).map(|element| element.id()));
    }

    for id in doomed {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    promote_header_rows(&mut document);
    document.html()
}

/// Moves a leading row of `<th>` cells out of `<tbody>` into a new `<thead>`.
///
/// The parser puts header rows of a `<thead>`-less table into `<tbody>`, where
/// the Markdown converter only reads `<td>` cells.
fn promote_header_rows(document: &mut Html) {
    let Ok(tables) = Selector::parse("table") else {
        return;
    };

    let mut promotions = Vec::new();
    for table in document.select(&tables) {
        let mut sections = table.children().filter_map(ElementRef::wrap);
        if sections.clone().any(|s| s.value().name() == "thead") {
            continue;
        }
        let Some(body) = sections.find(|s| s.value().name() == "tbody") else {
            continue;
        };
        let Some(row) = body
            .children()
            .filter_map(ElementRef::wrap)
            .next()
            .filter(|r| r.value().name() == "tr")
        else {
            continue;
        };

        let mut cells = row.children().filter_map(ElementRef::wrap).peekable();
        if cells.peek().is_none() || !cells.all(|c| c.value().name() == "th") {
            continue;
        }

        let mut head = body.value().clone();
        head.name.local = "thead".into();
        head.attrs.clear();
        promotions.push((body.id(), row.id(), head));
    }

    for (body_id, row_id, head) in promotions {
        let Some(mut body) = document.tree.get_mut(body_id) else {
            continue;
        };
        let head_id = body.insert_before(Node::Element(head)).id();
        if let Some(mut head) = document.tree.get_mut(head_id) {
            head.append_id(row_id);
        }
    }
}

/// Converts HTML into tidy Markdown, keeping headings and tables.
///
/// Fails when the converter errors or nothing readable is left.
pub fn html_to_clean_markdown(html: &str) -> Result<String, HtmlError> {
    let cleaned = clean_html(html, None);
    let converter = HtmlToMarkdown::builder()
        .skip_tags(DEFAULT_REMOVED_TAGS.to_vec())
        .options(Options {
            heading_style: HeadingStyle::Atx,
            ..Default::default()
        })
        .build();
    let markdown = converter.convert(&cleaned)?;

    let trailing_blanks = Regex::new(r"[ \t]+\n")?;
    let blank_runs = Regex::new(r"\n{3,}")?;
    let markdown = trailing_blanks.replace_all(&markdown, "\n");
    let markdown = blank_runs.replace_all(&markdown, "\n\n");
    let markdown = markdown.trim();

    if markdown.is_empty() {
        return Err(HtmlError::EmptyContent);
    }
    Ok(markdown.to_string())
}

/// Flattens Markdown (or any lightly marked-up text) into a single line.
///
/// Backslash escapes added by the converter are removed.
pub fn markdown_to_plain_text(markdown: &str) -> Result<String, HtmlError> {
    let escapes = Regex::new(r"\\([\\`*_{}\[\]()#+\-.!|])")?;
    let tags = Regex::new(r"<[^>]*>")?;
    let unescaped = escapes.replace_all(markdown, "$1");
    let stripped = tags.replace_all(&unescaped, " ");
    let decoded = html_escape::decode_html_entities(&stripped);
    collapse_whitespace(&decoded)
}

/// Lossy regex-only extraction used when the Markdown converter fails.
pub fn fallback_plain_text(html: &str) -> Result<String, HtmlError> {
    let mut text = html.to_string();
    for tag in FALLBACK_REMOVED_BLOCKS {
        let block = Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>"))?;
        text = block.replace_all(&text, " ").into_owned();
    }
    markdown_to_plain_text(&text)
}

/// Reduces a fetched page to flat text.
///
/// The Markdown path is tried first; if it fails, the regex fallback runs
/// instead and its use is only logged. An empty result from both paths is an
/// error.
pub fn page_to_text(html: &str) -> Result<String, HtmlError> {
    let primary = html_to_clean_markdown(html).and_then(|md| markdown_to_plain_text(&md));

    let text = match primary {
        Ok(text) if !text.is_empty() => text,
        Ok(_) => {
            warn!("Markdown conversion yielded no text, using fallback cleanup");
            fallback_plain_text(html)?
        }
        Err(e) => {
            warn!("Markdown conversion failed ({e}), using fallback cleanup");
            fallback_plain_text(html)?
        }
    };

    if text.is_empty() {
        return Err(HtmlError::EmptyContent);
    }
    Ok(text)
}

fn collapse_whitespace(text: &str) -> Result<String, HtmlError> {
    let whitespace = Regex::new(r"\s+")?;
    Ok(whitespace.replace_all(text, " ").trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        let collapsed = collapse_whitespace("  a\n\n b\t\tc  ").unwrap();
        assert_eq!(collapsed, "a b c");
    }

    #[test]
    fn test_markdown_to_plain_text_strips_tags_and_entities() {
        let text = markdown_to_plain_text("# Title\n\n<span>Fish &amp; chips</span>\n\n").unwrap();
        assert_eq!(text, "# Title Fish & chips");
    }

    #[test]
    fn test_markdown_to_plain_text_drops_backslash_escapes() {
        let text = markdown_to_plain_text(r"more\_stuff \*x\* 1\. done \\ \[a\]").unwrap();
        assert_eq!(text, r"more_stuff *x* 1. done \ [a]");
    }

    #[test]
    fn test_fallback_removes_boilerplate_blocks() {
        let html = "<HEADER>Site</HEADER><p>Body</p><Script type=\"x\">var a = 1;</Script><footer>(c)</footer>";
        let text = fallback_plain_text(html).unwrap();
        assert_eq!(text, "Body");
    }
}
