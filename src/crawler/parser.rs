//! Sitemap XML text extraction
//!
//! Walks an XML document with a streaming reader and collects the text of
//! every element whose path matches a [`SelectionPattern`].

use crate::crawler::SelectionPattern;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Extracts the text content of all elements matching `pattern`
///
/// The text of a match is the concatenation of all text and CDATA nodes
/// beneath it, trimmed. Matches with no text are skipped. Element names are
/// compared by local name, so `<sm:loc>` matches a `loc` segment.
///
/// # Arguments
///
/// * `xml` - The raw document bytes
/// * `pattern` - The selection pattern
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Matched text values in document order
/// * `Err(String)` - The document is not well-formed XML or ends early
///
/// # Example
///
/// ```
/// use sitemap_batcher::crawler::{select_text, SelectionPattern};
///
/// let xml = br#"<urlset><url><loc>https://example.com/p/1</loc></url></urlset>"#;
/// let pattern = SelectionPattern::parse("//url/loc").unwrap();
/// assert_eq!(select_text(xml, &pattern).unwrap(), vec!["https://example.com/p/1"]);
/// ```
pub fn select_text(xml: &[u8], pattern: &SelectionPattern) -> Result<Vec<String>, String> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut matches = Vec::new();

    // Depth of the element currently being captured and its text so far
    let mut capture: Option<(usize, String)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                path.push(name);
                if capture.is_none() && pattern.matches(path.as_slice()) {
                    capture = Some((path.len(), String::new()));
                }
            }
            Ok(Event::Empty(_)) => {
                // Self-closing elements carry no text
            }
            Ok(Event::End(_)) => {
                if let Some((depth, _)) = &capture {
                    if *depth == path.len() {
                        if let Some((_, text)) = capture.take() {
                            let text = text.trim();
                            if !text.is_empty() {
                                matches.push(text.to_string());
                            }
                        }
                    }
                }
                path.pop();
            }
            Ok(Event::Text(t)) => {
                if let Some((_, text)) = capture.as_mut() {
                    let unescaped = t.unescape().map_err(|e| {
                        format!("bad text at byte {}: {}", reader.buffer_position(), e)
                    })?;
                    text.push_str(&unescaped);
                }
            }
            Ok(Event::CData(c)) => {
                if let Some((_, text)) = capture.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Ok(Event::Eof) => {
                if !path.is_empty() {
                    return Err(format!(
                        "unexpected end of document inside <{}>",
                        path.join("/")
                    ));
                }
                break;
            }
            Err(e) => {
                return Err(format!(
                    "malformed XML at byte {}: {}",
                    reader.buffer_position(),
                    e
                ))
            }
            _ => {}
        }
    }

    Ok(matches)
}
