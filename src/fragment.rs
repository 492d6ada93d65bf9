//! HTML fragment post-processing.
//!
//! The converter's snippet mode wraps even a one-line value in a block
//! element (`<p>…</p>`). [`inner_html`] strips exactly that outermost tag so
//! converted snippets can be inlined without an extra wrapper, keeping all
//! nested markup and text intact.
//!
//! Precondition: the input parses as XML with a single root element, which
//! snippet-mode output satisfies. Anything else is a `MalformedFragment`.

use crate::error::NotaError;
use anyhow::Result;
use quick_xml::{Reader, Writer, events::Event};
use std::io::Cursor;

/// Strip the outermost tag from a single-root fragment.
///
/// `<div>hello<b>world</b></div>` becomes `hello<b>world</b>`. Empty (or
/// whitespace-only) input yields an empty string without error.
pub fn inner_html(fragment: &str) -> Result<String> {
    if fragment.trim().is_empty() {
        return Ok(String::new());
    }

    let mut reader = Reader::from_str(fragment);
    reader.config_mut().trim_text(false);

    match skip_to_root(&mut reader)? {
        // Self-closing root: nothing inside, nothing to emit
        Root::Empty => {
            reject_trailing_content(&mut reader)?;
            return Ok(String::new());
        }
        Root::Start => {}
    }

    let mut writer = Writer::new(Cursor::new(Vec::new()));
    let mut depth = 1usize;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Eof => {
                return Err(NotaError::MalformedFragment(
                    "root element is never closed".into(),
                )
                .into());
            }
            Event::Start(start) => {
                depth += 1;
                writer.write_event(Event::Start(start)).map_err(malformed)?;
            }
            Event::End(end) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
                writer.write_event(Event::End(end)).map_err(malformed)?;
            }
            event => writer.write_event(event).map_err(malformed)?,
        }
    }

    reject_trailing_content(&mut reader)?;

    let bytes = writer.into_inner().into_inner();
    // Input was a &str and events pass through unmodified, so this holds
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// How the root element opened.
enum Root {
    /// `<tag>…</tag>`: inner events follow.
    Start,
    /// `<tag/>`: the root has no content.
    Empty,
}

/// Consume events up to the root element's start tag.
fn skip_to_root(reader: &mut Reader<&[u8]>) -> Result<Root> {
    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(_) => return Ok(Root::Start),
            Event::Empty(_) => return Ok(Root::Empty),
            Event::Decl(_) | Event::PI(_) | Event::Comment(_) => continue,
            Event::Text(text) => {
                let text = text.xml_content().map_err(malformed)?;
                if !text.trim().is_empty() {
                    return Err(NotaError::MalformedFragment(
                        "content before the root element".into(),
                    )
                    .into());
                }
            }
            _ => {
                return Err(NotaError::MalformedFragment(
                    "expected a single root element".into(),
                )
                .into());
            }
        }
    }
}

/// After the root closes, only whitespace may remain; a second element means
/// the input was not a single-root fragment.
fn reject_trailing_content(reader: &mut Reader<&[u8]>) -> Result<()> {
    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Eof => return Ok(()),
            Event::Text(text) => {
                let text = text.xml_content().map_err(malformed)?;
                if !text.trim().is_empty() {
                    return Err(NotaError::MalformedFragment(
                        "content after the root element".into(),
                    )
                    .into());
                }
            }
            _ => {
                return Err(NotaError::MalformedFragment(
                    "multiple root elements".into(),
                )
                .into());
            }
        }
    }
}

fn malformed(err: impl std::fmt::Display) -> NotaError {
    NotaError::MalformedFragment(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_outer_tag() {
        assert_eq!(
            inner_html("<div>hello<b>world</b></div>").unwrap(),
            "hello<b>world</b>"
        );
    }

    #[test]
    fn test_keeps_nested_structure_and_tail_text() {
        assert_eq!(
            inner_html("<p>a<em>b</em>c<span><i>d</i></span>e</p>").unwrap(),
            "a<em>b</em>c<span><i>d</i></span>e"
        );
    }

    #[test]
    fn test_keeps_attributes() {
        assert_eq!(
            inner_html(r#"<p><a href="x.html">link</a></p>"#).unwrap(),
            r#"<a href="x.html">link</a>"#
        );
    }

    #[test]
    fn test_preserves_entities() {
        assert_eq!(
            inner_html("<p>a &amp; b &lt;c&gt;</p>").unwrap(),
            "a &amp; b &lt;c&gt;"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(inner_html("").unwrap(), "");
        assert_eq!(inner_html("   \n ").unwrap(), "");
    }

    #[test]
    fn test_self_closing_root() {
        assert_eq!(inner_html("<p/>").unwrap(), "");
        assert_eq!(inner_html("  <hr/>  ").unwrap(), "");
    }

    #[test]
    fn test_text_only_root() {
        assert_eq!(inner_html("<p>just text</p>").unwrap(), "just text");
    }

    #[test]
    fn test_malformed_input_errors() {
        for bad in ["<div>unclosed", "no tags at all", "<a><b></a></b>"] {
            let err = inner_html(bad).unwrap_err();
            assert!(
                err.downcast_ref::<NotaError>().is_some(),
                "expected MalformedFragment for {bad:?}"
            );
        }
    }

    #[test]
    fn test_whitespace_around_root_is_ignored() {
        assert_eq!(
            inner_html("\n  <div>hello<b>world</b></div>\n  ").unwrap(),
            "hello<b>world</b>"
        );
    }

    #[test]
    fn test_escaped_content_outside_root_errors() {
        // Entities decode before the whitespace check on both sides
        for bad in ["&amp; <p>a</p>", "<p>a</p> &amp;"] {
            let err = inner_html(bad).unwrap_err();
            assert!(matches!(
                err.downcast::<NotaError>().unwrap(),
                NotaError::MalformedFragment(_)
            ));
        }
    }

    #[test]
    fn test_multiple_roots_error() {
        let err = inner_html("<p>a</p><p>b</p>").unwrap_err();
        let err = err.downcast::<NotaError>().unwrap();
        assert!(matches!(err, NotaError::MalformedFragment(_)));
    }
}
