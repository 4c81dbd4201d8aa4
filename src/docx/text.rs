use crate::error::Result;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Linearize a document body XML into its non-empty text lines.
///
/// Character data before the first `body` element is suppressed; once
/// the body has been entered the flag never resets for the rest of the
/// pass. Each emitted line is whitespace-trimmed and guaranteed
/// non-empty. End of input terminates normally.
pub fn body_lines(xml: &[u8]) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut lines = Vec::new();
    let mut in_body = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) => {
                if !in_body && e.local_name().as_ref().eq_ignore_ascii_case(b"body") {
                    in_body = true;
                }
            }
            Event::Text(ref t) => {
                if in_body {
                    let text = t.unescape()?;
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        lines.push(trimmed.to_string());
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    Ok(lines)
}
