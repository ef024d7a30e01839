//! Minimal markup tokenizer for filter script documents
//!
//! The document format uses a small, fixed subset of XML: an optional
//! declaration, a doctype line, comments, and nested element tags whose
//! attributes are double- or single-quoted. This tokenizer handles exactly
//! that subset and reports anything else as a structural error, with 1-based
//! line numbers for diagnostics.

use crate::{ParseError, Result};

/// An element tag with its decoded attributes in document order
#[derive(Debug, Clone)]
pub(crate) struct Tag {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub line: usize,
}

impl Tag {
    /// Look up an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A markup event; declarations and comments are consumed silently
#[derive(Debug)]
pub(crate) enum Event {
    Doctype { content: String, line: usize },
    Start(Tag),
    Empty(Tag),
    End { name: String, line: usize },
}

pub(crate) struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
        }
    }

    /// Current 1-based line number
    pub fn line(&self) -> usize {
        self.line
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn advance(&mut self, n: usize) {
        let consumed = &self.input[self.pos..self.pos + n];
        self.line += consumed.bytes().filter(|&b| b == b'\n').count();
        self.pos += n;
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start();
        self.advance(rest.len() - trimmed.len());
    }

    fn malformed(&self, message: impl Into<String>) -> ParseError {
        ParseError::Malformed {
            line: self.line,
            message: message.into(),
        }
    }

    /// Next markup event, or `None` at end of input
    pub fn next_event(&mut self) -> Result<Option<Event>> {
        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.is_empty() {
                return Ok(None);
            }
            if !rest.starts_with('<') {
                let token: String = rest
                    .chars()
                    .take_while(|c| !c.is_whitespace() && *c != '<')
                    .collect();
                return Err(self.malformed(format!("unexpected text content '{}'", token)));
            }
            if rest.starts_with("<?") {
                let end = rest
                    .find("?>")
                    .ok_or_else(|| self.malformed("unterminated processing instruction"))?;
                self.advance(end + 2);
                continue;
            }
            if rest.starts_with("<!--") {
                let end = rest
                    .find("-->")
                    .ok_or_else(|| self.malformed("unterminated comment"))?;
                self.advance(end + 3);
                continue;
            }
            if rest.starts_with("<!DOCTYPE") {
                let line = self.line;
                let end = rest
                    .find('>')
                    .ok_or_else(|| self.malformed("unterminated doctype declaration"))?;
                let content = rest["<!DOCTYPE".len()..end].trim().to_string();
                self.advance(end + 1);
                return Ok(Some(Event::Doctype { content, line }));
            }
            if rest.starts_with("<!") {
                return Err(self.malformed("unsupported markup declaration"));
            }
            if rest.starts_with("</") {
                let line = self.line;
                self.advance(2);
                let name = self.read_name()?;
                self.skip_whitespace();
                if !self.rest().starts_with('>') {
                    return Err(self.malformed(format!("malformed closing tag </{}", name)));
                }
                self.advance(1);
                return Ok(Some(Event::End { name, line }));
            }
            return self.read_element_tag().map(Some);
        }
    }

    fn read_element_tag(&mut self) -> Result<Event> {
        let line = self.line;
        self.advance(1);
        let name = self.read_name()?;
        let mut attrs: Vec<(String, String)> = Vec::new();
        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.starts_with("/>") {
                self.advance(2);
                return Ok(Event::Empty(Tag { name, attrs, line }));
            }
            if rest.starts_with('>') {
                self.advance(1);
                return Ok(Event::Start(Tag { name, attrs, line }));
            }
            if rest.is_empty() {
                return Err(self.malformed(format!("unterminated <{}> tag", name)));
            }
            let attr_name = self.read_name()?;
            self.skip_whitespace();
            if !self.rest().starts_with('=') {
                return Err(self.malformed(format!("attribute '{}' has no value", attr_name)));
            }
            self.advance(1);
            self.skip_whitespace();
            let quote = match self.rest().chars().next() {
                Some(q @ ('"' | '\'')) => q,
                _ => {
                    return Err(
                        self.malformed(format!("attribute '{}' value is not quoted", attr_name))
                    )
                }
            };
            self.advance(1);
            let rest = self.rest();
            let end = rest.find(quote).ok_or_else(|| {
                self.malformed(format!("unterminated value for attribute '{}'", attr_name))
            })?;
            let value = decode_entities(&rest[..end], self.line)?;
            self.advance(end + 1);
            attrs.push((attr_name, value));
        }
    }

    fn read_name(&mut self) -> Result<String> {
        let rest = self.rest();
        let len: usize = rest
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':' | '.'))
            .map(char::len_utf8)
            .sum();
        if len == 0 {
            return Err(self.malformed("expected a name"));
        }
        let name = rest[..len].to_string();
        self.advance(len);
        Ok(name)
    }
}

/// Decode the five named entities plus decimal/hex character references
pub(crate) fn decode_entities(raw: &str, line: usize) -> Result<String> {
    if !raw.contains('&') {
        return Ok(raw.to_string());
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(idx) = rest.find('&') {
        out.push_str(&rest[..idx]);
        rest = &rest[idx..];
        let end = rest.find(';').ok_or(ParseError::Malformed {
            line,
            message: format!("unterminated entity in '{}'", raw),
        })?;
        let entity = &rest[1..end];
        match entity {
            "amp" => out.push('&'),
            "lt" => out.push('<'),
            "gt" => out.push('>'),
            "quot" => out.push('"'),
            "apos" => out.push('\''),
            _ if entity.starts_with('#') => {
                let digits = &entity[1..];
                let code = if let Some(hex) = digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
                    u32::from_str_radix(hex, 16).ok()
                } else {
                    digits.parse::<u32>().ok()
                };
                let ch = code.and_then(char::from_u32).ok_or(ParseError::Malformed {
                    line,
                    message: format!("invalid character reference '&{};'", entity),
                })?;
                out.push(ch);
            }
            _ => {
                return Err(ParseError::Malformed {
                    line,
                    message: format!("unknown entity '&{};'", entity),
                })
            }
        }
        rest = &rest[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Escape an attribute value for output; newlines become character
/// references so values stay on one line.
pub(crate) fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("&#x0a;"),
            '\r' => out.push_str("&#x0d;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_events(input: &str) -> Vec<Event> {
        let mut tokens = Tokenizer::new(input);
        let mut events = Vec::new();
        while let Some(event) = tokens.next_event().unwrap() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_basic_document_events() {
        let events = collect_events(
            "<!DOCTYPE FilterScript>\n<FilterScript>\n <filter name=\"a\"/>\n</FilterScript>\n",
        );
        assert_eq!(events.len(), 4);
        match &events[0] {
            Event::Doctype { content, line } => {
                assert_eq!(content, "FilterScript");
                assert_eq!(*line, 1);
            }
            other => panic!("expected doctype, got {:?}", other),
        }
        match &events[2] {
            Event::Empty(tag) => {
                assert_eq!(tag.name, "filter");
                assert_eq!(tag.attr("name"), Some("a"));
                assert_eq!(tag.line, 3);
            }
            other => panic!("expected empty filter tag, got {:?}", other),
        }
        assert!(matches!(&events[3], Event::End { name, line: 4 } if name == "FilterScript"));
    }

    #[test]
    fn test_declaration_and_comments_skipped() {
        let events = collect_events(
            "<?xml version=\"1.0\"?>\n<!-- saved by the tool -->\n<!DOCTYPE FilterScript>\n<FilterScript/>",
        );
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], Event::Doctype { .. }));
        assert!(matches!(&events[1], Event::Empty(tag) if tag.name == "FilterScript"));
    }

    #[test]
    fn test_attribute_entities_decoded() {
        let events =
            collect_events("<Param tooltip=\"a &lt;br&gt; b&#x0a;c &amp; d\" value='0'/>");
        match &events[0] {
            Event::Empty(tag) => {
                assert_eq!(tag.attr("tooltip"), Some("a <br> b\nc & d"));
                assert_eq!(tag.attr("value"), Some("0"));
            }
            other => panic!("expected empty tag, got {:?}", other),
        }
    }

    #[test]
    fn test_text_content_rejected() {
        let mut tokens = Tokenizer::new("<FilterScript>stray</FilterScript>");
        tokens.next_event().unwrap();
        assert!(matches!(
            tokens.next_event(),
            Err(ParseError::Malformed { .. })
        ));
    }

    #[test]
    fn test_unquoted_attribute_rejected() {
        let mut tokens = Tokenizer::new("<filter name=a/>");
        assert!(matches!(
            tokens.next_event(),
            Err(ParseError::Malformed { .. })
        ));
    }

    #[test]
    fn test_unterminated_tag_rejected() {
        let mut tokens = Tokenizer::new("<filter name=\"a\"");
        assert!(matches!(
            tokens.next_event(),
            Err(ParseError::Malformed { .. })
        ));
    }

    #[test]
    fn test_unknown_entity_rejected() {
        assert!(decode_entities("&nbsp;", 1).is_err());
        assert!(decode_entities("&#x110000;", 1).is_err());
        assert!(decode_entities("&amp", 1).is_err());
    }

    #[test]
    fn test_escape_roundtrip() {
        let raw = "Quality threshold <br> range [0..1]\n \"half\" & more";
        let decoded = decode_entities(&escape_attr(raw), 1).unwrap();
        assert_eq!(decoded, raw);
    }
}
