//! The `.mlx` filter script document format
//!
//! A document is a doctype declaration naming `FilterScript`, a single
//! `<FilterScript>` root, `<filter name="...">` children in application
//! order, and `<Param>` entries carrying `name`/`type`/`value` plus the
//! human-readable `description` and `tooltip` attributes. The richer
//! parameter kinds store extra sibling attributes (enum labels, value
//! ranges, color channels).

use crate::markup::{escape_attr, Event, Tag, Tokenizer};
use crate::{ParseError, Result};
use mlxscript_core::{Filter, FilterScript, Param, ParamKind, ParamValue};
use std::fs;
use std::path::Path;

const DOCTYPE: &str = "FilterScript";
const ROOT: &str = "FilterScript";
const FILTER: &str = "filter";
const PARAM: &str = "Param";

/// Reads `.mlx` documents into [`FilterScript`] values
pub struct ScriptReader;

/// Writes [`FilterScript`] values back out as `.mlx` documents
pub struct ScriptWriter;

impl ScriptReader {
    /// Read a filter script from a file
    pub fn read_script<P: AsRef<Path>>(path: P) -> Result<FilterScript> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a filter script document from text
    pub fn parse(input: &str) -> Result<FilterScript> {
        let mut tokens = Tokenizer::new(input);
        let mut saw_doctype = false;
        loop {
            match tokens.next_event()? {
                Some(Event::Doctype { content, line }) => {
                    if saw_doctype {
                        return Err(ParseError::Malformed {
                            line,
                            message: "repeated doctype declaration".to_string(),
                        });
                    }
                    if content != DOCTYPE {
                        return Err(ParseError::WrongDoctype { found: content });
                    }
                    saw_doctype = true;
                }
                Some(Event::Start(tag)) => {
                    if !saw_doctype {
                        return Err(ParseError::MissingDoctype);
                    }
                    if tag.name != ROOT {
                        return Err(ParseError::UnexpectedElement {
                            element: tag.name,
                            line: tag.line,
                        });
                    }
                    let script = Self::parse_filters(&mut tokens)?;
                    Self::expect_end_of_document(&mut tokens)?;
                    return Ok(script);
                }
                Some(Event::Empty(tag)) => {
                    if !saw_doctype {
                        return Err(ParseError::MissingDoctype);
                    }
                    if tag.name != ROOT {
                        return Err(ParseError::UnexpectedElement {
                            element: tag.name,
                            line: tag.line,
                        });
                    }
                    Self::expect_end_of_document(&mut tokens)?;
                    return Ok(FilterScript::new());
                }
                Some(Event::End { name, line }) => {
                    return Err(ParseError::Malformed {
                        line,
                        message: format!("unexpected closing tag </{}>", name),
                    });
                }
                None => {
                    return Err(if saw_doctype {
                        ParseError::Malformed {
                            line: tokens.line(),
                            message: "missing FilterScript root element".to_string(),
                        }
                    } else {
                        ParseError::MissingDoctype
                    });
                }
            }
        }
    }

    fn parse_filters(tokens: &mut Tokenizer<'_>) -> Result<FilterScript> {
        let mut script = FilterScript::new();
        loop {
            match tokens.next_event()? {
                Some(Event::Empty(tag)) if tag.name == FILTER => {
                    let name = required(&tag, "name")?;
                    script.push(Filter::new(name));
                }
                Some(Event::Start(tag)) if tag.name == FILTER => {
                    let name = required(&tag, "name")?.to_string();
                    script.push(Self::parse_filter_body(tokens, name)?);
                }
                Some(Event::End { name, .. }) if name == ROOT => return Ok(script),
                Some(Event::Start(tag)) | Some(Event::Empty(tag)) => {
                    return Err(ParseError::UnexpectedElement {
                        element: tag.name,
                        line: tag.line,
                    });
                }
                Some(Event::End { name, line }) => {
                    return Err(ParseError::Malformed {
                        line,
                        message: format!("mismatched closing tag </{}>", name),
                    });
                }
                Some(Event::Doctype { line, .. }) => {
                    return Err(ParseError::Malformed {
                        line,
                        message: "doctype declaration inside the document body".to_string(),
                    });
                }
                None => {
                    return Err(ParseError::Malformed {
                        line: tokens.line(),
                        message: "unclosed FilterScript root element".to_string(),
                    });
                }
            }
        }
    }

    fn parse_filter_body(tokens: &mut Tokenizer<'_>, name: String) -> Result<Filter> {
        let mut filter = Filter::new(name);
        loop {
            match tokens.next_event()? {
                Some(Event::Empty(tag)) if tag.name == PARAM => {
                    Self::push_param(&mut filter, &tag)?;
                }
                Some(Event::Start(tag)) if tag.name == PARAM => {
                    // The tool writes params as empty elements; tolerate an
                    // immediately closed pair as well.
                    Self::push_param(&mut filter, &tag)?;
                    match tokens.next_event()? {
                        Some(Event::End { name, .. }) if name == PARAM => {}
                        _ => {
                            return Err(ParseError::Malformed {
                                line: tag.line,
                                message: format!(
                                    "parameter element <{}> must be empty",
                                    PARAM
                                ),
                            });
                        }
                    }
                }
                Some(Event::End { name, .. }) if name == FILTER => return Ok(filter),
                Some(Event::Start(tag)) | Some(Event::Empty(tag)) => {
                    return Err(ParseError::UnexpectedElement {
                        element: tag.name,
                        line: tag.line,
                    });
                }
                Some(Event::End { name, line }) => {
                    return Err(ParseError::Malformed {
                        line,
                        message: format!("mismatched closing tag </{}>", name),
                    });
                }
                Some(Event::Doctype { line, .. }) => {
                    return Err(ParseError::Malformed {
                        line,
                        message: "doctype declaration inside the document body".to_string(),
                    });
                }
                None => {
                    return Err(ParseError::Malformed {
                        line: tokens.line(),
                        message: format!("unclosed <{}> element", FILTER),
                    });
                }
            }
        }
    }

    fn push_param(filter: &mut Filter, tag: &Tag) -> Result<()> {
        let param = Self::parse_param(tag)?;
        if filter.param(&param.name).is_some() {
            return Err(ParseError::DuplicateParam {
                filter: filter.name.clone(),
                param: param.name,
                line: tag.line,
            });
        }
        filter.push_param(param)?;
        Ok(())
    }

    fn parse_param(tag: &Tag) -> Result<Param> {
        let line = tag.line;
        let name = required(tag, "name")?;
        let token = required(tag, "type")?;
        let kind = ParamKind::from_token(token).ok_or_else(|| ParseError::UnknownParamType {
            token: token.to_string(),
            line,
        })?;

        let value = match kind {
            ParamKind::Int => ParamValue::Int(parse_int(required(tag, "value")?, name, kind, line)?),
            ParamKind::Float => {
                ParamValue::Float(parse_float(required(tag, "value")?, name, kind, line)?)
            }
            ParamKind::Bool => match required(tag, "value")? {
                "true" => ParamValue::Bool(true),
                "false" => ParamValue::Bool(false),
                other => return Err(invalid(name, kind, other, line)),
            },
            ParamKind::String => ParamValue::String(required(tag, "value")?.to_string()),
            ParamKind::Enum => {
                let index = parse_int(required(tag, "value")?, name, kind, line)?;
                let items = parse_enum_items(tag, name, line)?;
                ParamValue::Enum { index, items }
            }
            ParamKind::AbsPerc => ParamValue::AbsPerc {
                value: parse_float(required(tag, "value")?, name, kind, line)?,
                min: parse_float(required(tag, "min")?, name, kind, line)?,
                max: parse_float(required(tag, "max")?, name, kind, line)?,
            },
            ParamKind::Color => ParamValue::Color {
                r: parse_channel(required(tag, "r")?, name, line)?,
                g: parse_channel(required(tag, "g")?, name, line)?,
                b: parse_channel(required(tag, "b")?, name, line)?,
                a: parse_channel(required(tag, "a")?, name, line)?,
            },
        };

        Ok(Param {
            name: name.to_string(),
            value,
            description: tag.attr("description").unwrap_or_default().to_string(),
            tooltip: tag.attr("tooltip").unwrap_or_default().to_string(),
        })
    }

    fn expect_end_of_document(tokens: &mut Tokenizer<'_>) -> Result<()> {
        match tokens.next_event()? {
            None => Ok(()),
            Some(Event::Start(tag)) | Some(Event::Empty(tag)) => Err(ParseError::Malformed {
                line: tag.line,
                message: format!("content after the root element: <{}>", tag.name),
            }),
            Some(Event::End { name, line }) => Err(ParseError::Malformed {
                line,
                message: format!("unexpected closing tag </{}>", name),
            }),
            Some(Event::Doctype { line, .. }) => Err(ParseError::Malformed {
                line,
                message: "doctype declaration after the root element".to_string(),
            }),
        }
    }
}

fn required<'t>(tag: &'t Tag, attribute: &'static str) -> Result<&'t str> {
    tag.attr(attribute).ok_or_else(|| ParseError::MissingAttribute {
        element: tag.name.clone(),
        attribute,
        line: tag.line,
    })
}

fn parse_int(raw: &str, param: &str, kind: ParamKind, line: usize) -> Result<i32> {
    raw.trim()
        .parse()
        .map_err(|_| invalid(param, kind, raw, line))
}

fn parse_float(raw: &str, param: &str, kind: ParamKind, line: usize) -> Result<f32> {
    let value: f32 = raw
        .trim()
        .parse()
        .map_err(|_| invalid(param, kind, raw, line))?;
    // The format allows only finite decimals
    if !value.is_finite() {
        return Err(invalid(param, kind, raw, line));
    }
    Ok(value)
}

fn parse_channel(raw: &str, param: &str, line: usize) -> Result<u8> {
    raw.trim()
        .parse()
        .map_err(|_| invalid(param, ParamKind::Color, raw, line))
}

fn parse_enum_items(tag: &Tag, param: &str, line: usize) -> Result<Vec<String>> {
    let count = match tag.attr("enum_cardinality") {
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| invalid(param, ParamKind::Enum, raw, line))?,
        None => return Ok(Vec::new()),
    };
    let mut items = Vec::with_capacity(count);
    for i in 0..count {
        let key = format!("enum_val{}", i);
        let item = tag.attr(&key).ok_or_else(|| ParseError::Malformed {
            line,
            message: format!("missing attribute '{}' on enum parameter '{}'", key, param),
        })?;
        items.push(item.to_string());
    }
    Ok(items)
}

fn invalid(param: &str, kind: ParamKind, value: &str, line: usize) -> ParseError {
    ParseError::InvalidValue {
        param: param.to_string(),
        kind,
        value: value.to_string(),
        line,
    }
}

impl ScriptWriter {
    /// Write a filter script document to a file
    pub fn write_script<P: AsRef<Path>>(script: &FilterScript, path: P) -> Result<()> {
        fs::write(path, Self::to_document(script))?;
        Ok(())
    }

    /// Serialize a script to document text.
    ///
    /// Attributes are emitted in the order the tool saves them; parsing the
    /// result yields a script equal to the input.
    pub fn to_document(script: &FilterScript) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE FilterScript>\n");
        if script.is_empty() {
            out.push_str("<FilterScript/>\n");
            return out;
        }
        out.push_str("<FilterScript>\n");
        for filter in script {
            if filter.params().is_empty() {
                out.push_str(&format!(" <filter name=\"{}\"/>\n", escape_attr(&filter.name)));
            } else {
                out.push_str(&format!(" <filter name=\"{}\">\n", escape_attr(&filter.name)));
                for param in filter.params() {
                    Self::write_param(&mut out, param);
                }
                out.push_str(" </filter>\n");
            }
        }
        out.push_str("</FilterScript>\n");
        out
    }

    fn write_param(out: &mut String, param: &Param) {
        out.push_str(&format!("  <Param type=\"{}\"", param.kind().token()));
        if let Some(literal) = param.value.literal() {
            out.push_str(&format!(" value=\"{}\"", escape_attr(&literal)));
        }
        out.push_str(&format!(" name=\"{}\"", escape_attr(&param.name)));
        match &param.value {
            ParamValue::Enum { items, .. } => {
                for (i, item) in items.iter().enumerate() {
                    out.push_str(&format!(" enum_val{}=\"{}\"", i, escape_attr(item)));
                }
                out.push_str(&format!(" enum_cardinality=\"{}\"", items.len()));
            }
            ParamValue::AbsPerc { min, max, .. } => {
                out.push_str(&format!(" min=\"{}\" max=\"{}\"", min, max));
            }
            ParamValue::Color { r, g, b, a } => {
                out.push_str(&format!(" r=\"{}\" g=\"{}\" b=\"{}\" a=\"{}\"", r, g, b, a));
            }
            _ => {}
        }
        out.push_str(&format!(
            " description=\"{}\" tooltip=\"{}\"/>\n",
            escape_attr(&param.description),
            escape_attr(&param.tooltip)
        ));
    }
}
