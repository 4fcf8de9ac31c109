use crate::error::{Error, Result};
use crate::schema::{Region, RowLayout, ITEM, ITEM_MOD};

/// One dump line split into its comma-separated regions
#[derive(Debug, Clone, PartialEq)]
pub struct SplitLine<'a> {
    pub line: &'a str,
    /// Parts before the first quote, or the whole line when unquoted
    pub lead: Vec<&'a str>,
    pub name: Option<&'a str>,
    /// Parts after the last quote
    pub tail: Vec<&'a str>,
}

impl<'a> SplitLine<'a> {
    pub fn region(&self, region: Region) -> &[&'a str] {
        match region {
            Region::Lead => &self.lead,
            Region::Tail => &self.tail,
        }
    }

    /// Part count the row kind is decided on
    pub fn data_count(&self) -> usize {
        if self.name.is_some() {
            self.tail.len()
        } else {
            self.lead.len()
        }
    }
}

/// Which dump a line came from, since the same shape means different
/// things in different files
#[derive(Debug, Clone, Copy)]
pub enum DumpContext {
    Items,
    Spells,
    Fixed(&'static RowLayout),
}

/// What a line turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Item,
    ItemMod,
    Spell,
    SpellEffect,
    SpellPower,
    Fixed,
    Skip,
}

/// Split a line into lead, name and tail. Comments and blank lines give `None`.
pub fn split_line(line: &str) -> Option<SplitLine<'_>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with('#') {
        return None;
    }

    match (line.find('"'), line.rfind('"')) {
        (Some(first), Some(last)) if first < last => Some(SplitLine {
            line,
            lead: split_parts(&line[..first]),
            name: Some(&line[first + 1..last]),
            tail: {
                let mut tail = split_parts(&line[last + 1..]);
                // the comma right after the closing quote opens the data
                if tail.first() == Some(&"") {
                    tail.remove(0);
                }
                tail
            },
        }),
        (Some(first), Some(_)) => Some(SplitLine {
            line,
            lead: split_parts(&line[..first]),
            name: Some(""),
            tail: split_parts(&line[first + 1..]),
        }),
        _ => Some(SplitLine {
            line,
            lead: split_parts(line),
            name: None,
            tail: Vec::new(),
        }),
    }
}

/// Split on commas and strip braces and whitespace from every part.
/// A region holding nothing but braces has no parts.
fn split_parts(text: &str) -> Vec<&str> {
    if text.trim_matches(is_brace_or_space).is_empty() && !text.contains(',') {
        return Vec::new();
    }
    text.split(',').map(|p| p.trim_matches(is_brace_or_space)).collect()
}

fn is_brace_or_space(c: char) -> bool {
    c == '{' || c == '}' || c.is_whitespace()
}

/// Decide the row kind of a split line within a dump
pub fn classify(split: &SplitLine<'_>, context: DumpContext) -> RowKind {
    match context {
        DumpContext::Items => {
            if split.name.is_some() {
                if ITEM.parts.accepts(split.tail.len()) {
                    RowKind::Item
                } else {
                    RowKind::Skip
                }
            } else if ITEM_MOD.parts.accepts(split.lead.len()) {
                RowKind::ItemMod
            } else {
                RowKind::Skip
            }
        }
        DumpContext::Spells => match split.data_count() {
            35 => RowKind::SpellEffect,
            11 if !is_macro_reference(split) => RowKind::SpellPower,
            n if n >= 20 && split.name.is_some() => RowKind::Spell,
            _ => RowKind::Skip,
        },
        DumpContext::Fixed(layout) => {
            let count = split.region(layout.region).len();
            if layout.named == split.name.is_some() && layout.parts.accepts(count) {
                RowKind::Fixed
            } else {
                RowKind::Skip
            }
        }
    }
}

/// Size/marker rows such as `{ SPELLPOWER_SIZE, ... }` carry an identifier
/// where the id should be
fn is_macro_reference(split: &SplitLine<'_>) -> bool {
    split
        .lead
        .first()
        .map(|p| p.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_'))
        .unwrap_or(false)
}

/// Named access to the values of a classified line
pub struct Fields<'s, 'a> {
    layout: &'static RowLayout,
    split: &'s SplitLine<'a>,
}

impl<'s, 'a> Fields<'s, 'a> {
    pub fn new(layout: &'static RowLayout, split: &'s SplitLine<'a>) -> Self {
        Self { layout, split }
    }

    pub fn raw(&self, column: &str) -> Result<&'a str> {
        let index = self.layout.position(column).ok_or_else(|| {
            Error::malformed(
                self.layout.entity,
                self.split.line,
                format!("layout has no column {}", column),
            )
        })?;
        self.split
            .region(self.layout.region)
            .get(index)
            .copied()
            .ok_or_else(|| {
                Error::malformed(
                    self.layout.entity,
                    self.split.line,
                    format!("missing column {}", column),
                )
            })
    }

    pub fn name(&self) -> String {
        self.split.name.unwrap_or_default().to_string()
    }

    pub fn u32(&self, column: &str) -> Result<u32> {
        let raw = self.raw(column)?;
        parse_u32(raw).ok_or_else(|| self.bad(column, raw))
    }

    pub fn u64(&self, column: &str) -> Result<u64> {
        let raw = self.raw(column)?;
        parse_u64(raw).ok_or_else(|| self.bad(column, raw))
    }

    pub fn i32(&self, column: &str) -> Result<i32> {
        let raw = self.raw(column)?;
        parse_i32(raw).ok_or_else(|| self.bad(column, raw))
    }

    pub fn f64(&self, column: &str) -> Result<f64> {
        let raw = self.raw(column)?;
        parse_f64(raw).ok_or_else(|| self.bad(column, raw))
    }

    fn bad(&self, column: &str, raw: &str) -> Error {
        Error::malformed(
            self.layout.entity,
            self.split.line,
            format!("column {} is not numeric: {:?}", column, raw),
        )
    }
}

/// Unsigned decimal, or base-16 with a `0x` prefix
pub fn parse_u64(s: &str) -> Option<u64> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

pub fn parse_u32(s: &str) -> Option<u32> {
    parse_u64(s).and_then(|v| u32::try_from(v).ok())
}

/// Signed decimal; hex values are read as their 32-bit pattern
pub fn parse_i32(s: &str) -> Option<i32> {
    if s.starts_with("0x") || s.starts_with("0X") {
        parse_u32(s).map(|v| v as i32)
    } else {
        s.parse().ok()
    }
}

/// Float with an optional C literal suffix (`1.5f`)
pub fn parse_f64(s: &str) -> Option<f64> {
    s.trim_end_matches(['f', 'F']).parse().ok()
}
