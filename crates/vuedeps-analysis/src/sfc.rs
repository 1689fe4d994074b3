//! Vue Single File Component (SFC) block splitter.
//!
//! Splits a `.vue` source into its top-level `<template>`, `<script>`,
//! `<script setup>`, `<style>` and custom blocks. Only block boundaries and
//! opening-tag attributes are parsed; block contents are returned verbatim.

use memchr::{memchr, memmem};

/// Maximum file size accepted by the splitter (10 MiB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Maximum number of top-level blocks in one component.
pub const MAX_BLOCKS: usize = 100;

/// Errors from splitting a malformed component.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SfcError {
    #[error("file too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("too many top-level blocks: {count} (max: {max})")]
    TooManyBlocks { count: usize, max: usize },

    #[error("unclosed <{tag}> block at byte {position}")]
    UnclosedBlock { tag: String, position: usize },
}

/// One attribute of a block's opening tag. `value` is `None` for bare flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SfcAttr<'a> {
    pub name: &'a str,
    pub value: Option<&'a str>,
}

/// A top-level block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SfcBlock<'a> {
    pub tag: &'a str,
    pub content: &'a str,
    /// Byte offset of `content` in the source
    pub offset: usize,
    pub attrs: Vec<SfcAttr<'a>>,
}

impl<'a> SfcBlock<'a> {
    /// Look up an attribute. `Some(None)` means present without a value.
    pub fn attr(&self, name: &str) -> Option<Option<&'a str>> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// The `lang` attribute value, if any.
    pub fn lang(&self) -> Option<&'a str> {
        self.attr("lang").flatten()
    }
}

/// The blocks of one component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SfcDescriptor<'a> {
    pub template: Option<SfcBlock<'a>>,
    pub script: Option<SfcBlock<'a>>,
    pub script_setup: Option<SfcBlock<'a>>,
    pub styles: Vec<SfcBlock<'a>>,
    pub custom_blocks: Vec<SfcBlock<'a>>,
}

impl<'a> SfcDescriptor<'a> {
    /// The block whose content drives import extraction: `<script setup>` wins.
    pub fn primary_script(&self) -> Option<&SfcBlock<'a>> {
        self.script_setup.as_ref().or(self.script.as_ref())
    }
}

/// Split a component into blocks.
///
/// When a block kind appears more than once the first occurrence is kept.
pub fn split(source: &str) -> Result<SfcDescriptor<'_>, SfcError> {
    if source.len() > MAX_FILE_SIZE {
        return Err(SfcError::FileTooLarge {
            size: source.len(),
            max: MAX_FILE_SIZE,
        });
    }

    let bytes = source.as_bytes();
    let mut descriptor = SfcDescriptor::default();
    let mut pointer = 0;
    let mut count = 0;

    while let Some(offset) = memchr(b'<', &bytes[pointer..]) {
        let start = pointer + offset;

        // Top-level HTML comment
        if bytes[start..].starts_with(b"<!--") {
            pointer = match memmem::find(&bytes[start + 4..], b"-->") {
                Some(end) => start + 4 + end + 3,
                None => break,
            };
            continue;
        }

        let name_start = start + 1;
        let name_len = bytes[name_start..]
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric() || **b == b'-' || **b == b'_')
            .count();
        if name_len == 0 || !bytes[name_start].is_ascii_alphabetic() {
            pointer = start + 1;
            continue;
        }

        let (block, next) = parse_block(source, start, name_start, name_len)?;
        pointer = next;

        count += 1;
        if count > MAX_BLOCKS {
            return Err(SfcError::TooManyBlocks {
                count,
                max: MAX_BLOCKS,
            });
        }

        match block.tag {
            "template" if descriptor.template.is_none() => descriptor.template = Some(block),
            "script" if block.has_attr("setup") => {
                if descriptor.script_setup.is_none() {
                    descriptor.script_setup = Some(block);
                }
            }
            "script" => {
                if descriptor.script.is_none() {
                    descriptor.script = Some(block);
                }
            }
            "style" => descriptor.styles.push(block),
            "template" => {}
            _ => descriptor.custom_blocks.push(block),
        }
    }

    Ok(descriptor)
}

/// Parse the block opening at `start`; returns it and the offset after it.
fn parse_block<'a>(
    source: &'a str,
    start: usize,
    name_start: usize,
    name_len: usize,
) -> Result<(SfcBlock<'a>, usize), SfcError> {
    let bytes = source.as_bytes();
    let tag = &source[name_start..name_start + name_len];
    let unclosed = || SfcError::UnclosedBlock {
        tag: tag.to_string(),
        position: start,
    };

    let attrs_start = name_start + name_len;
    let tag_end = find_closing_angle(bytes, attrs_start).ok_or_else(unclosed)?;
    let self_closing = tag_end > attrs_start && bytes[tag_end - 1] == b'/';
    let attrs_end = if self_closing { tag_end - 1 } else { tag_end };
    let attrs = parse_attributes(&source[attrs_start..attrs_end]);

    if self_closing {
        let block = SfcBlock {
            tag,
            content: "",
            offset: tag_end + 1,
            attrs,
        };
        return Ok((block, tag_end + 1));
    }

    let content_start = tag_end + 1;
    let end = if tag == "template" {
        find_matching_template_end(bytes, content_start)
    } else {
        find_closing_tag(bytes, content_start, tag)
    };
    let (content_end, after) = end.ok_or_else(unclosed)?;

    let block = SfcBlock {
        tag,
        content: &source[content_start..content_end],
        offset: content_start,
        attrs,
    };
    Ok((block, after))
}

/// Finds the closing `>` of an opening tag, handling quoted attributes.
fn find_closing_angle(bytes: &[u8], start: usize) -> Option<usize> {
    let mut in_quote = false;
    let mut quote_char = 0u8;

    for (i, &byte) in bytes[start..].iter().enumerate() {
        match byte {
            b'"' | b'\'' => {
                if !in_quote {
                    in_quote = true;
                    quote_char = byte;
                } else if byte == quote_char {
                    in_quote = false;
                }
            }
            b'>' if !in_quote => return Some(start + i),
            _ => {}
        }
    }

    None
}

/// Finds `</tag>` after `start`; returns (content end, offset after the tag).
fn find_closing_tag(bytes: &[u8], start: usize, tag: &str) -> Option<(usize, usize)> {
    let needle = format!("</{tag}");
    let finder = memmem::Finder::new(needle.as_bytes());
    let mut from = start;

    while let Some(pos) = finder.find(&bytes[from..]) {
        let end = from + pos;
        let after_name = end + needle.len();
        match bytes.get(after_name) {
            Some(b'>' | b' ' | b'\t' | b'\n' | b'\r') => {
                let close = memchr(b'>', &bytes[after_name..])?;
                return Some((end, after_name + close + 1));
            }
            _ => from = after_name,
        }
    }

    None
}

/// Finds the `</template>` matching the top-level `<template>`, counting
/// nested `<template>` tags used for slots and conditionals.
fn find_matching_template_end(bytes: &[u8], start: usize) -> Option<(usize, usize)> {
    let mut depth = 1usize;
    let mut pointer = start;

    while let Some(offset) = memchr(b'<', &bytes[pointer..]) {
        let pos = pointer + offset;
        let rest = &bytes[pos..];

        if rest.starts_with(b"<!--") {
            pointer = pos + 4 + memmem::find(&rest[4..], b"-->")? + 3;
        } else if rest.starts_with(b"</template") && is_name_boundary(rest.get(10)) {
            depth -= 1;
            let close = memchr(b'>', rest)?;
            if depth == 0 {
                return Some((pos, pos + close + 1));
            }
            pointer = pos + close + 1;
        } else if rest.starts_with(b"<template") && is_name_boundary(rest.get(9)) {
            let close = find_closing_angle(bytes, pos + 9)?;
            if bytes[close - 1] != b'/' {
                depth += 1;
            }
            pointer = close + 1;
        } else {
            pointer = pos + 1;
        }
    }

    None
}

fn is_name_boundary(byte: Option<&u8>) -> bool {
    matches!(byte, Some(b'>' | b'/' | b' ' | b'\t' | b'\n' | b'\r'))
}

/// Parses `name`, `name=value`, `name="value"` and `name='value'` pairs.
fn parse_attributes(input: &str) -> Vec<SfcAttr<'_>> {
    let bytes = input.as_bytes();
    let mut attrs = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        let name_start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'=' | b'/')
        {
            i += 1;
        }
        if name_start == i {
            // Stray '=' or quote
            i += 1;
            continue;
        }
        let name = &input[name_start..i];

        let mut j = i;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if j >= bytes.len() || bytes[j] != b'=' {
            attrs.push(SfcAttr { name, value: None });
            continue;
        }

        j += 1;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        let value = match bytes.get(j) {
            Some(&quote @ (b'"' | b'\'')) => {
                let value_start = j + 1;
                let len = memchr(quote, &bytes[value_start..]).unwrap_or(bytes.len() - value_start);
                i = (value_start + len + 1).min(bytes.len());
                &input[value_start..value_start + len]
            }
            Some(_) => {
                let value_start = j;
                while j < bytes.len() && !bytes[j].is_ascii_whitespace() {
                    j += 1;
                }
                i = j;
                &input[value_start..j]
            }
            None => {
                i = j;
                ""
            }
        };
        attrs.push(SfcAttr {
            name,
            value: Some(value),
        });
    }

    attrs
}
