//! SFC block splitting.
//!
//! Byte-level scan over the source. Block contents and attributes borrow
//! from the input.

use crate::types::*;
use memchr::memchr;
use std::borrow::Cow;

const CLOSING_TEMPLATE: &[u8] = b"</template>";
const CLOSING_SCRIPT: &[u8] = b"</script>";
const CLOSING_STYLE: &[u8] = b"</style>";

const TAG_TEMPLATE: &[u8] = b"template";
const TAG_SCRIPT: &[u8] = b"script";
const TAG_STYLE: &[u8] = b"style";

/// A block as found by the scanner, before it is sorted into the descriptor.
struct RawBlock<'a> {
    tag_name: &'a str,
    attrs: BlockAttrs<'a>,
    content_start: usize,
    content_end: usize,
    end_pos: usize,
    end_line: usize,
    end_column: usize,
}

/// Split a Vue SFC into its top-level blocks
pub fn parse_sfc<'a>(
    source: &'a str,
    options: SfcParseOptions,
) -> Result<SfcDescriptor<'a>, SfcError> {
    let mut descriptor = SfcDescriptor {
        filename: Cow::Owned(options.filename),
        source: Cow::Borrowed(source),
        ..Default::default()
    };

    let bytes = source.as_bytes();
    let len = bytes.len();

    let mut pos = 0;
    let mut line = 1;
    let mut column = 1;

    while pos < len {
        while pos < len {
            match bytes[pos] {
                b' ' | b'\t' | b'\r' => {
                    pos += 1;
                    column += 1;
                }
                b'\n' => {
                    pos += 1;
                    line += 1;
                    column = 1;
                }
                _ => break,
            }
        }

        if pos >= len {
            break;
        }

        if bytes[pos] != b'<' {
            let Some(next_lt) = memchr(b'<', &bytes[pos..]) else {
                break;
            };
            for &b in &bytes[pos..pos + next_lt] {
                if b == b'\n' {
                    line += 1;
                    column = 1;
                } else {
                    column += 1;
                }
            }
            pos += next_lt;
        }

        // Top-level comments are skipped whole so a commented-out block is not picked up
        if bytes[pos..].starts_with(b"<!--") {
            let end = find_subslice(&bytes[pos..], b"-->").map_or(len, |i| pos + i + 3);
            for &b in &bytes[pos..end] {
                if b == b'\n' {
                    line += 1;
                    column = 1;
                } else {
                    column += 1;
                }
            }
            pos = end;
            continue;
        }

        let Some(block) = scan_block(bytes, source, pos, line) else {
            pos += 1;
            column += 1;
            continue;
        };

        let loc = BlockLocation {
            tag_start: pos,
            start: block.content_start,
            end: block.content_end,
            start_line: line,
            start_column: column,
            end_line: block.end_line,
            end_column: block.end_column,
        };
        let content = Cow::Borrowed(&source[block.content_start..block.content_end]);
        let tag = block.tag_name.as_bytes();

        if tag_name_eq(tag, TAG_SCRIPT) {
            let setup = block.attrs.contains_key("setup");
            let script = SfcScriptBlock {
                content,
                loc,
                lang: block.attrs.get("lang").cloned(),
                src: block.attrs.get("src").cloned(),
                setup,
                attrs: block.attrs,
            };
            let slot = if setup {
                &mut descriptor.script_setup
            } else {
                &mut descriptor.script
            };
            if slot.is_some() {
                let (message, code) = if setup {
                    ("SFC can only contain one <script setup> block", "DUPLICATE_SCRIPT_SETUP")
                } else {
                    ("SFC can only contain one <script> block", "DUPLICATE_SCRIPT")
                };
                return Err(SfcError {
                    message: message.into(),
                    code: Some(code.into()),
                    loc: Some(loc),
                });
            }
            *slot = Some(script);
        } else {
            let sfc_block = SfcBlock {
                block_type: Cow::Borrowed(block.tag_name),
                content,
                loc,
                attrs: block.attrs,
            };
            if tag_name_eq(tag, TAG_TEMPLATE) {
                if descriptor.template.is_some() {
                    return Err(SfcError {
                        message: "SFC can only contain one <template> block".into(),
                        code: Some("DUPLICATE_TEMPLATE".into()),
                        loc: Some(loc),
                    });
                }
                descriptor.template = Some(sfc_block);
            } else if tag_name_eq(tag, TAG_STYLE) {
                descriptor.styles.push(sfc_block);
            } else {
                descriptor.custom_blocks.push(sfc_block);
            }
        }

        pos = block.end_pos;
        line = block.end_line;
        column = block.end_column;
    }

    Ok(descriptor)
}

#[inline(always)]
fn tag_name_eq(name: &[u8], expected: &[u8]) -> bool {
    name.len() == expected.len() && name.eq_ignore_ascii_case(expected)
}

/// Scan one block starting at the `<` at `start`.
fn scan_block<'a>(
    bytes: &[u8],
    source: &'a str,
    start: usize,
    start_line: usize,
) -> Option<RawBlock<'a>> {
    let len = bytes.len();

    let mut pos = start + 1;
    if pos >= len {
        return None;
    }

    let tag_start = pos;
    while pos < len && is_tag_name_char(bytes[pos]) {
        pos += 1;
    }
    if pos == tag_start {
        return None;
    }
    let tag_name = &source[tag_start..pos];

    let mut attrs = BlockAttrs::default();
    while pos < len && bytes[pos] != b'>' {
        while pos < len && is_whitespace(bytes[pos]) {
            pos += 1;
        }
        if pos >= len || bytes[pos] == b'>' || bytes[pos] == b'/' {
            break;
        }

        let attr_start = pos;
        while pos < len && !matches!(bytes[pos], b'=' | b'>' | b'/') && !is_whitespace(bytes[pos])
        {
            pos += 1;
        }
        if pos == attr_start {
            pos += 1;
            continue;
        }
        let attr_name = Cow::Borrowed(&source[attr_start..pos]);

        while pos < len && (bytes[pos] == b' ' || bytes[pos] == b'\t') {
            pos += 1;
        }

        let attr_value = if pos < len && bytes[pos] == b'=' {
            pos += 1;
            while pos < len && (bytes[pos] == b' ' || bytes[pos] == b'\t') {
                pos += 1;
            }
            if pos < len && (bytes[pos] == b'"' || bytes[pos] == b'\'') {
                let quote = bytes[pos];
                pos += 1;
                let value_start = pos;
                pos = memchr(quote, &bytes[pos..]).map_or(len, |i| pos + i);
                let value = Cow::Borrowed(&source[value_start..pos]);
                if pos < len {
                    pos += 1;
                }
                value
            } else {
                let value_start = pos;
                while pos < len && !matches!(bytes[pos], b'>' | b'/') && !is_whitespace(bytes[pos])
                {
                    pos += 1;
                }
                Cow::Borrowed(&source[value_start..pos])
            }
        } else {
            Cow::Borrowed("")
        };

        attrs.insert(attr_name, attr_value);
    }

    if pos + 1 < len && bytes[pos] == b'/' && bytes[pos + 1] == b'>' {
        // Self-closing block: no content
        pos += 2;
        return Some(RawBlock {
            tag_name,
            attrs,
            content_start: pos,
            content_end: pos,
            end_pos: pos,
            end_line: start_line,
            end_column: pos - start,
        });
    }

    if pos >= len || bytes[pos] != b'>' {
        return None;
    }
    pos += 1;

    let tag = tag_name.as_bytes();
    if tag_name_eq(tag, TAG_TEMPLATE) {
        return scan_template_end(bytes, tag_name, attrs, pos, start, start_line);
    }

    let closing_tag: Vec<u8> = if tag_name_eq(tag, TAG_SCRIPT) {
        CLOSING_SCRIPT.to_vec()
    } else if tag_name_eq(tag, TAG_STYLE) {
        CLOSING_STYLE.to_vec()
    } else {
        let mut closing = Vec::with_capacity(tag.len() + 3);
        closing.extend_from_slice(b"</");
        closing.extend_from_slice(tag);
        closing.push(b'>');
        closing
    };

    let content_start = pos;
    let mut line = start_line;
    let mut last_newline = start;

    while pos < len {
        let lt_offset = memchr(b'<', &bytes[pos..])?;
        for (i, &b) in bytes[pos..pos + lt_offset].iter().enumerate() {
            if b == b'\n' {
                line += 1;
                last_newline = pos + i;
            }
        }
        pos += lt_offset;

        if starts_with_ignore_case(&bytes[pos..], &closing_tag) {
            return Some(RawBlock {
                tag_name,
                attrs,
                content_start,
                content_end: pos,
                end_pos: pos + closing_tag.len(),
                end_line: line,
                end_column: pos - last_newline + closing_tag.len(),
            });
        }
        pos += 1;
    }

    None
}

/// Find the `</template>` matching an open template, honouring nested templates.
fn scan_template_end<'a>(
    bytes: &[u8],
    tag_name: &'a str,
    attrs: BlockAttrs<'a>,
    content_start: usize,
    start: usize,
    start_line: usize,
) -> Option<RawBlock<'a>> {
    let len = bytes.len();
    let mut pos = content_start;
    let mut depth = 1;
    let mut line = start_line;
    let mut last_newline = start;

    while pos < len {
        if bytes[pos] == b'\n' {
            line += 1;
            last_newline = pos;
        }

        if bytes[pos] == b'<' {
            if starts_with_ignore_case(&bytes[pos..], CLOSING_TEMPLATE) {
                depth -= 1;
                if depth == 0 {
                    return Some(RawBlock {
                        tag_name,
                        attrs,
                        content_start,
                        content_end: pos,
                        end_pos: pos + CLOSING_TEMPLATE.len(),
                        end_line: line,
                        end_column: pos - last_newline + CLOSING_TEMPLATE.len(),
                    });
                }
                pos += CLOSING_TEMPLATE.len();
                continue;
            }

            let name_end = pos + 1 + TAG_TEMPLATE.len();
            if starts_with_ignore_case(&bytes[pos + 1..], TAG_TEMPLATE)
                && name_end < len
                && (bytes[name_end] == b'>' || is_whitespace(bytes[name_end]))
            {
                let mut check = name_end;
                let mut self_closing = false;
                while check < len && bytes[check] != b'>' {
                    if bytes[check] == b'/' && bytes.get(check + 1) == Some(&b'>') {
                        self_closing = true;
                        break;
                    }
                    check += 1;
                }
                if !self_closing {
                    depth += 1;
                }
            }
        }

        pos += 1;
    }

    None
}

#[inline(always)]
fn starts_with_ignore_case(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.len() >= needle.len() && haystack[..needle.len()].eq_ignore_ascii_case(needle)
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[inline(always)]
fn is_tag_name_char(b: u8) -> bool {
    matches!(b, b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_')
}

#[inline(always)]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}
