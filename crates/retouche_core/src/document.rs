//! Span-addressed edit buffer over a script.
//!
//! The source is never mutated in place. Edits are recorded against byte
//! offsets of the original text and applied when the document is rendered,
//! so every pass can keep addressing nodes by the spans of the one parse.

use oxc_span::Span;

#[derive(Debug, Clone)]
enum EditKind {
    Insert(String),
    /// Replace the range with the given text (empty text removes it)
    Replace(String),
}

#[derive(Debug, Clone)]
struct Edit {
    start: u32,
    end: u32,
    kind: EditKind,
    seq: usize,
}

/// A script plus the edits recorded against it.
#[derive(Debug, Clone)]
pub struct ScriptDocument<'s> {
    source: &'s str,
    edits: Vec<Edit>,
}

impl<'s> ScriptDocument<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            edits: Vec::new(),
        }
    }

    /// The original, unedited text.
    pub fn source(&self) -> &'s str {
        self.source
    }

    /// Whether any edit has been recorded.
    pub fn is_modified(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Insert text at `offset`. Insertions at the same offset keep call order.
    pub fn insert(&mut self, offset: u32, text: impl Into<String>) {
        self.push(offset, offset, EditKind::Insert(text.into()));
    }

    /// Insert text immediately before a node.
    pub fn insert_before(&mut self, span: Span, text: impl Into<String>) {
        self.insert(span.start, text);
    }

    /// Insert text immediately after a node.
    pub fn insert_after(&mut self, span: Span, text: impl Into<String>) {
        self.insert(span.end, text);
    }

    /// Remove a range.
    pub fn remove(&mut self, span: Span) {
        self.push(span.start, span.end, EditKind::Replace(String::new()));
    }

    /// Replace a range with new text.
    pub fn overwrite(&mut self, span: Span, text: impl Into<String>) {
        self.push(span.start, span.end, EditKind::Replace(text.into()));
    }

    /// Source text of `span` with the edits recorded inside it applied.
    ///
    /// Insertions sitting exactly on the boundaries belong to the
    /// surrounding text and are not part of the slice.
    pub fn slice(&self, span: Span) -> String {
        self.render_range(span.start, span.end, false)
    }

    /// Render the whole document.
    pub fn render(&self) -> String {
        self.render_range(0, self.source.len() as u32, true)
    }

    fn push(&mut self, start: u32, end: u32, kind: EditKind) {
        let seq = self.edits.len();
        self.edits.push(Edit {
            start,
            end,
            kind,
            seq,
        });
    }

    fn render_range(&self, start: u32, end: u32, include_boundaries: bool) -> String {
        let in_range = |at: u32| {
            if include_boundaries {
                at >= start && at <= end
            } else {
                at > start && at < end
            }
        };

        let mut inserts: Vec<&Edit> = self
            .edits
            .iter()
            .filter(|e| matches!(e.kind, EditKind::Insert(_)) && in_range(e.start))
            .collect();
        inserts.sort_by_key(|e| (e.start, e.seq));

        let mut replaces: Vec<&Edit> = self
            .edits
            .iter()
            .filter(|e| {
                matches!(e.kind, EditKind::Replace(_)) && e.start >= start && e.end <= end
            })
            .collect();
        // Outer ranges first so anything nested inside them is dropped below
        replaces.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then(b.end.cmp(&a.end))
                .then(a.seq.cmp(&b.seq))
        });

        let mut out = String::with_capacity((end - start) as usize + 64);
        let mut pos = start;
        let mut inserts = inserts.into_iter().peekable();

        for replace in replaces {
            if replace.start < pos {
                continue;
            }
            while let Some(insert) = inserts.next_if(|e| e.start <= replace.start) {
                out.push_str(&self.source[pos as usize..insert.start as usize]);
                pos = insert.start;
                if let EditKind::Insert(text) = &insert.kind {
                    out.push_str(text);
                }
            }
            out.push_str(&self.source[pos as usize..replace.start as usize]);
            if let EditKind::Replace(text) = &replace.kind {
                out.push_str(text);
            }
            pos = replace.end;
            while inserts.next_if(|e| e.start < replace.end).is_some() {}
        }

        for insert in inserts {
            out.push_str(&self.source[pos as usize..insert.start as usize]);
            pos = insert.start;
            if let EditKind::Insert(text) = &insert.kind {
                out.push_str(text);
            }
        }
        out.push_str(&self.source[pos as usize..end as usize]);
        out
    }
}
