use crate::error::{Result, writing_err};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separators {
    pub pre: &'static str,
    pub inner: &'static str,
    pub post: &'static str,
}

/// A plain slice with the type omitted.
pub const SINGLE_ARG_SEP: Separators = Separators {
    pre: "{",
    inner: "",
    post: "}",
};

/// A slice of structs with the types omitted.
pub const MULTI_ARG_SEP: Separators = Separators {
    pre: "{{",
    inner: "}, {",
    post: "}}",
};

impl Separators {
    pub fn for_arity(arity: usize) -> Self {
        if arity > 1 { MULTI_ARG_SEP } else { SINGLE_ARG_SEP }
    }
}

/// Streams corpus entries to a sink.
///
/// Every line goes out in a single write, and any write failure is fatal.
pub struct EntryWriter<'w, W: Write + ?Sized> {
    w: &'w mut W,
    seps: Separators,
    entries: usize,
}

impl<'w, W: Write + ?Sized> EntryWriter<'w, W> {
    /// Writes the opening delimiter for entries of the given arity.
    pub fn begin(w: &'w mut W, arity: usize) -> Result<Self> {
        let seps = Separators::for_arity(arity);
        let mut out = EntryWriter { w, seps, entries: 0 };
        out.line(seps.pre.as_bytes())?;
        Ok(out)
    }

    pub fn entry<V: AsRef<[u8]>>(&mut self, values: &[V]) -> Result<()> {
        if self.entries > 0 && !self.seps.inner.is_empty() {
            self.line(self.seps.inner.as_bytes())?;
        }
        for v in values {
            let v = v.as_ref();
            let mut buf = Vec::with_capacity(v.len() + 3);
            buf.push(b'\t');
            buf.extend_from_slice(v);
            buf.push(b',');
            self.line(&buf)?;
        }
        self.entries += 1;
        Ok(())
    }

    /// Writes the closing delimiter and flushes the sink.
    /// Returns the number of entries written.
    pub fn finish(mut self) -> Result<usize> {
        self.line(self.seps.post.as_bytes())?;
        self.w.flush().map_err(writing_err)?;
        Ok(self.entries)
    }

    fn line(&mut self, text: &[u8]) -> Result<()> {
        let mut buf = Vec::with_capacity(text.len() + 1);
        buf.extend_from_slice(text);
        buf.push(b'\n');
        self.w.write_all(&buf).map_err(writing_err)
    }
}
