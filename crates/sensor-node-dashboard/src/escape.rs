use core::fmt::{self, Display, Write};

/// Displays a string with HTML special characters escaped.
pub(crate) struct Escaped<'a>(pub(crate) &'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest = self.0;
        while let Some(pos) = rest.find(['&', '<', '>', '"', '\'']) {
            f.write_str(&rest[..pos])?;
            let entity = match rest.as_bytes()[pos] {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                _ => "&#39;",
            };
            f.write_str(entity)?;
            rest = &rest[pos + 1..];
        }
        f.write_str(rest)
    }
}

/// Write `value` escaped, or `fallback` when it is empty.
pub(crate) fn write_or(out: &mut impl Write, value: &str, fallback: &str) -> fmt::Result {
    if value.is_empty() {
        out.write_str(fallback)
    } else {
        write!(out, "{}", Escaped(value))
    }
}
