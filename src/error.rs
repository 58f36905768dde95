use crate::data::Attribute;

/// Fatal decoding failures.
///
/// Any of these aborts the decode immediately; no partial mesh is
/// returned. Line numbers are 1-based.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document source could not supply the requested text.
    #[error("failed to fetch `{path}`: {source}")]
    Fetch {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// A face-vertex token referenced a pool entry that was never declared.
    ///
    /// Index 0 always resolves (to the zero sentinel), so this only fires
    /// past the end of the pool, which almost always means a truncated or
    /// incompatible document.
    #[error("face references {attribute} index out of pool range: 0..{len} ∌ {index} (line {line})")]
    IndexOutOfRange {
        attribute: Attribute,
        index: usize,
        len: usize,
        line: usize,
    },
    /// A `v`/`vt`/`vn` argument did not parse as a float.
    #[error("malformed {attribute} component `{argument}` (line {line})")]
    MalformedNumber {
        attribute: Attribute,
        argument: String,
        line: usize,
    },
    /// A face-vertex token was not of the form `p`, `p/t`, `p//n`, or
    /// `p/t/n` with non-negative decimal indices.
    #[error("malformed face vertex `{token}` (line {line})")]
    MalformedFaceVertex { token: String, line: usize },
    /// A directive line carried fewer arguments than the directive requires.
    #[error("`{keyword}` expects at least {expected} argument(s), found {found} (line {line})")]
    MissingArgs {
        keyword: &'static str,
        expected: usize,
        found: usize,
        line: usize,
    },
}

/// Non-fatal diagnostic recorded for a line whose keyword is not a
/// recognized directive. Decoding continues past the line, and the
/// decoded buffers are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Warning {
    /// The unrecognized keyword. Empty when the line began with a
    /// non-word character.
    pub keyword: String,
    /// 1-based source line.
    pub line: usize,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unrecognized directive `{}` (line {})",
            self.keyword, self.line
        )
    }
}
