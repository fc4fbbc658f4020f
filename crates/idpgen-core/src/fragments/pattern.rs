use crate::core::models::fragment::SsClass;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The smallest admissible window: a fragment must span at least two residues
/// to contribute any consumable interior torsions.
pub const MIN_WINDOW_LEN: usize = 2;

/// A run-length query over per-residue secondary-structure labels.
///
/// `L{2,6}` selects every window of 2 to 6 consecutive loop residues; the
/// window enumeration is overlapping (one candidate per admissible start
/// offset), equivalent to the conventional regular-expression lookahead
/// spelling `(?=(L{2,6}))`, which is also accepted by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SsPattern {
    pub class: SsClass,
    pub min_len: usize,
    pub max_len: usize,
}

impl SsPattern {
    pub fn new(class: SsClass, min_len: usize, max_len: usize) -> Result<Self, PatternParseError> {
        if min_len < MIN_WINDOW_LEN || max_len < min_len {
            return Err(PatternParseError::InvalidBounds {
                min: min_len,
                max: max_len,
            });
        }
        Ok(Self {
            class,
            min_len,
            max_len,
        })
    }

    /// Window lengths admissible at `offset` within a run of `run_len`
    /// residues: the longest clamp-to-run window, if it still meets the
    /// minimum. One window per offset, greedy, like a lookahead capture.
    pub fn window_len_at(&self, run_len: usize, offset: usize) -> Option<usize> {
        let available = run_len.saturating_sub(offset);
        let len = available.min(self.max_len);
        (len >= self.min_len).then_some(len)
    }
}

impl fmt::Display for SsPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{{},{}}}", self.class, self.min_len, self.max_len)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternParseError {
    #[error("empty secondary-structure pattern")]
    Empty,
    #[error("unknown secondary-structure class '{0}'")]
    UnknownClass(char),
    #[error("malformed pattern '{0}', expected forms like 'L', 'L{{4}}', 'L{{2,6}}' or 'L{{2,}}'")]
    Malformed(String),
    #[error("invalid window bounds {{{min},{max}}}: need {MIN_WINDOW_LEN} <= min <= max")]
    InvalidBounds { min: usize, max: usize },
}

impl FromStr for SsPattern {
    type Err = PatternParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut body = s.trim();
        // Accept the lookahead-wrapped spelling used by regex-based tooling.
        if let Some(inner) = body.strip_prefix("(?=(").and_then(|t| t.strip_suffix("))")) {
            body = inner;
        }
        if body.is_empty() {
            return Err(PatternParseError::Empty);
        }

        let mut chars = body.chars();
        let class_char = chars.next().unwrap();
        let class =
            SsClass::from_char(class_char).ok_or(PatternParseError::UnknownClass(class_char))?;
        let rest = chars.as_str();

        if rest.is_empty() {
            return Self::new(class, MIN_WINDOW_LEN, usize::MAX);
        }

        let bounds = rest
            .strip_prefix('{')
            .and_then(|t| t.strip_suffix('}'))
            .ok_or_else(|| PatternParseError::Malformed(s.to_string()))?;

        let parse = |t: &str| {
            t.parse::<usize>()
                .map_err(|_| PatternParseError::Malformed(s.to_string()))
        };

        match bounds.split_once(',') {
            None => {
                let n = parse(bounds)?;
                Self::new(class, n, n)
            }
            Some((min, "")) => Self::new(class, parse(min)?, usize::MAX),
            Some((min, max)) => Self::new(class, parse(min)?, parse(max)?),
        }
    }
}
