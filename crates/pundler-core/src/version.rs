//! Package version parsing, ordering, and constraint matching.
//!
//! Versions follow the PEP 440 public scheme:
//! `[N!]N(.N)*[{a|b|rc}N][.postN][.devN][+local]`
//!
//! Ordering within one release:
//! `1.0.dev1` < `1.0a1` < `1.0b2` < `1.0rc1` < `1.0` < `1.0.post1`
//!
//! Trailing zero release segments do not affect ordering (`1.0 == 1.0.0`).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A parsed package version.
#[derive(Debug, Clone)]
pub struct Version {
    pub original: String,
    epoch: u64,
    release: Vec<u64>,
    pre: Option<(PreKind, u64)>,
    post: Option<u64>,
    dev: Option<u64>,
    local: Option<String>,
}

/// Pre-release phases in ascending order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub enum PreKind {
    Alpha,
    Beta,
    Rc,
}

/// Error returned when a version string does not follow the public scheme.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid version '{0}'")]
pub struct InvalidVersion(pub String);

impl Version {
    pub fn parse(version: &str) -> Result<Self, InvalidVersion> {
        let mut cursor = Cursor::new(version.trim());
        cursor.eat_char('v');

        let first = cursor
            .number()?
            .ok_or_else(|| InvalidVersion(version.to_string()))?;
        let (epoch, first) = if cursor.eat_char('!') {
            let n = cursor
                .number()?
                .ok_or_else(|| InvalidVersion(version.to_string()))?;
            (first, n)
        } else {
            (0, first)
        };

        let mut release = vec![first];
        while cursor.peek() == Some('.')
            && cursor.peek_at(1).is_some_and(|c| c.is_ascii_digit())
        {
            cursor.bump();
            release.push(cursor.number()?.unwrap_or(0));
        }

        let pre = parse_pre(&mut cursor)?;
        let post = parse_post(&mut cursor)?;
        let dev = parse_dev(&mut cursor)?;

        let local = if cursor.eat_char('+') {
            let rest = cursor.rest();
            if rest.is_empty()
                || !rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '.')
            {
                return Err(InvalidVersion(version.to_string()));
            }
            cursor.advance(rest.len());
            Some(rest.to_string())
        } else {
            None
        };

        if !cursor.is_done() {
            return Err(InvalidVersion(version.to_string()));
        }

        Ok(Self {
            original: version.trim().to_string(),
            epoch,
            release,
            pre,
            post,
            dev,
            local,
        })
    }

    /// Whether this is a pre-release (alpha, beta, rc) or a development release.
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some() || self.dev.is_some()
    }

    pub fn is_postrelease(&self) -> bool {
        self.post.is_some()
    }

    /// The version with any local label removed, for local-agnostic comparisons.
    pub fn public(&self) -> Self {
        Self {
            local: None,
            ..self.clone()
        }
    }

    /// Whether both versions share the same epoch and release segments.
    pub fn same_release(&self, other: &Self) -> bool {
        self.epoch == other.epoch && compare_release(&self.release, &other.release).is_eq()
    }
}

fn parse_pre(cursor: &mut Cursor<'_>) -> Result<Option<(PreKind, u64)>, InvalidVersion> {
    let save = cursor.pos;
    cursor.eat_separator();
    let kind = if cursor.eat_word("alpha") || cursor.eat_word("a") {
        PreKind::Alpha
    } else if cursor.eat_word("beta") || cursor.eat_word("b") {
        PreKind::Beta
    } else if cursor.eat_word("preview")
        || cursor.eat_word("pre")
        || cursor.eat_word("rc")
        || cursor.eat_word("c")
    {
        PreKind::Rc
    } else {
        cursor.pos = save;
        return Ok(None);
    };
    cursor.eat_separator();
    Ok(Some((kind, cursor.number()?.unwrap_or(0))))
}

fn parse_post(cursor: &mut Cursor<'_>) -> Result<Option<u64>, InvalidVersion> {
    let save = cursor.pos;
    // Implicit post release: `1.0-1`
    if cursor.eat_char('-') {
        if let Some(n) = cursor.number()? {
            return Ok(Some(n));
        }
        cursor.pos = save;
    }
    cursor.eat_separator();
    if cursor.eat_word("post") || cursor.eat_word("rev") || cursor.eat_word("r") {
        cursor.eat_separator();
        return Ok(Some(cursor.number()?.unwrap_or(0)));
    }
    cursor.pos = save;
    Ok(None)
}

fn parse_dev(cursor: &mut Cursor<'_>) -> Result<Option<u64>, InvalidVersion> {
    let save = cursor.pos;
    cursor.eat_separator();
    if cursor.eat_word("dev") {
        cursor.eat_separator();
        return Ok(Some(cursor.number()?.unwrap_or(0)));
    }
    cursor.pos = save;
    Ok(None)
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    fn is_done(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn eat_char(&mut self, expected: char) -> bool {
        if self.peek().is_some_and(|c| c.eq_ignore_ascii_case(&expected)) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn eat_separator(&mut self) {
        if matches!(self.peek(), Some('.' | '-' | '_')) {
            self.bump();
        }
    }

    fn eat_word(&mut self, word: &str) -> bool {
        let rest = self.rest();
        if rest
            .get(..word.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(word))
        {
            self.pos += word.len();
            true
        } else {
            false
        }
    }

    /// Digits at the cursor, if any. Fails when they overflow a `u64`.
    fn number(&mut self) -> Result<Option<u64>, InvalidVersion> {
        let digits: String = self
            .rest()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if digits.is_empty() {
            return Ok(None);
        }
        self.pos += digits.len();
        digits
            .parse()
            .map(Some)
            .map_err(|_| InvalidVersion(self.input.to_string()))
    }
}

impl FromStr for Version {
    type Err = InvalidVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| compare_release(&self.release, &other.release))
            .then_with(|| self.pre_key().cmp(&other.pre_key()))
            .then_with(|| self.post.cmp(&other.post))
            .then_with(|| dev_key(self.dev).cmp(&dev_key(other.dev)))
            .then_with(|| self.local.cmp(&other.local))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort key for the pre-release phase.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
enum PreKey {
    /// A bare dev release (`1.0.dev1`) sorts before every pre-release of `1.0`.
    DevOnly,
    Pre(PreKind, u64),
    Final,
}

impl Version {
    fn pre_key(&self) -> PreKey {
        match (self.pre, self.post, self.dev) {
            (Some((kind, n)), _, _) => PreKey::Pre(kind, n),
            (None, None, Some(_)) => PreKey::DevOnly,
            _ => PreKey::Final,
        }
    }
}

fn dev_key(dev: Option<u64>) -> (u8, u64) {
    match dev {
        Some(n) => (0, n),
        None => (1, 0),
    }
}

fn compare_release(a: &[u64], b: &[u64]) -> Ordering {
    let max_len = a.len().max(b.len());
    for i in 0..max_len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        let ord = x.cmp(&y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Version constraint operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equal,
    NotEqual,
    GreaterEqual,
    LessEqual,
    Greater,
    Less,
    Compatible,
    Arbitrary,
}

impl Operator {
    /// Operators ordered so that longer tokens are tried first when parsing.
    pub const ALL: [Operator; 8] = [
        Operator::Arbitrary,
        Operator::Equal,
        Operator::NotEqual,
        Operator::Compatible,
        Operator::GreaterEqual,
        Operator::LessEqual,
        Operator::Greater,
        Operator::Less,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::GreaterEqual => ">=",
            Operator::LessEqual => "<=",
            Operator::Greater => ">",
            Operator::Less => "<",
            Operator::Compatible => "~=",
            Operator::Arbitrary => "===",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `(operator, version)` constraint such as `>=1.0` or `==2.*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constraint {
    pub op: Operator,
    pub version: String,
}

impl Constraint {
    pub fn new(op: Operator, version: impl Into<String>) -> Self {
        Self {
            op,
            version: version.into(),
        }
    }

    /// Whether the constraint names a pre-release explicitly (e.g. `>=2.0b1`).
    pub fn mentions_prerelease(&self) -> bool {
        Version::parse(self.version.trim_end_matches(".*"))
            .map(|v| v.is_prerelease())
            .unwrap_or(false)
    }

    /// Check whether `candidate` satisfies this constraint.
    ///
    /// A constraint whose version does not parse matches nothing, except
    /// `===` which compares strings verbatim.
    pub fn matches(&self, candidate: &Version) -> bool {
        if self.op == Operator::Arbitrary {
            return candidate.original.eq_ignore_ascii_case(&self.version);
        }

        if let Some(prefix) = self.version.strip_suffix(".*") {
            let Ok(prefix) = Version::parse(prefix) else {
                return false;
            };
            let hit = prefix_match(&prefix, candidate);
            return match self.op {
                Operator::Equal => hit,
                Operator::NotEqual => !hit,
                _ => false,
            };
        }

        let Ok(spec) = Version::parse(&self.version) else {
            return false;
        };
        let candidate_cmp = if spec.local.is_none() {
            candidate.public()
        } else {
            candidate.clone()
        };

        match self.op {
            Operator::Equal => candidate_cmp == spec,
            Operator::NotEqual => candidate_cmp != spec,
            Operator::GreaterEqual => candidate_cmp >= spec,
            Operator::LessEqual => candidate_cmp <= spec,
            Operator::Greater => {
                // `>1.7` excludes 1.7.post1 unless the bound is itself a post-release
                candidate_cmp > spec
                    && !(candidate.is_postrelease()
                        && !spec.is_postrelease()
                        && candidate.same_release(&spec))
            }
            Operator::Less => {
                // `<2.0` excludes 2.0a1 unless the bound is itself a pre-release
                candidate_cmp < spec
                    && !(candidate.is_prerelease()
                        && !spec.is_prerelease()
                        && candidate.same_release(&spec))
            }
            Operator::Compatible => {
                if spec.release.len() < 2 {
                    return false;
                }
                let prefix = Version {
                    original: String::new(),
                    epoch: spec.epoch,
                    release: spec.release[..spec.release.len() - 1].to_vec(),
                    pre: None,
                    post: None,
                    dev: None,
                    local: None,
                };
                candidate_cmp >= spec && prefix_match(&prefix, candidate)
            }
            Operator::Arbitrary => candidate.original.eq_ignore_ascii_case(&self.version),
        }
    }
}

fn prefix_match(prefix: &Version, candidate: &Version) -> bool {
    if prefix.epoch != candidate.epoch {
        return false;
    }
    prefix
        .release
        .iter()
        .enumerate()
        .all(|(i, seg)| candidate.release.get(i).copied().unwrap_or(0) == *seg)
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.version)
    }
}

/// Check a candidate against every constraint (logical AND).
pub fn satisfies_all(candidate: &Version, constraints: &[Constraint]) -> bool {
    constraints.iter().all(|c| c.matches(candidate))
}
