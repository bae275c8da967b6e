//! Purpose: Hold the knobs that select between compatible and hardened parse behavior.
//! Exports: `ParseOptions`, `ScanMode`, `DEFAULT_MAX_DEPTH`.
//! Role: Plain `Copy` configuration threaded into every `Parser`.
//! Invariants: Defaults are permissive about structure but hardened in the composite locator.

pub const DEFAULT_MAX_DEPTH: usize = 128;

/// How the composite locator treats delimiters that appear inside string literals.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum ScanMode {
    /// Skip string contents (with their escapes) while counting delimiters.
    #[default]
    StringAware,
    /// Count every delimiter character, even inside strings.
    /// A string such as `"}"` corrupts the count and yields a wrong end offset.
    Literal,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParseOptions {
    pub scan: ScanMode,
    /// Reject junk between members/elements instead of skipping it.
    pub strict_members: bool,
    /// Fail when non-whitespace text follows the top-level value.
    pub reject_trailing: bool,
    /// Deepest allowed object/array nesting; the top-level composite is depth 1.
    pub max_depth: usize,
}

impl ParseOptions {
    pub const fn new() -> Self {
        Self {
            scan: ScanMode::StringAware,
            strict_members: false,
            reject_trailing: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Reproduces the historical behavior: literal delimiter counting, silent skipping,
    /// trailing data ignored.
    pub const fn compatible() -> Self {
        Self {
            scan: ScanMode::Literal,
            ..Self::new()
        }
    }

    /// Hardened locator plus strict structure and no trailing data.
    pub const fn strict() -> Self {
        Self {
            scan: ScanMode::StringAware,
            strict_members: true,
            reject_trailing: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn scan(mut self, scan: ScanMode) -> Self {
        self.scan = scan;
        self
    }

    pub fn strict_members(mut self, strict: bool) -> Self {
        self.strict_members = strict;
        self
    }

    pub fn reject_trailing(mut self, reject: bool) -> Self {
        self.reject_trailing = reject;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}
