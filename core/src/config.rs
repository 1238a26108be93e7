//! Parser configuration for resource limits.
//!
//! # Recursion Limits
//!
//! Every rule reference counts as one level of nesting. Deeply nested input
//! such as `((((((...))))))` recurses through the expression rules once per
//! parenthesis, so the engine enforces a maximum depth and reports a fatal
//! failure instead of overflowing the stack.
//!
//! # Example
//!
//! ```ignore
//! use tinypeg_core::ParseConfig;
//!
//! let config = ParseConfig::new()
//!     .with_max_recursion_depth(1024)
//!     .with_token_capacity(4096);
//! let tree = grammar.parse_with(grammar.start(), config, lexer)?;
//! ```

/// Configuration for a single parse.
///
/// | Setting | Default |
/// |---------|---------|
/// | `max_recursion_depth` | 128 |
/// | `token_capacity` | 256 |
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
    /// Maximum number of nested rule references.
    pub max_recursion_depth: usize,

    /// Initial capacity of the cursor's token buffer.
    pub token_capacity: usize,
}

impl Default for ParseConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ParseConfig {
    /// Default configuration, usable in const contexts.
    pub const DEFAULT: Self = Self {
        max_recursion_depth: 128,
        token_capacity: 256,
    };

    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Sets the maximum recursion depth. `usize::MAX` disables the limit.
    #[inline]
    pub const fn with_max_recursion_depth(mut self, depth: usize) -> Self {
        self.max_recursion_depth = depth;
        self
    }

    /// Sets the initial token buffer capacity.
    #[inline]
    pub const fn with_token_capacity(mut self, capacity: usize) -> Self {
        self.token_capacity = capacity;
        self
    }

    /// Disables the recursion limit.
    ///
    /// Only use this for trusted input.
    #[inline]
    pub const fn disable_recursion_limit(self) -> Self {
        self.with_max_recursion_depth(usize::MAX)
    }
}

/// Tracks rule nesting depth during a parse.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursionGuard {
    depth: usize,
}

impl RecursionGuard {
    #[inline]
    pub const fn new() -> Self {
        Self { depth: 0 }
    }

    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Enters one nesting level, returning `false` if the new depth is above
    /// `limit`.
    ///
    /// The depth is incremented either way, so every `enter` must be paired
    /// with an `exit`.
    #[inline]
    #[must_use]
    pub fn enter(&mut self, limit: usize) -> bool {
        self.depth = self.depth.saturating_add(1);
        self.depth <= limit
    }

    /// Leaves one nesting level. Extra calls saturate at zero.
    #[inline]
    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
