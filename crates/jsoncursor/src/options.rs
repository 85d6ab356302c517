const DEFAULT_MAX_DEPTH: usize = 1024;

/// Configuration options for a parse.
///
/// These options control whitespace handling and the nesting-depth bound.
/// Value conversion and validation behavior is fixed; it is the contract of
/// the accessor layer, not a knob.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Maximum number of simultaneously open containers.
    ///
    /// Opening an array or object beyond this depth fails with a
    /// [`SyntaxError::DepthLimitExceeded`](crate::SyntaxError::DepthLimitExceeded)
    /// syntax error. This also bounds the recursion depth of the validator.
    ///
    /// # Default
    ///
    /// `1024`
    pub max_depth: usize,

    /// Whether to allow any Unicode whitespace between JSON tokens.
    ///
    /// By default, the parser only recognizes the four whitespace characters
    /// defined by the JSON specification: space (U+0020), line feed (U+000A),
    /// carriage return (U+000D), and horizontal tab (U+0009).
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unicode_whitespace: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            allow_unicode_whitespace: false,
        }
    }
}
