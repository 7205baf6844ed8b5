//! Shared test harness utilities for diurnum crates.

use diurnum_config::Config;

/// Returns a baseline configuration for tests.
pub fn test_config() -> Config {
    Config::default()
}

/// A two-orb document exercising discovery, nesting, and a link ref.
pub const SAMPLE_DOC: &str =
    "# [Intro](diurnum://intro)\n\nSome text\n\n## [Sub](diurnum://abc?ref=link)\n";

/// A document nesting three orbs across two levels, with body content at
/// each level.
pub const NESTED_DOC: &str = "\
# [Root](diurnum://root)

Root body.

## [Middle](diurnum://middle)

Middle body.

### [Leaf](diurnum://leaf)

Leaf body.
";
