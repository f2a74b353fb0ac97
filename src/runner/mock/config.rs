//! Registry configuration.

/// How the registry reacts when the object model refuses a property update
/// (a non-configurable property, a non-extensible or frozen target).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockConfig {
    /// Strict: the refusal is returned as a `TypeError`, like strict-mode
    /// `delete` and `Object.defineProperty`. Otherwise it is logged and
    /// ignored, like a sloppy-mode assignment.
    pub strict: bool,
}

impl MockConfig {
    pub fn strict() -> Self {
        MockConfig { strict: true }
    }

    pub fn sloppy() -> Self {
        MockConfig { strict: false }
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self::strict()
    }
}
