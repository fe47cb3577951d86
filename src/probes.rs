//! The value-plus-cost result every table operation returns.

/// Outcome of a table operation: the value involved, if any, and the number
/// of slot (or node) inspections it took.
///
/// `value` is `None` when the key was absent, when the key argument was
/// empty, or when a quadratic insertion found no free slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Probes {
    pub value: Option<String>,
    pub probes: usize,
}

impl Probes {
    pub fn found(value: impl Into<String>, probes: usize) -> Self {
        Self {
            value: Some(value.into()),
            probes,
        }
    }

    pub fn absent(probes: usize) -> Self {
        Self {
            value: None,
            probes,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Add probes spent before this operation (e.g. by a resize).
    #[must_use]
    pub(crate) fn after(mut self, earlier: usize) -> Self {
        self.probes += earlier;
        self
    }
}
