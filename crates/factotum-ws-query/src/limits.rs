// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Page size bounds applied to every list endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageLimits {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: 100,
            max_page_size: 500,
        }
    }
}

impl PageLimits {
    /// Unusable sizes fall back to the default; oversized ones are clamped.
    #[must_use]
    pub fn effective_size(&self, requested: Option<u64>) -> u64 {
        match requested {
            Some(0) | None => self.default_page_size.min(self.max_page_size).max(1),
            Some(n) => n.min(self.max_page_size).max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PageLimits;

    #[test]
    fn oversized_requests_are_clamped() {
        let limits = PageLimits::default();
        assert_eq!(limits.effective_size(Some(666)), 500);
        assert_eq!(limits.effective_size(Some(500)), 500);
        assert_eq!(limits.effective_size(Some(35)), 35);
        assert_eq!(limits.effective_size(Some(0)), 100);
        assert_eq!(limits.effective_size(None), 100);
    }
}
