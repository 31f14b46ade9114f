/// Identifies one issued request (or one keystroke, for debouncing).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Monotonically increasing token source.
///
/// Only the most recently issued token is "latest"; anything older is stale and
/// its result must be dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new token, invalidating every token issued before it.
    pub fn next(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }

    /// Invalidate every outstanding token without issuing a new one.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_last_token_is_latest() {
        let mut seq = RequestSequence::new();
        let first = seq.next();
        let second = seq.next();
        assert!(!seq.is_latest(first));
        assert!(seq.is_latest(second));
        assert!(first < second);
    }

    #[test]
    fn test_invalidate() {
        let mut seq = RequestSequence::new();
        let token = seq.next();
        seq.invalidate();
        assert!(!seq.is_latest(token));
    }
}
