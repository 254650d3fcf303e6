//! Guard against out-of-order fetch responses
//!
//! Each filter change starts a new request generation. A response may only
//! publish its result while its token is still the newest generation, so a
//! slow earlier fetch can never overwrite the state produced by a later one.
//! Single-threaded by design, like the event loop that drives it.

/// Monotonic request-generation counter.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
}

/// Token identifying one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request generation, invalidating all earlier tokens.
    pub fn begin(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    /// Whether a response carrying `token` is still the newest request and
    /// may therefore update state.
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_latest_request_may_publish() {
        let mut seq = RequestSequencer::new();
        let first = seq.begin();
        let second = seq.begin();

        assert!(!seq.is_current(first), "stale response must be dropped");
        assert!(seq.is_current(second));
    }

    #[test]
    fn responses_arriving_out_of_order_cannot_regress_state() {
        let mut seq = RequestSequencer::new();
        let slow = seq.begin();
        let fast = seq.begin();

        // The newer request resolves first and publishes.
        assert!(seq.is_current(fast));
        // The older one resolves afterwards and is rejected.
        assert!(!seq.is_current(slow));
    }
}
