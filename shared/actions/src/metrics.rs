use metrics::counter;

/// Counters for requests forwarded to the host. No-ops until a recorder is installed.
pub struct ActionMetrics {
    ns: &'static str,
}

impl Default for ActionMetrics {
    fn default() -> Self {
        Self::new("ma")
    }
}

impl ActionMetrics {
    pub fn new(namespace: &'static str) -> Self {
        Self { ns: namespace }
    }

    #[inline]
    pub fn request_issued(&self, request: &'static str) {
        counter!(format!("{}_requests_total", self.ns), "request" => request).increment(1);
    }

    #[inline]
    pub fn request_failed(&self, request: &'static str) {
        counter!(format!("{}_request_failures_total", self.ns), "request" => request).increment(1);
    }

    #[inline]
    pub fn action_refused(&self, reason: &'static str) {
        counter!(format!("{}_actions_refused_total", self.ns), "reason" => reason).increment(1);
    }
}
