use std::time::Duration;

/// Decides how long to wait before the next connection attempt
///
/// `attempt` is the 1-based number of the attempt that just failed. The number
/// of attempts is bounded by the caller, not by the policy.
#[cfg_attr(test, mockall::automock)]
pub trait RetryPolicy: Send + Sync {
    fn delay(&self, attempt: u32) -> Duration;
}

/// Waits the same amount of time after every failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay(pub Duration);

impl RetryPolicy for FixedDelay {
    fn delay(&self, _attempt: u32) -> Duration {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_delay_never_grows() {
        let policy = FixedDelay(Duration::from_millis(10));
        for attempt in 1..=10 {
            assert_eq!(policy.delay(attempt), Duration::from_millis(10));
        }
    }

    #[test]
    fn test_policy_is_object_safe() {
        let mut mock = MockRetryPolicy::new();
        mock.expect_delay()
            .withf(|attempt| *attempt == 2)
            .return_const(Duration::from_millis(40));

        let policy: Box<dyn RetryPolicy> = Box::new(mock);
        assert_eq!(policy.delay(2), Duration::from_millis(40));
    }
}
