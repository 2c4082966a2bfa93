use web_time::{Duration, Instant};

/// Minimum-interval admission filter.
///
/// An input is admitted only if strictly more than `cooldown` has passed
/// since the last admitted input. A gate that has never admitted anything
/// admits the first input.
#[derive(Debug, Clone)]
pub struct CooldownGate {
    cooldown: Duration,
    last_accepted: Option<Instant>,
}

impl CooldownGate {
    /// A fresh gate with the given cooldown.
    #[must_use]
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_accepted: None,
        }
    }

    /// The configured cooldown.
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Whether an input at `now` would be admitted, without consuming it.
    #[must_use]
    pub fn is_open(&self, now: Instant) -> bool {
        self.last_accepted.is_none_or(|last| {
            now.saturating_duration_since(last) > self.cooldown
        })
    }

    /// Admit an input at `now` if the gate is open. On admission the
    /// cooldown restarts from `now`.
    pub fn try_accept(&mut self, now: Instant) -> bool {
        if !self.is_open(now) {
            return false;
        }
        self.last_accepted = Some(now);
        true
    }

    /// Forget the last admission so the next input is admitted.
    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: Duration = Duration::from_millis(2000);

    #[test]
    fn first_input_is_admitted() {
        let mut gate = CooldownGate::new(COOLDOWN);
        assert!(gate.try_accept(Instant::now()));
    }

    #[test]
    fn input_inside_the_window_is_rejected() {
        let t0 = Instant::now();
        let mut gate = CooldownGate::new(COOLDOWN);
        assert!(gate.try_accept(t0));
        assert!(!gate.try_accept(t0 + Duration::from_millis(1000)));
        assert!(!gate.try_accept(t0 + Duration::from_millis(1999)));
    }

    #[test]
    fn boundary_requires_strictly_more_than_the_cooldown() {
        let t0 = Instant::now();
        let mut gate = CooldownGate::new(COOLDOWN);
        assert!(gate.try_accept(t0));
        assert!(!gate.try_accept(t0 + COOLDOWN));
        assert!(gate.try_accept(t0 + COOLDOWN + Duration::from_millis(1)));
    }

    #[test]
    fn rejected_inputs_do_not_extend_the_window() {
        let t0 = Instant::now();
        let mut gate = CooldownGate::new(COOLDOWN);
        assert!(gate.try_accept(t0));
        assert!(!gate.try_accept(t0 + Duration::from_millis(1500)));
        assert!(gate.try_accept(t0 + Duration::from_millis(2100)));
    }

    #[test]
    fn reset_reopens_the_gate() {
        let t0 = Instant::now();
        let mut gate = CooldownGate::new(COOLDOWN);
        assert!(gate.try_accept(t0));
        assert!(!gate.is_open(t0));
        gate.reset();
        assert!(gate.try_accept(t0));
    }
}
