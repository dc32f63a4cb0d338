//! Load generations for discarding superseded responses.

/// Identifies one load request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Monotonic counter; only the most recently issued ticket is current
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    current: u64,
}

impl Generation {
    pub fn issue(&mut self) -> LoadTicket {
        self.current += 1;
        LoadTicket(self.current)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.current
    }

    /// Make every outstanding ticket stale
    pub fn invalidate(&mut self) {
        self.current += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_wins() {
        let mut generation = Generation::default();
        let first = generation.issue();
        let second = generation.issue();

        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    #[test]
    fn test_invalidate_stales_outstanding_ticket() {
        let mut generation = Generation::default();
        let ticket = generation.issue();
        generation.invalidate();

        assert!(!generation.is_current(ticket));
    }
}
