//! Request ids for content calls.
//!
//! Every call gets a fresh, strictly increasing id. Only the latest id per
//! purpose may apply its response; anything older is stale and dropped.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    Mission,
    Narration,
}

#[derive(Resource, Debug, Default)]
pub struct ContentRequests {
    next: u64,
    mission: Option<RequestId>,
    narration: Option<RequestId>,
}

impl ContentRequests {
    pub fn issue(&mut self, purpose: Purpose) -> RequestId {
        self.next += 1;
        let id = RequestId(self.next);
        *self.slot(purpose) = Some(id);
        id
    }

    pub fn is_latest(&self, purpose: Purpose, id: RequestId) -> bool {
        let latest = match purpose {
            Purpose::Mission => self.mission,
            Purpose::Narration => self.narration,
        };
        latest == Some(id)
    }

    /// Mark the request answered so a duplicate or late response is ignored.
    pub fn settle(&mut self, purpose: Purpose, id: RequestId) {
        let slot = self.slot(purpose);
        if *slot == Some(id) {
            *slot = None;
        }
    }

    /// Forget every outstanding request (restart).
    pub fn invalidate(&mut self) {
        self.mission = None;
        self.narration = None;
    }

    fn slot(&mut self, purpose: Purpose) -> &mut Option<RequestId> {
        match purpose {
            Purpose::Mission => &mut self.mission,
            Purpose::Narration => &mut self.narration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase_across_purposes() {
        let mut r = ContentRequests::default();
        let a = r.issue(Purpose::Mission);
        let b = r.issue(Purpose::Narration);
        let c = r.issue(Purpose::Mission);
        assert!(a < b && b < c);
    }

    #[test]
    fn newer_request_makes_older_stale() {
        let mut r = ContentRequests::default();
        let old = r.issue(Purpose::Mission);
        let new = r.issue(Purpose::Mission);
        assert!(!r.is_latest(Purpose::Mission, old));
        assert!(r.is_latest(Purpose::Mission, new));
    }

    #[test]
    fn purposes_do_not_shadow_each_other() {
        let mut r = ContentRequests::default();
        let mission = r.issue(Purpose::Mission);
        r.issue(Purpose::Narration);
        assert!(r.is_latest(Purpose::Mission, mission));
    }

    #[test]
    fn settled_and_invalidated_requests_are_stale() {
        let mut r = ContentRequests::default();
        let m = r.issue(Purpose::Mission);
        r.settle(Purpose::Mission, m);
        assert!(!r.is_latest(Purpose::Mission, m));

        let n = r.issue(Purpose::Narration);
        r.invalidate();
        assert!(!r.is_latest(Purpose::Narration, n));
    }
}
