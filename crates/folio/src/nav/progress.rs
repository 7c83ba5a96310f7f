//! Completion percentage along the main sequence.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::deck::NodeId;

/// How a main-sequence index maps to a percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressPolicy {
    /// `i / (n - 1)`: the first entry is 0%, the last 100%.
    #[default]
    Endpoints,
    /// `(i + 1) / n`: the first entry already counts as one step done.
    Ordinal,
}

impl ProgressPolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "endpoints" => Some(Self::Endpoints),
            "ordinal" => Some(Self::Ordinal),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Endpoints => "endpoints",
            Self::Ordinal => "ordinal",
        }
    }

    /// Percentage for entry `index` of a sequence of `len` entries.
    pub fn percent(self, index: usize, len: usize) -> f32 {
        if len == 0 {
            return 0.0;
        }
        let value = match self {
            Self::Endpoints if len == 1 => 1.0,
            Self::Endpoints => index as f32 / (len - 1) as f32,
            Self::Ordinal => (index + 1) as f32 / len as f32,
        };
        (value * 100.0).clamp(0.0, 100.0)
    }
}

pub type ProgressObserver = Box<dyn FnMut(f32)>;

/// Tracks progress through the main sequence and notifies observers.
///
/// Ids outside the sequence leave the value untouched, so branching off to a
/// card or a satellite and coming back does not move the indicator.
pub struct ProgressTracker {
    sequence: Vec<NodeId>,
    policy: ProgressPolicy,
    value: f32,
    observers: Vec<ProgressObserver>,
}

impl ProgressTracker {
    pub fn new(sequence: Vec<NodeId>, policy: ProgressPolicy) -> Self {
        Self {
            sequence,
            policy,
            value: 0.0,
            observers: Vec::new(),
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Register an observer. It is called synchronously on every update.
    pub fn subscribe(&mut self, observer: ProgressObserver) {
        self.observers.push(observer);
    }

    /// Record a visit to `id`. Returns the new value if `id` is on the main
    /// sequence, `None` otherwise.
    pub fn update(&mut self, id: &str) -> Option<f32> {
        let index = self.sequence.iter().position(|s| s == id)?;
        self.value = self.policy.percent(index, self.sequence.len());
        log::trace!("progress: '{id}' is {}/{} -> {:.1}%", index + 1, self.sequence.len(), self.value);
        for observer in &mut self.observers {
            observer(self.value);
        }
        Some(self.value)
    }
}

impl fmt::Debug for ProgressTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("sequence", &self.sequence)
            .field("policy", &self.policy)
            .field("value", &self.value)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn tracker(policy: ProgressPolicy) -> ProgressTracker {
        let seq = ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
        ProgressTracker::new(seq, policy)
    }

    #[test]
    fn endpoints_span_zero_to_hundred() {
        let p = ProgressPolicy::Endpoints;
        assert_eq!(p.percent(0, 5), 0.0);
        assert_eq!(p.percent(2, 5), 50.0);
        assert_eq!(p.percent(4, 5), 100.0);
        assert_eq!(p.percent(0, 1), 100.0);
    }

    #[test]
    fn ordinal_starts_at_one_step() {
        let p = ProgressPolicy::Ordinal;
        assert_eq!(p.percent(0, 4), 25.0);
        assert_eq!(p.percent(3, 4), 100.0);
        assert_eq!(p.percent(0, 1), 100.0);
    }

    #[test]
    fn monotonic_along_sequence() {
        for policy in [ProgressPolicy::Endpoints, ProgressPolicy::Ordinal] {
            let mut t = tracker(policy);
            let mut last = -1.0;
            for id in ["a", "b", "c", "d", "e"] {
                let v = t.update(id).unwrap();
                assert!(v >= last, "{policy:?}: {v} < {last}");
                last = v;
            }
            assert_eq!(last, 100.0);
        }
    }

    #[test]
    fn off_path_keeps_value() {
        let mut t = tracker(ProgressPolicy::Endpoints);
        t.update("c");
        assert_eq!(t.update("card"), None);
        assert_eq!(t.value(), 50.0);
    }

    #[test]
    fn observers_see_main_path_updates_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut t = tracker(ProgressPolicy::Endpoints);
        t.subscribe(Box::new(move |v| sink.borrow_mut().push(v)));

        t.update("b");
        t.update("satellite");
        t.update("e");
        assert_eq!(*seen.borrow(), vec![25.0, 100.0]);
    }

    #[test]
    fn policy_names() {
        assert_eq!(ProgressPolicy::from_name("ordinal"), Some(ProgressPolicy::Ordinal));
        assert_eq!(ProgressPolicy::from_name("nope"), None);
        assert_eq!(ProgressPolicy::default().as_str(), "endpoints");
    }
}
