use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

/// Result of diffing an old keyed collection against a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinDelta {
    pub entered: Vec<String>,
    pub updated: Vec<String>,
    pub exited: Vec<String>,
}

/// Explicit keyed diff: three disjoint operations instead of a library's
/// retained-selection semantics. `entered` and `updated` follow the order
/// of `new_keys`; `exited` follows the order of `old_keys`.
pub fn diff_keyed(old_keys: &[String], new_keys: &[String]) -> JoinDelta {
    let old_set: HashSet<&str> = old_keys.iter().map(String::as_str).collect();
    let new_set: HashSet<&str> = new_keys.iter().map(String::as_str).collect();

    let mut delta = JoinDelta::default();
    for key in new_keys {
        if old_set.contains(key.as_str()) {
            delta.updated.push(key.clone());
        } else {
            delta.entered.push(key.clone());
        }
    }
    for key in old_keys {
        if !new_set.contains(key.as_str()) {
            delta.exited.push(key.clone());
        }
    }
    delta
}

#[derive(Debug, Clone)]
struct Tween {
    from: f64,
    to: f64,
    started: Instant,
}

impl Tween {
    fn value_at(&self, now: Instant, duration: Duration) -> f64 {
        if duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= duration {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / duration.as_secs_f64();
        (self.to - self.from).mul_add(t, self.from)
    }
}

/// Per-chart transition registry keyed by country. Each draw retargets the
/// in-flight interpolation toward the new value; a later target supersedes
/// an earlier one mid-flight instead of queueing behind it. Entered keys
/// grow from zero, exited keys are dropped once their outgoing tween ends.
#[derive(Debug)]
pub struct Transitions {
    duration: Duration,
    tweens: HashMap<String, Tween>,
    exiting: HashSet<String>,
    keys: Vec<String>,
}

impl Transitions {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            tweens: HashMap::new(),
            exiting: HashSet::new(),
            keys: Vec::new(),
        }
    }

    /// Applies a fresh keyed data-join. Returns the delta so callers can
    /// observe what changed.
    pub fn apply(&mut self, rows: &[(String, f64)], now: Instant) -> JoinDelta {
        let new_keys: Vec<String> = rows.iter().map(|(key, _)| key.clone()).collect();
        let delta = diff_keyed(&self.keys, &new_keys);

        for (key, target) in rows {
            self.exiting.remove(key);
            match self.tweens.get_mut(key) {
                Some(tween) => {
                    if (tween.to - *target).abs() > f64::EPSILON {
                        // Retarget from wherever the old tween currently is.
                        tween.from = tween.value_at(now, self.duration);
                        tween.to = *target;
                        tween.started = now;
                    }
                }
                None => {
                    self.tweens.insert(
                        key.clone(),
                        Tween {
                            from: 0.0,
                            to: *target,
                            started: now,
                        },
                    );
                }
            }
        }

        for key in &delta.exited {
            if let Some(tween) = self.tweens.get_mut(key) {
                tween.from = tween.value_at(now, self.duration);
                tween.to = 0.0;
                tween.started = now;
                self.exiting.insert(key.clone());
            }
        }

        self.keys = new_keys;
        delta
    }

    /// Current interpolated value for a key.
    pub fn value(&self, key: &str, now: Instant) -> Option<f64> {
        self.tweens
            .get(key)
            .map(|tween| tween.value_at(now, self.duration))
    }

    pub fn prune_finished(&mut self, now: Instant) {
        let duration = self.duration;
        let finished: Vec<String> = self
            .exiting
            .iter()
            .filter(|key| {
                self.tweens
                    .get(key.as_str())
                    .is_none_or(|tween| now.saturating_duration_since(tween.started) >= duration)
            })
            .cloned()
            .collect();
        for key in finished {
            self.exiting.remove(&key);
            self.tweens.remove(&key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn delta_partitions_into_three_disjoint_sets() {
        let delta = diff_keyed(&keys(&["A", "B", "C"]), &keys(&["B", "C", "D"]));
        assert_eq!(delta.entered, keys(&["D"]));
        assert_eq!(delta.updated, keys(&["B", "C"]));
        assert_eq!(delta.exited, keys(&["A"]));
    }

    #[test]
    fn empty_old_side_enters_everything() {
        let delta = diff_keyed(&[], &keys(&["A", "B"]));
        assert_eq!(delta.entered, keys(&["A", "B"]));
        assert!(delta.updated.is_empty());
        assert!(delta.exited.is_empty());
    }

    #[test]
    fn entered_keys_grow_from_zero() {
        let mut transitions = Transitions::new(Duration::from_millis(300));
        let start = Instant::now();
        transitions.apply(&[("A".to_string(), 80.0)], start);

        let at_start = transitions.value("A", start).unwrap();
        assert!(at_start.abs() < 1e-9);

        let done = transitions
            .value("A", start + Duration::from_millis(400))
            .unwrap();
        assert!((done - 80.0).abs() < 1e-9);
    }

    #[test]
    fn retarget_supersedes_instead_of_queueing() {
        let mut transitions = Transitions::new(Duration::from_millis(300));
        let start = Instant::now();
        transitions.apply(&[("A".to_string(), 80.0)], start);

        // Halfway through, a rapid second year change retargets the bar.
        let midway = start + Duration::from_millis(150);
        let halfway_value = transitions.value("A", midway).unwrap();
        transitions.apply(&[("A".to_string(), 20.0)], midway);

        // The new tween starts from the interpolated position, not from the
        // old target, and lands on the new target.
        let just_after = transitions
            .value("A", midway + Duration::from_millis(1))
            .unwrap();
        assert!((just_after - halfway_value).abs() < 5.0);

        let settled = transitions
            .value("A", midway + Duration::from_millis(400))
            .unwrap();
        assert!((settled - 20.0).abs() < 1e-9);
    }

    #[test]
    fn exited_keys_shrink_then_drop() {
        let mut transitions = Transitions::new(Duration::from_millis(300));
        let start = Instant::now();
        transitions.apply(&[("A".to_string(), 80.0)], start);

        let later = start + Duration::from_millis(500);
        let delta = transitions.apply(&[], later);
        assert_eq!(delta.exited, keys(&["A"]));

        // Still present while animating out.
        assert!(transitions.value("A", later).is_some());

        let end = later + Duration::from_millis(400);
        transitions.prune_finished(end);
        assert!(transitions.value("A", end).is_none());
    }

    #[test]
    fn unchanged_target_does_not_restart_the_tween() {
        let mut transitions = Transitions::new(Duration::from_millis(300));
        let start = Instant::now();
        transitions.apply(&[("A".to_string(), 80.0)], start);

        let settled_at = start + Duration::from_millis(350);
        transitions.apply(&[("A".to_string(), 80.0)], settled_at);
        let value = transitions.value("A", settled_at).unwrap();
        assert!((value - 80.0).abs() < 1e-9);
    }
}
