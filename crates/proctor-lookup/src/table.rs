use std::collections::HashMap;

use tracing::debug;

use crate::builtin;

/// Immutable mapping from a normalized class-time (or course-code) string
/// to a human-readable exam-time window.
///
/// Built once at startup; there is no mutation API after construction, so
/// concurrent reads need no locking — share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ScheduleTable {
    entries: HashMap<String, String>,
}

impl ScheduleTable {
    /// Empty table. Mostly useful in tests; production code starts from
    /// [`ScheduleTable::builtin`].
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Table preloaded with the compiled-in finals grid.
    pub fn builtin() -> Self {
        Self::new().with_entries(
            builtin::ENTRIES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    /// Merge additional (class time, exam window) pairs into the table,
    /// normalizing keys. Later pairs win on collision, so operator config
    /// entries override the built-in grid.
    pub fn with_entries<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (class_time, exam_time) in pairs {
            self.entries.insert(normalize(&class_time), exam_time);
        }
        self
    }

    /// Look up the exam window for a class time or course code.
    ///
    /// The input is trimmed and lowercased before comparison; no
    /// other canonicalization happens. Unknown keys return `None` — never
    /// an error.
    pub fn resolve(&self, class_time: &str) -> Option<&str> {
        let key = normalize(class_time);
        let result = self.entries.get(&key).map(String::as_str);
        debug!(key = %key, hit = result.is_some(), "schedule lookup");
        result
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ScheduleTable {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}
