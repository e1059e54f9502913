//! Test-scenario table, grouped by feature.

use crate::format::CsvTable;

/// Test instructions grouped by lowercased feature name, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestMatrix {
    groups: Vec<(String, Vec<String>)>,
}

impl TestMatrix {
    /// Build from a table with `Feature, Scenario, TestSteps, ExpectedResult`.
    ///
    /// Rows without a feature are skipped.
    #[must_use]
    pub fn from_table(table: &CsvTable) -> Self {
        let mut matrix = Self::default();
        for record in table.records() {
            let feature = record.get("Feature").trim();
            if feature.is_empty() {
                continue;
            }
            let steps = record.get("TestSteps").trim();
            let expected = record.get("ExpectedResult").trim();
            let instructions = if expected.is_empty() {
                steps.to_string()
            } else {
                format!("{steps}\nExpected: {expected}")
            };
            matrix.push(&feature.to_lowercase(), instructions);
        }
        matrix
    }

    fn push(&mut self, key: &str, instructions: String) {
        if let Some((_, list)) = self.groups.iter_mut().find(|(k, _)| k == key) {
            list.push(instructions);
        } else {
            self.groups.push((key.to_string(), vec![instructions]));
        }
    }

    /// Number of feature groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Joined instructions of the first group related to `feature`.
    ///
    /// A group is related when either lowercased name contains the other.
    /// Only the first related group is considered.
    #[must_use]
    pub fn instructions_for(&self, feature: &str) -> Option<String> {
        let feature = feature.to_lowercase();
        let (_, list) = self
            .groups
            .iter()
            .find(|(key, _)| feature.contains(key.as_str()) || key.contains(feature.as_str()))?;
        let joined = list.join("\n\n");
        (!joined.is_empty()).then_some(joined)
    }
}
