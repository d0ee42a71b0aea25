use crate::model::option::SelectOption;

/// The picked items, in the order they were added.
///
/// No two items share the same (value, label) pair. Note that removal matches
/// on `value` alone, so two items with one value and different labels can
/// coexist but are removed together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedItems {
    items: Vec<SelectOption>,
}

impl SelectedItems {
    /// Seed from the initial values given at mount.
    /// Seed with the initial values as given. Duplicates are only folded
    /// on the first add.
    pub fn from_initial(initial: &[SelectOption]) -> Self {
        SelectedItems {
            items: initial.to_vec(),
        }
    }

    pub fn as_slice(&self) -> &[SelectOption] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first(&self) -> Option<&SelectOption> {
        self.items.first()
    }

    pub fn get(&self, index: usize) -> Option<&SelectOption> {
        self.items.get(index)
    }

    /// Append an item, then drop any repeated (value, label) pair across the
    /// whole list, keeping the first occurrence.
    pub fn add(&mut self, item: SelectOption) -> &[SelectOption] {
        self.items.push(item.committed());
        dedupe_pairs(&mut self.items);
        tracing::debug!(count = self.items.len(), "selection added");
        &self.items
    }

    /// Drop every item whose value matches, ignoring case. Absent values are a no-op.
    pub fn remove_value(&mut self, value: &str) -> &[SelectOption] {
        let needle = value.to_lowercase();
        self.items.retain(|item| item.value.to_lowercase() != needle);
        tracing::debug!(value, count = self.items.len(), "selection removed");
        &self.items
    }

    /// Drop the most recently added item.
    pub fn pop_last(&mut self) -> &[SelectOption] {
        self.items.pop();
        &self.items
    }

    /// Exact value match, as used when hiding picked entries from the dropdown
    pub fn contains_value(&self, value: &str) -> bool {
        self.items.iter().any(|item| item.value == value)
    }

    /// Text of the condensed pill: first label, then `+N` for the rest.
    ///
    /// A single selection keeps the trailing space the `+N` would follow.
    pub fn summary_text(&self) -> Option<String> {
        let first = self.items.first()?;
        let more = if self.items.len() > 1 {
            format!("+{}", self.items.len() - 1)
        } else {
            String::new()
        };
        Some(format!("{} {}", first.label, more))
    }
}

/// Keep the first occurrence of each exact (value, label) pair.
fn dedupe_pairs(items: &mut Vec<SelectOption>) {
    let mut kept: Vec<SelectOption> = Vec::with_capacity(items.len());
    for item in items.drain(..) {
        if !kept.iter().any(|k| k.same_pair(&item)) {
            kept.push(item);
        }
    }
    *items = kept;
}
