use std::collections::BTreeMap;

use super::field::Field;
use super::source::Source;

/// Provenance of one field changed during the current run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    /// Source of the most recent write
    pub source: Source,

    /// Value before the run touched the field
    pub old_value: String,

    /// Value after the most recent write
    pub new_value: String,
}

/// Per-entity record of the fields changed in this run, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: BTreeMap<Field, FieldChange>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a write. A later write for the same field replaces the source and the new
    /// value but keeps the value the field had before the run.
    pub fn add_change(&mut self, field: Field, source: Source, old_value: String, new_value: String) {
        match self.changes.get_mut(&field) {
            Some(existing) => {
                existing.source = source;
                existing.new_value = new_value;
            }
            None => {
                self.changes.insert(
                    field,
                    FieldChange {
                        source,
                        old_value,
                        new_value,
                    },
                );
            }
        }
    }

    pub fn get(&self, field: Field) -> Option<&FieldChange> {
        self.changes.get(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Field, &FieldChange)> {
        self.changes.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn clear(&mut self) {
        self.changes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_write_keeps_original_old_value() {
        let mut changes = ChangeSet::new();
        changes.add_change(Field::ShortName, Source::Slc, "A".into(), "B".into());
        changes.add_change(Field::ShortName, Source::Ctc, "B".into(), "C".into());

        let change = changes.get(Field::ShortName).unwrap();
        assert_eq!(change.source, Source::Ctc);
        assert_eq!(change.old_value, "A");
        assert_eq!(change.new_value, "C");
        assert_eq!(changes.len(), 1);
    }
}
