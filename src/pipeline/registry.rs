use crate::domain::Entity;

/// The working set of participants for one run. Entities are addressed by index;
/// indices stay stable for the whole run because entities are only appended.
#[derive(Debug, Clone, Default)]
pub struct CanonicalRegistry {
    entities: Vec<Entity>,
}

impl CanonicalRegistry {
    /// Builds a registry from a freshly loaded universe. Provenance from any earlier run
    /// is discarded.
    pub fn new(mut entities: Vec<Entity>) -> Self {
        for entity in &mut entities {
            entity.clear_changes();
        }
        Self { entities }
    }

    /// Deep copy of the current state, kept aside as the pristine baseline.
    pub fn snapshot(&self) -> Vec<Entity> {
        self.entities.clone()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.entities.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.entities.get_mut(index)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Indices of every entity matching `predicate`.
    pub fn find_all<F>(&self, predicate: F) -> Vec<usize>
    where
        F: Fn(&Entity) -> bool,
    {
        self.entities
            .iter()
            .enumerate()
            .filter(|(_, entity)| predicate(entity))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn contains_ispb(&self, ispb: u32) -> bool {
        self.entities.iter().any(|e| e.ispb == ispb)
    }

    /// Appends a new participant and returns its index.
    pub fn insert(&mut self, entity: Entity) -> usize {
        self.entities.push(entity);
        self.entities.len() - 1
    }

    pub fn into_entities(self) -> Vec<Entity> {
        self.entities
    }
}
