// Participant data shapes shared by the parsers, the merge passes and the writers

pub mod change;
pub mod entity;
pub mod field;
pub mod flag;
pub mod source;

pub use change::{ChangeSet, FieldChange};
pub use entity::Entity;
pub use field::{Field, Update};
pub use flag::Flag;
pub use source::Source;
