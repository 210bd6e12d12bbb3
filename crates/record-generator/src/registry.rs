//! Exact-match table of user-supplied randomizers.

use crate::randomizer::Randomizer;
use record_core::FieldType;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Lookup key for a randomizer binding.
///
/// Equality is structural over all three components; field names are
/// compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RandomizerKey {
    /// Type being populated
    pub owning_type: String,
    /// Declared type of the field
    pub field_type: FieldType,
    /// Field name
    pub field_name: String,
}

impl RandomizerKey {
    pub fn new(
        owning_type: impl Into<String>,
        field_type: FieldType,
        field_name: impl Into<String>,
    ) -> Self {
        Self {
            owning_type: owning_type.into(),
            field_type,
            field_name: field_name.into(),
        }
    }
}

impl fmt::Display for RandomizerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}: {}",
            self.owning_type, self.field_name, self.field_type
        )
    }
}

/// Randomizers registered for specific `(owning type, field type, field name)` triples.
///
/// Registering the same triple twice replaces the earlier binding. The
/// registry is filled while configuring a populator and moved into it on
/// build, after which it is only read.
#[derive(Clone, Default)]
pub struct RandomizerRegistry {
    randomizers: HashMap<RandomizerKey, Arc<dyn Randomizer>>,
}

impl RandomizerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a binding, replacing any existing one for the same triple.
    pub fn register(
        &mut self,
        owning_type: impl Into<String>,
        field_type: FieldType,
        field_name: impl Into<String>,
        randomizer: Arc<dyn Randomizer>,
    ) {
        let key = RandomizerKey::new(owning_type, field_type, field_name);
        self.randomizers.insert(key, randomizer);
    }

    /// Find the randomizer bound to exactly this triple.
    pub fn lookup(
        &self,
        owning_type: &str,
        field_type: &FieldType,
        field_name: &str,
    ) -> Option<&Arc<dyn Randomizer>> {
        let key = RandomizerKey::new(owning_type, field_type.clone(), field_name);
        self.randomizers.get(&key)
    }

    /// Registered keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &RandomizerKey> {
        self.randomizers.keys()
    }

    pub fn len(&self) -> usize {
        self.randomizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.randomizers.is_empty()
    }
}

impl fmt::Debug for RandomizerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.randomizers.keys()).finish()
    }
}
