use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use tracing::trace;

use crate::record::{fields_for, CborRecord, FieldDescriptor};

static GLOBAL_FIELD_CACHE: OnceLock<FieldCache> = OnceLock::new();

/// Memoized record field descriptors, keyed by record type.
///
/// Entries are computed on first use and never invalidated. Lookups take the shared lock; a miss
/// computes the descriptors without holding the lock, then takes the exclusive lock to insert.
/// Two threads racing on the same type compute identical lists and the first insert wins.
#[derive(Debug, Default)]
pub struct FieldCache {
    entries: RwLock<HashMap<TypeId, Arc<[FieldDescriptor]>>>,
}

impl FieldCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used by [`marshal`](crate::marshal) and [`Encoder::new`](crate::Encoder::new).
    pub fn global() -> &'static Self {
        GLOBAL_FIELD_CACHE.get_or_init(Self::new)
    }

    /// Return the descriptors of `record`'s type, computing them on first use.
    pub fn fields_of<R: CborRecord + ?Sized>(&self, record: &R) -> Arc<[FieldDescriptor]> {
        let id = record.record_id();
        if let Some(fields) = self.entries.read().get(&id) {
            return Arc::clone(fields);
        }

        let computed: Arc<[FieldDescriptor]> = fields_for(record.declared_fields()).into();
        trace!(
            record = record.record_name(),
            fields = computed.len(),
            "computed record field descriptors"
        );

        let mut entries = self.entries.write();
        Arc::clone(entries.entry(id).or_insert(computed))
    }

    /// Returns `true` if descriptors for the given type id are cached.
    #[must_use]
    pub fn contains(&self, id: TypeId) -> bool {
        self.entries.read().contains_key(&id)
    }

    /// Number of cached record types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if no record type has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
