use crate::order::KeyOrder;

/// Default initial capacity of an encoder's output buffer.
pub const DEFAULT_INITIAL_CAPACITY: usize = 64;

/// Key ordering applied to record-derived maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordKeyOrder {
    /// Sort record fields by encoded key, exactly like native maps.
    #[default]
    Canonical,
    /// Emit record fields in declaration order.
    Declaration,
}

/// Encode-time configuration.
///
/// Options only select between deterministic orderings; for a fixed set of options the output is
/// a pure function of the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Ordering of encoded keys in native maps (and in records under
    /// [`RecordKeyOrder::Canonical`]).
    pub map_key_order: KeyOrder,
    /// Ordering of record fields.
    pub record_key_order: RecordKeyOrder,
    /// Initial capacity reserved for the output buffer.
    pub initial_capacity: usize,
}

impl EncodeOptions {
    /// Options that reproduce declaration-ordered records and length-first map keys.
    #[must_use]
    pub const fn legacy() -> Self {
        Self {
            map_key_order: KeyOrder::LengthFirst,
            record_key_order: RecordKeyOrder::Declaration,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }

    /// Replace the map key order.
    #[must_use]
    pub const fn with_map_key_order(mut self, order: KeyOrder) -> Self {
        self.map_key_order = order;
        self
    }

    /// Replace the record key order.
    #[must_use]
    pub const fn with_record_key_order(mut self, order: RecordKeyOrder) -> Self {
        self.record_key_order = order;
        self
    }

    /// Replace the initial output capacity.
    #[must_use]
    pub const fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            map_key_order: KeyOrder::Lexicographic,
            record_key_order: RecordKeyOrder::Canonical,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}
