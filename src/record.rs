//! Record field extraction.
//!
//! A record type declares its fields once, as a static table of [`DeclaredField`]s. The extractor
//! turns that table into the list of [`FieldDescriptor`]s the encoder walks.
//!
//! ## Directive tags
//!
//! Each declared field carries a tag string:
//!
//! - `""` – encode under the declared name.
//! - `"-"` – never encode this field.
//! - `"name"` – encode under `name`.
//! - `"name,omitempty"` / `",omitempty"` – as above, but skip the field when its value is empty.
//!
//! Options other than `omitempty` are ignored. `"-,"` encodes under the literal name `-`.

use core::any::TypeId;

use crate::codec::CborEncode;

/// Field as declared by a record type, before directives are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclaredField {
    /// Source-level field name.
    pub name: &'static str,
    /// Whether the field is externally visible (`pub`). Hidden fields are never encoded.
    pub visible: bool,
    /// Directive tag; see the module documentation.
    pub tag: &'static str,
}

impl DeclaredField {
    /// Declare a visible field with no directives.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            visible: true,
            tag: "",
        }
    }

    /// Declare a field hidden from encoding.
    #[must_use]
    pub const fn hidden(name: &'static str) -> Self {
        Self {
            name,
            visible: false,
            tag: "",
        }
    }

    /// Attach a directive tag.
    #[must_use]
    pub const fn tag(mut self, tag: &'static str) -> Self {
        self.tag = tag;
        self
    }
}

/// One encodable field of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Effective key: the tag's name part, or the declared name.
    pub name: &'static str,
    /// Index into the declared field table, passed back to [`CborRecord::field`].
    pub slot: usize,
    /// Skip the field when its value is empty.
    pub omit_empty: bool,
}

/// A user-defined type encoded as a map keyed by field names.
///
/// Usually implemented by `#[derive(CborEncode)]` on a struct with named fields.
pub trait CborRecord {
    /// Identity under which the type's descriptors are cached.
    fn record_id(&self) -> TypeId;

    /// Type name used in diagnostics.
    fn record_name(&self) -> &'static str;

    /// The static table of declared fields, in declaration order.
    fn declared_fields(&self) -> &'static [DeclaredField];

    /// The value stored in the given slot, or `None` if the slot holds nothing encodable.
    fn field(&self, slot: usize) -> Option<&dyn CborEncode>;
}

/// Parsed directive tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// The field is always omitted.
    Skip,
    /// The field is encoded.
    Keep {
        /// Replacement key, if any.
        rename: Option<&'static str>,
        /// Whether `omitempty` was given.
        omit_empty: bool,
    },
}

/// Parse a directive tag.
#[must_use]
pub fn parse_tag(tag: &'static str) -> Directive {
    if tag == "-" {
        return Directive::Skip;
    }
    let (name, options) = tag.split_once(',').unwrap_or((tag, ""));
    let omit_empty = options.split(',').any(|opt| opt == "omitempty");
    Directive::Keep {
        rename: (!name.is_empty()).then_some(name),
        omit_empty,
    }
}

/// Compute the descriptors of a declared field table.
#[must_use]
pub fn fields_for(declared: &[DeclaredField]) -> Vec<FieldDescriptor> {
    declared
        .iter()
        .enumerate()
        .filter(|(_, field)| field.visible)
        .filter_map(|(slot, field)| match parse_tag(field.tag) {
            Directive::Skip => None,
            Directive::Keep { rename, omit_empty } => Some(FieldDescriptor {
                name: rename.unwrap_or(field.name),
                slot,
                omit_empty,
            }),
        })
        .collect()
}
