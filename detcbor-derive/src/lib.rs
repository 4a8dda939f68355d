//! Derive macro for `detcbor::CborEncode`.
//!
//! - Structs with named fields become records: maps keyed by their `pub` fields, with per-field
//!   `#[cbor(rename = "..")]`, `#[cbor(omit_empty)]`, `#[cbor(skip)]`, or a raw
//!   `#[cbor(tag = "name,omitempty")]` directive.
//! - Tuple structs become arrays; unit structs become null.
//! - Enums are externally tagged: unit variants encode as their name, every other variant as a
//!   single-entry map from the variant name to its payload.
//! - `#[cbor(marshal)]` on the type delegates to its `MarshalCbor` implementation.

extern crate proc_macro;

mod attrs;
mod encode;
mod types;
mod util;

use proc_macro::TokenStream;
use syn::{parse_macro_input, Data, DeriveInput};

use crate::attrs::parse_cbor_container_attrs;
use crate::encode::{encode_enum, encode_marshal, encode_struct};

#[proc_macro_derive(CborEncode, attributes(cbor))]
pub fn derive_cbor_encode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let out = parse_cbor_container_attrs(&input.attrs).and_then(|container| {
        if container.marshal {
            return Ok(encode_marshal(&input.ident, &input.generics));
        }
        match &input.data {
            Data::Struct(data) => encode_struct(&input.ident, &input.generics, data),
            Data::Enum(data) => encode_enum(&input.ident, &input.generics, data),
            Data::Union(u) => Err(syn::Error::new(
                u.union_token.span,
                "CborEncode not supported for unions",
            )),
        }
    });
    TokenStream::from(out.unwrap_or_else(syn::Error::into_compile_error))
}
