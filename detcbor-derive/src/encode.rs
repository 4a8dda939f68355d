use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{
    parse_quote, spanned::Spanned, DataEnum, DataStruct, Fields, FieldsNamed, Generics, Ident,
    LitStr, Type, Visibility, WhereClause,
};

use crate::attrs::{ensure_no_cbor_attrs, parse_cbor_field_attrs, parse_cbor_variant_attrs};
use crate::types::{static_self_type, type_mentions_self};
use crate::util::{add_where_bound, empty_where_clause};

fn encode_where_clause(base: Option<&WhereClause>, bounds: &[&Type]) -> WhereClause {
    let mut wc = base.cloned().unwrap_or_else(empty_where_clause);
    for ty in bounds {
        add_where_bound(&mut wc, ty, quote!(::detcbor::CborEncode));
    }
    wc
}

pub(crate) fn encode_struct(
    name: &Ident,
    generics: &Generics,
    data: &DataStruct,
) -> syn::Result<TokenStream> {
    match &data.fields {
        Fields::Named(fields) => encode_record(name, generics, fields),

        Fields::Unnamed(fields) => {
            let (impl_generics, ty_generics, base_where_clause) = generics.split_for_impl();
            let mut items = Vec::new();
            let mut bounds = Vec::new();

            for (idx, field) in fields.unnamed.iter().enumerate() {
                ensure_no_cbor_attrs(&field.attrs, "tuple struct fields")?;
                let index = syn::Index::from(idx);

                if !type_mentions_self(&field.ty, name) {
                    bounds.push(&field.ty);
                }

                items.push(quote! { &self.#index });
            }

            let len = items.len();
            let wc = encode_where_clause(base_where_clause, &bounds);

            Ok(quote! {
                impl #impl_generics ::detcbor::CborEncode for #name #ty_generics #wc {
                    fn encode(&self, enc: &mut ::detcbor::Encoder<'_>) -> ::core::result::Result<(), ::detcbor::CborError> {
                        let items: [&dyn ::detcbor::CborEncode; #len] = [#(#items),*];
                        enc.seq(&items)
                    }
                }

                impl #impl_generics ::detcbor::CborArrayElem for #name #ty_generics #base_where_clause {}
            })
        }

        Fields::Unit => {
            let (impl_generics, ty_generics, base_where_clause) = generics.split_for_impl();
            Ok(quote! {
                impl #impl_generics ::detcbor::CborEncode for #name #ty_generics #base_where_clause {
                    fn encode(&self, enc: &mut ::detcbor::Encoder<'_>) -> ::core::result::Result<(), ::detcbor::CborError> {
                        enc.null()
                    }
                }

                impl #impl_generics ::detcbor::CborArrayElem for #name #ty_generics #base_where_clause {}
            })
        }
    }
}

/// Named-field structs become records: a static field table plus slot access, resolved at
/// runtime through the field cache.
fn encode_record(name: &Ident, generics: &Generics, fields: &FieldsNamed) -> syn::Result<TokenStream> {
    let (impl_generics, ty_generics, base_where_clause) = generics.split_for_impl();
    let mut declared = Vec::new();
    let mut arms = Vec::new();
    let mut bounds = Vec::new();

    for (slot, field) in fields.named.iter().enumerate() {
        let attr = parse_cbor_field_attrs(&field.attrs)?;
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new(field.span(), "expected a named field"))?;
        let field_name = LitStr::new(&ident.unraw().to_string(), ident.span());
        let tag = attr.directive();
        let visible = matches!(field.vis, Visibility::Public(_));

        let decl = if visible {
            quote!(::detcbor::DeclaredField::new(#field_name))
        } else {
            quote!(::detcbor::DeclaredField::hidden(#field_name))
        };
        declared.push(if tag.is_empty() {
            decl
        } else {
            quote!(#decl.tag(#tag))
        });

        if !visible || tag == "-" {
            continue;
        }
        if !type_mentions_self(&field.ty, name) {
            bounds.push(&field.ty);
        }
        arms.push(quote! {
            #slot => ::core::option::Option::Some(&self.#ident as &dyn ::detcbor::CborEncode)
        });
    }

    let mut wc = encode_where_clause(base_where_clause, &bounds);
    for tp in generics.type_params() {
        let ident = &tp.ident;
        wc.predicates.push(parse_quote!(#ident: 'static));
    }
    let static_ty = static_self_type(name, generics);

    Ok(quote! {
        impl #impl_generics ::detcbor::CborRecord for #name #ty_generics #wc {
            fn record_id(&self) -> ::core::any::TypeId {
                ::core::any::TypeId::of::<#static_ty>()
            }

            fn record_name(&self) -> &'static str {
                ::core::any::type_name::<Self>()
            }

            fn declared_fields(&self) -> &'static [::detcbor::DeclaredField] {
                const FIELDS: &[::detcbor::DeclaredField] = &[#(#declared),*];
                FIELDS
            }

            fn field(&self, slot: usize) -> ::core::option::Option<&dyn ::detcbor::CborEncode> {
                match slot {
                    #(#arms,)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #impl_generics ::detcbor::CborEncode for #name #ty_generics #wc {
            fn encode(&self, enc: &mut ::detcbor::Encoder<'_>) -> ::core::result::Result<(), ::detcbor::CborError> {
                enc.record(self)
            }
        }

        impl #impl_generics ::detcbor::CborArrayElem for #name #ty_generics #base_where_clause {}
    })
}

pub(crate) fn encode_enum(
    name: &Ident,
    generics: &Generics,
    data: &DataEnum,
) -> syn::Result<TokenStream> {
    let (impl_generics, ty_generics, base_where_clause) = generics.split_for_impl();

    let mut arms = Vec::new();
    let mut bounds = Vec::new();

    for variant in &data.variants {
        let v_attr = parse_cbor_variant_attrs(&variant.attrs)?;
        let vname = v_attr.rename.unwrap_or_else(|| {
            LitStr::new(&variant.ident.unraw().to_string(), variant.ident.span())
        });
        let ident = &variant.ident;

        match &variant.fields {
            Fields::Unit => {
                arms.push(quote! {
                    Self::#ident => __enc.text(#vname)
                });
            }

            Fields::Unnamed(fields) => {
                let mut pats = Vec::new();
                for (idx, field) in fields.unnamed.iter().enumerate() {
                    ensure_no_cbor_attrs(&field.attrs, "tuple enum variant fields")?;
                    if !type_mentions_self(&field.ty, name) {
                        bounds.push(&field.ty);
                    }
                    pats.push(format_ident!("v{idx}"));
                }

                if pats.len() == 1 {
                    arms.push(quote! {
                        Self::#ident(v0) => __enc.fields(&[(#vname, v0 as &dyn ::detcbor::CborEncode)])
                    });
                } else {
                    let len = pats.len();
                    arms.push(quote! {
                        Self::#ident( #(#pats),* ) => {
                            let items: [&dyn ::detcbor::CborEncode; #len] = [#(#pats),*];
                            __enc.fields(&[(#vname, &items as &dyn ::detcbor::CborEncode)])
                        }
                    });
                }
            }

            Fields::Named(fields) => {
                let mut pats = Vec::new();
                let mut pushes = Vec::new();

                for field in &fields.named {
                    let attr = parse_cbor_field_attrs(&field.attrs)?;
                    let f_ident = field
                        .ident
                        .as_ref()
                        .ok_or_else(|| syn::Error::new(field.span(), "expected a named field"))?;
                    if attr.tag.is_some() {
                        return Err(syn::Error::new(
                            field.span(),
                            "`cbor(tag=...)` is only supported on struct fields",
                        ));
                    }
                    if attr.skip {
                        continue;
                    }
                    pats.push(f_ident.clone());
                    if !type_mentions_self(&field.ty, name) {
                        bounds.push(&field.ty);
                    }

                    let key = attr
                        .rename
                        .unwrap_or_else(|| LitStr::new(&f_ident.unraw().to_string(), f_ident.span()));
                    let push = quote! { __fields.push((#key, #f_ident as &dyn ::detcbor::CborEncode)); };
                    pushes.push(if attr.omit_empty {
                        quote! {
                            if !::detcbor::CborEncode::is_empty_value(#f_ident) {
                                #push
                            }
                        }
                    } else {
                        push
                    });
                }

                let cap = pushes.len();
                arms.push(quote! {
                    Self::#ident { #(#pats,)* .. } => {
                        #[allow(unused_mut)]
                        let mut __fields: ::std::vec::Vec<(&str, &dyn ::detcbor::CborEncode)> =
                            ::std::vec::Vec::with_capacity(#cap);
                        #(#pushes)*
                        __enc.fields(&[(#vname, &::detcbor::FieldsRef(&__fields) as &dyn ::detcbor::CborEncode)])
                    }
                });
            }
        }
    }

    let wc = encode_where_clause(base_where_clause, &bounds);
    // An uninhabited enum has to be matched by value for the empty match to type-check.
    let body = if arms.is_empty() {
        quote! { match *self {} }
    } else {
        quote! { match self { #(#arms),* } }
    };

    Ok(quote! {
        impl #impl_generics ::detcbor::CborEncode for #name #ty_generics #wc {
            #[allow(unused_variables)]
            fn encode(&self, __enc: &mut ::detcbor::Encoder<'_>) -> ::core::result::Result<(), ::detcbor::CborError> {
                #body
            }
        }

        impl #impl_generics ::detcbor::CborArrayElem for #name #ty_generics #base_where_clause {}
    })
}

/// Types that supply their own bytes through `MarshalCbor`.
pub(crate) fn encode_marshal(name: &Ident, generics: &Generics) -> TokenStream {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    quote! {
        impl #impl_generics ::detcbor::CborEncode for #name #ty_generics #where_clause {
            fn encode(&self, enc: &mut ::detcbor::Encoder<'_>) -> ::core::result::Result<(), ::detcbor::CborError> {
                enc.marshaler(self)
            }
        }

        impl #impl_generics ::detcbor::CborArrayElem for #name #ty_generics #where_clause {}
    }
}
