use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, LitStr};

#[derive(Default, Clone)]
pub(crate) struct CborFieldAttr {
    pub(crate) rename: Option<LitStr>,
    pub(crate) tag: Option<LitStr>,
    pub(crate) skip: bool,
    pub(crate) omit_empty: bool,
}

impl CborFieldAttr {
    /// The directive tag string this field declares.
    ///
    /// `skip` becomes `"-"`. A rename to `"-"` itself is written `"-,"` so it is not read as skip.
    pub(crate) fn directive(&self) -> String {
        if let Some(tag) = &self.tag {
            return tag.value();
        }
        if self.skip {
            return "-".to_owned();
        }
        let mut tag = self.rename.as_ref().map(LitStr::value).unwrap_or_default();
        if self.omit_empty {
            tag.push_str(",omitempty");
        } else if tag == "-" {
            tag.push(',');
        }
        tag
    }
}

#[derive(Default, Clone)]
pub(crate) struct CborVariantAttr {
    pub(crate) rename: Option<LitStr>,
}

#[derive(Default, Clone, Copy)]
pub(crate) struct CborContainerAttr {
    pub(crate) marshal: bool,
}

pub(crate) fn ensure_no_cbor_attrs(attrs: &[Attribute], ctx: &str) -> syn::Result<()> {
    for a in attrs {
        if a.path().is_ident("cbor") {
            return Err(syn::Error::new(
                a.span(),
                format!("`#[cbor(...)]` is not supported on {ctx}"),
            ));
        }
    }
    Ok(())
}

pub(crate) fn parse_cbor_field_attrs(attrs: &[Attribute]) -> syn::Result<CborFieldAttr> {
    let mut out = CborFieldAttr::default();
    for attr in attrs {
        if !attr.path().is_ident("cbor") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                if out.skip {
                    return Err(meta.error("duplicate `cbor(skip)`"));
                }
                out.skip = true;
                return Ok(());
            }
            if meta.path.is_ident("omit_empty") {
                if out.omit_empty {
                    return Err(meta.error("duplicate `cbor(omit_empty)`"));
                }
                out.omit_empty = true;
                return Ok(());
            }
            if meta.path.is_ident("rename") {
                if out.rename.is_some() {
                    return Err(meta.error("duplicate `cbor(rename=...)`"));
                }
                let lit: LitStr = meta.value()?.parse()?;
                out.rename = Some(lit);
                return Ok(());
            }
            if meta.path.is_ident("tag") {
                if out.tag.is_some() {
                    return Err(meta.error("duplicate `cbor(tag=...)`"));
                }
                let lit: LitStr = meta.value()?.parse()?;
                out.tag = Some(lit);
                return Ok(());
            }
            Err(meta.error(
                "unsupported `cbor(...)` field attribute (allowed: rename, omit_empty, skip, tag)",
            ))
        })?;
    }

    if out.skip && (out.rename.is_some() || out.omit_empty) {
        return Err(syn::Error::new(
            Span::call_site(),
            "`cbor(skip)` cannot be combined with `rename` or `omit_empty`",
        ));
    }
    if out.tag.is_some() && (out.skip || out.rename.is_some() || out.omit_empty) {
        return Err(syn::Error::new(
            Span::call_site(),
            "`cbor(tag=...)` cannot be combined with other field attributes",
        ));
    }

    Ok(out)
}

pub(crate) fn parse_cbor_variant_attrs(attrs: &[Attribute]) -> syn::Result<CborVariantAttr> {
    let mut out = CborVariantAttr::default();
    for attr in attrs {
        if !attr.path().is_ident("cbor") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                if out.rename.is_some() {
                    return Err(meta.error("duplicate `cbor(rename=...)` on variant"));
                }
                let lit: LitStr = meta.value()?.parse()?;
                out.rename = Some(lit);
                return Ok(());
            }
            Err(meta.error("unsupported `cbor(...)` variant attribute (allowed: rename)"))
        })?;
    }
    Ok(out)
}

pub(crate) fn parse_cbor_container_attrs(attrs: &[Attribute]) -> syn::Result<CborContainerAttr> {
    let mut out = CborContainerAttr::default();
    for attr in attrs {
        if !attr.path().is_ident("cbor") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("marshal") {
                if out.marshal {
                    return Err(meta.error("duplicate `cbor(marshal)`"));
                }
                out.marshal = true;
                return Ok(());
            }
            Err(meta.error("unsupported `cbor(...)` container attribute (allowed: marshal)"))
        })?;
    }
    Ok(out)
}
