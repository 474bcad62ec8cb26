//! Attribute and input parsing for the `Overlay` derive macro.

mod serde_attrs;

use syn::meta::ParseNestedMeta;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, Token, parenthesized};

use serde_attrs::{SerdeFieldAttrs, serde_field_attrs, serde_rename_all};

/// Struct-level `#[overlay(...)]` metadata.
#[derive(Default)]
pub(crate) struct StructAttrs {
    /// Path used in generated code to reach the `config_imports` crate.
    pub crate_path: Option<syn::Path>,
}

/// How a field takes part in an overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum FieldMode {
    /// Present keys replace the field wholesale.
    Leaf,
    /// Present keys recurse into the field's own overlay.
    Nested,
    /// The whole layer is overlaid onto the field.
    Flatten,
    /// The field is never touched.
    Skip,
}

/// A named field together with the document keys it answers to.
pub(crate) struct OverlayField {
    pub ident: syn::Ident,
    pub mode: FieldMode,
    /// Key looked up first.
    pub key: String,
    /// Keys tried, in order, when `key` is absent.
    pub aliases: Vec<String>,
}

/// Everything the generator needs from the derive input.
pub(crate) struct ParsedInput {
    pub struct_attrs: StructAttrs,
    pub fields: Vec<OverlayField>,
}

/// Skip over an attribute entry this macro does not care about.
fn discard_unknown(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

fn parse_overlay_attrs<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("overlay")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Extracts `#[overlay(...)]` metadata applied to a struct.
///
/// Only `crate = "..."` is recognised; any other key is rejected so typos
/// surface at compile time.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_overlay_attrs(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let lit = meta.value()?.parse::<LitStr>()?;
            out.crate_path = Some(lit.parse::<syn::Path>()?);
            Ok(())
        } else {
            Err(meta.error("unsupported overlay attribute; expected `crate = \"...\"`"))
        }
    })?;
    Ok(out)
}

/// Extracts the overlay mode from `#[overlay(...)]` and serde field attributes.
pub(crate) fn parse_field_mode(field: &syn::Field, serde: &SerdeFieldAttrs) -> syn::Result<FieldMode> {
    let mut mode = None;
    parse_overlay_attrs(&field.attrs, |meta| {
        let requested = if meta.path.is_ident("nested") {
            FieldMode::Nested
        } else if meta.path.is_ident("skip") {
            FieldMode::Skip
        } else {
            return Err(meta.error("unsupported overlay attribute; expected `nested` or `skip`"));
        };
        if mode.replace(requested).is_some() {
            return Err(meta.error("`nested` and `skip` are mutually exclusive"));
        }
        Ok(())
    })?;

    if serde.skip {
        return Ok(FieldMode::Skip);
    }
    if serde.flatten {
        return match mode {
            Some(FieldMode::Nested) => Err(syn::Error::new_spanned(
                field,
                "`#[serde(flatten)]` fields already receive the whole layer; drop `#[overlay(nested)]`",
            )),
            Some(other) => Ok(other),
            None => Ok(FieldMode::Flatten),
        };
    }
    Ok(mode.unwrap_or(FieldMode::Leaf))
}

/// Gathers the fields of the user-provided struct and their overlay metadata.
///
/// Only structs with named fields are accepted.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Overlay requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Overlay can only be derived for structs",
            ));
        }
    };

    let rename_all = serde_rename_all(&input.attrs)?;
    let mut out = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "unnamed fields are not supported"));
        };
        let serde = serde_field_attrs(&field.attrs)?;
        let mode = parse_field_mode(field, &serde)?;
        let key = serde.rename.clone().unwrap_or_else(|| {
            let raw = ident.to_string();
            let name = raw.strip_prefix("r#").unwrap_or(&raw);
            rename_all.map_or_else(|| name.to_owned(), |rule| rule.apply(name))
        });
        out.push(OverlayField {
            ident,
            mode,
            key,
            aliases: serde.aliases,
        });
    }
    Ok(ParsedInput {
        struct_attrs,
        fields: out,
    })
}

#[cfg(test)]
mod tests;
