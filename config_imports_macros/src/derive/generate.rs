//! Code generation for the `Overlay` implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use super::parse::{FieldMode, OverlayField, ParsedInput};

/// Which trait method a field statement is generated for.
#[derive(Clone, Copy)]
enum Pass {
    /// `Overlay::overlay`: write present keys into the fields.
    Apply,
    /// `Overlay::validate`: check present keys without writing anything.
    Validate,
}

/// Statement handling one field during `pass`, or `None` for skipped fields.
fn field_statement(field: &OverlayField, krate: &TokenStream, pass: Pass) -> Option<TokenStream> {
    let ident = &field.ident;
    let key = &field.key;
    let aliases = field
        .aliases
        .iter()
        .map(|alias| quote! { .or_else(|| fields.get(#alias)) });
    let found = quote! { fields.get(#key) #(#aliases)* };
    let call = match (&field.mode, pass) {
        (FieldMode::Skip, _) => return None,
        (FieldMode::Flatten, Pass::Apply) => {
            return Some(quote! { #krate::Overlay::overlay(&mut self.#ident, layer)?; });
        }
        (FieldMode::Flatten, Pass::Validate) => {
            return Some(quote! { #krate::Overlay::validate(&self.#ident, layer)?; });
        }
        (FieldMode::Leaf, Pass::Apply) => {
            quote! { #krate::overlay::overlay_leaf(&mut self.#ident, value) }
        }
        (FieldMode::Leaf, Pass::Validate) => {
            quote! { #krate::overlay::validate_leaf(&self.#ident, value) }
        }
        (FieldMode::Nested, Pass::Apply) => {
            quote! { #krate::Overlay::overlay(&mut self.#ident, value) }
        }
        (FieldMode::Nested, Pass::Validate) => {
            quote! { #krate::Overlay::validate(&self.#ident, value) }
        }
    };
    Some(quote! {
        if let ::core::option::Option::Some(value) = #found {
            #call.map_err(|err| err.within(#key))?;
        }
    })
}

/// Body of one trait method: bind the layer's fields, then visit each field.
fn method_body(parsed: &ParsedInput, krate: &TokenStream, pass: Pass) -> TokenStream {
    let statements: Vec<TokenStream> = parsed
        .fields
        .iter()
        .filter_map(|field| field_statement(field, krate, pass))
        .collect();
    let uses_keys = parsed
        .fields
        .iter()
        .any(|field| matches!(field.mode, FieldMode::Leaf | FieldMode::Nested));
    let fields_binding = if uses_keys {
        quote! { let fields = #krate::overlay::layer_fields(layer)?; }
    } else {
        quote! { #krate::overlay::layer_fields(layer)?; }
    };
    quote! {
        #fields_binding
        #(#statements)*
        ::core::result::Result::Ok(())
    }
}

/// Generate `impl Overlay for <input>`.
pub(crate) fn overlay_impl(
    input: &DeriveInput,
    parsed: &ParsedInput,
    krate: &TokenStream,
) -> TokenStream {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let apply = method_body(parsed, krate, Pass::Apply);
    let validate = method_body(parsed, krate, Pass::Validate);

    quote! {
        #[automatically_derived]
        impl #impl_generics #krate::Overlay for #ident #ty_generics #where_clause {
            fn overlay(
                &mut self,
                layer: &#krate::serde_json::Value,
            ) -> ::core::result::Result<(), #krate::OverlayError> {
                #apply
            }

            fn validate(
                &self,
                layer: &#krate::serde_json::Value,
            ) -> ::core::result::Result<(), #krate::OverlayError> {
                #validate
            }
        }
    }
}
