//! Procedural macros for `config_imports`.
//!
//! `#[derive(Overlay)]` generates a sparse, field-by-field overlay for structs with named
//! fields: keys present in a layer replace the matching fields, keys that are
//! absent leave them untouched. Document keys follow serde's `rename`,
//! `rename_all` and `alias` attributes so a struct that deserializes from a
//! document also overlays from it.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `config_imports::Overlay`.
///
/// Field attributes:
///
/// - `#[overlay(nested)]`: recurse into the field, which must itself
///   implement `Overlay`, instead of replacing it wholesale.
/// - `#[overlay(skip)]`: never touch the field.
///
/// Struct attributes:
///
/// - `#[overlay(crate = "path")]`: path to the `config_imports` crate when it
///   is renamed or re-exported.
///
/// Fields marked `#[serde(flatten)]` receive the whole layer; fields marked
/// `#[serde(skip)]` or `#[serde(skip_deserializing)]` are left alone.
#[proc_macro_derive(Overlay, attributes(overlay))]
pub fn derive_overlay(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
