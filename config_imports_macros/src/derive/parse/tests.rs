//! Unit tests for overlay attribute parsing.

use super::*;
use rstest::rstest;
use syn::parse_quote;

fn keys_and_modes(input: &DeriveInput) -> Vec<(String, Vec<String>, FieldMode)> {
    parse_input(input)
        .expect("input parses")
        .fields
        .into_iter()
        .map(|field| {
            let mut keys = vec![field.key];
            keys.extend(field.aliases);
            (field.ident.to_string(), keys, field.mode)
        })
        .collect()
}

#[rstest]
fn plain_fields_are_leaves_keyed_by_name() {
    let input: DeriveInput = parse_quote! {
        struct Cfg {
            host: String,
            r#type: String,
        }
    };
    assert_eq!(
        keys_and_modes(&input),
        vec![
            (String::from("host"), vec![String::from("host")], FieldMode::Leaf),
            (String::from("r#type"), vec![String::from("type")], FieldMode::Leaf),
        ]
    );
}

#[rstest]
fn serde_renames_and_aliases_pick_keys() {
    let input: DeriveInput = parse_quote! {
        #[serde(rename_all = "kebab-case")]
        struct Cfg {
            max_retries: u8,
            #[serde(rename(serialize = "out", deserialize = "in"))]
            direction: String,
            #[serde(rename = "listen", alias = "bind")]
            listen_addr: String,
        }
    };
    let keys: Vec<Vec<String>> = keys_and_modes(&input)
        .into_iter()
        .map(|(_, keys, _)| keys)
        .collect();
    assert_eq!(
        keys,
        vec![
            vec![String::from("max-retries")],
            vec![String::from("in")],
            vec![String::from("listen"), String::from("bind")],
        ]
    );
}

#[rstest]
fn modes_follow_overlay_and_serde_attributes() {
    let input: DeriveInput = parse_quote! {
        struct Cfg {
            #[overlay(nested)]
            database: Database,
            #[overlay(skip)]
            cache: Cache,
            #[serde(skip_deserializing)]
            runtime: Runtime,
            #[serde(flatten)]
            common: Common,
            #[serde(default)]
            plain: u8,
        }
    };
    let modes: Vec<FieldMode> = keys_and_modes(&input)
        .into_iter()
        .map(|(_, _, mode)| mode)
        .collect();
    assert_eq!(
        modes,
        vec![
            FieldMode::Nested,
            FieldMode::Skip,
            FieldMode::Skip,
            FieldMode::Flatten,
            FieldMode::Leaf,
        ]
    );
}

#[rstest]
fn crate_attribute_is_parsed_as_a_path() {
    let input: DeriveInput = parse_quote! {
        #[overlay(crate = "my_ns::imports")]
        struct Cfg {}
    };
    let parsed = parse_input(&input).expect("input parses");
    let path = parsed.struct_attrs.crate_path.expect("crate path");
    assert_eq!(quote::quote!(#path).to_string(), "my_ns :: imports");
}

#[rstest]
#[case::enum_input(parse_quote! { enum Cfg { A } }, "only be derived for structs")]
#[case::tuple_struct(parse_quote! { struct Cfg(u8); }, "requires named fields")]
#[case::unknown_field_attr(
    parse_quote! { struct Cfg { #[overlay(deep)] a: u8 } },
    "expected `nested` or `skip`"
)]
#[case::conflicting_modes(
    parse_quote! { struct Cfg { #[overlay(nested, skip)] a: Inner } },
    "mutually exclusive"
)]
#[case::unknown_struct_attr(
    parse_quote! { #[overlay(prefix = "x")] struct Cfg { a: u8 } },
    "expected `crate"
)]
#[case::nested_flatten(
    parse_quote! { struct Cfg { #[overlay(nested)] #[serde(flatten)] a: Inner } },
    "drop `#[overlay(nested)]`"
)]
#[case::bad_rename_all(
    parse_quote! { #[serde(rename_all = "Train-Case")] struct Cfg { a: u8 } },
    "unsupported serde rename_all value"
)]
fn invalid_input_is_rejected(#[case] input: DeriveInput, #[case] fragment: &str) {
    let Err(err) = parse_input(&input) else {
        panic!("expected parse failure containing {fragment}");
    };
    assert!(
        err.to_string().contains(fragment),
        "expected '{fragment}' in '{err}'"
    );
}
