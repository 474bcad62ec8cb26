//! Document parsing coverage: import declarations, layers and syntaxes.

use super::*;
use crate::ImportError;
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use serde_json::json;

fn parse(resource: &str, contents: &str) -> Result<Document> {
    Document::parse(
        Utf8Path::new(resource),
        contents.as_bytes(),
        DocumentSyntax::Yaml,
    )
    .map_err(|err| anyhow!(err.to_string()))
}

fn expect_format_error<T: std::fmt::Debug>(result: ImportResult<T>, fragment: &str) -> Result<()> {
    let err = match result {
        Ok(value) => return Err(anyhow!("expected document error, got {value:?}")),
        Err(err) => err,
    };
    let ImportError::DocumentFormat { source, .. } = err.as_ref() else {
        return Err(anyhow!("expected DocumentFormat, got {err:?}"));
    };
    ensure!(
        source.to_string().contains(fragment),
        "expected '{fragment}' in '{source}'"
    );
    Ok(())
}

#[rstest]
#[case::absent("no_imports: here", Vec::new())]
#[case::empty_list("imports: []", Vec::new())]
#[case::empty_value("imports:", Vec::new())]
#[case::tilde("imports: ~", Vec::new())]
#[case::null("imports: null", Vec::new())]
#[case::flow(
    "imports:\n - {resource: config2.yml}\n - {resource: config3.yml, ignore_errors: true}",
    vec![("config2.yml", false), ("config3.yml", true)]
)]
fn imports_are_extracted_in_declared_order(
    #[case] contents: &str,
    #[case] expected: Vec<(&str, bool)>,
) -> Result<()> {
    let document = parse("config1.yml", contents)?;
    let declarations = document.imports().map_err(|err| anyhow!(err.to_string()))?;
    let actual: Vec<(&str, bool)> = declarations
        .iter()
        .map(|decl| (decl.resource.as_str(), decl.ignore_errors))
        .collect();
    ensure!(actual == expected, "unexpected declarations {actual:?}");
    Ok(())
}

#[rstest]
#[case::scalar_document("not valid", "map")]
#[case::imports_not_a_list("imports: base.yml", "sequence")]
#[case::empty_resource("imports:\n - {resource: ''}", "non-empty")]
#[case::missing_resource("imports:\n - {ignore_errors: true}", "resource")]
fn malformed_imports_are_document_errors(
    #[case] contents: &str,
    #[case] fragment: &str,
) -> Result<()> {
    let document = parse("config1.yml", contents)?;
    expect_format_error(document.imports(), fragment)
}

#[rstest]
fn yaml_syntax_errors_surface_on_first_query() -> Result<()> {
    let document = parse("broken.yml", "key: [")?;
    expect_format_error(document.imports(), "failed to parse broken.yml")
}

#[rstest]
fn yaml_yes_remains_a_string() -> Result<()> {
    let layer = parse("app.yml", "recipient: yes")?
        .into_layer()
        .map_err(|err| anyhow!(err.to_string()))?;
    ensure!(layer == json!({"recipient": "yes"}), "unexpected layer {layer}");
    Ok(())
}

#[rstest]
fn yaml_nulls_stay_null_in_layers() -> Result<()> {
    let layer = parse(
        "app.yml",
        "tilde: ~\nword: null\nblank:\nquoted: 'null'\nnested:\n  inner: ~\nlist: [~, 1]\n",
    )?
    .into_layer()
    .map_err(|err| anyhow!(err.to_string()))?;
    ensure!(
        layer
            == json!({
                "tilde": null,
                "word": null,
                "blank": null,
                "quoted": "null",
                "nested": {"inner": null},
                "list": [null, 1],
            }),
        "unexpected layer {layer}"
    );
    Ok(())
}

#[rstest]
fn layer_drops_the_imports_key() -> Result<()> {
    let layer = parse(
        "app.yml",
        "imports:\n - {resource: base.yml}\nname: app\nnested:\n  depth: 2\n",
    )?
    .into_layer()
    .map_err(|err| anyhow!(err.to_string()))?;
    ensure!(
        layer == json!({"name": "app", "nested": {"depth": 2}}),
        "unexpected layer {layer}"
    );
    Ok(())
}

#[rstest]
#[case::empty("")]
#[case::whitespace("  \n\n")]
fn blank_documents_are_empty_mappings(#[case] contents: &str) -> Result<()> {
    let document = parse("empty.yml", contents)?;
    let imports = document.imports().map_err(|err| anyhow!(err.to_string()))?;
    ensure!(imports.is_empty(), "blank document declared imports");
    let layer = document.into_layer().map_err(|err| anyhow!(err.to_string()))?;
    ensure!(layer == json!({}), "unexpected layer {layer}");
    Ok(())
}

#[rstest]
fn non_utf8_bytes_are_document_errors() -> Result<()> {
    let result = Document::parse(
        Utf8Path::new("binary.yml"),
        &[0xff, 0xfe, 0x00],
        DocumentSyntax::Yaml,
    );
    expect_format_error(result, "utf-8")
}

#[cfg(feature = "toml")]
#[rstest]
fn toml_documents_are_detected_by_extension() -> Result<()> {
    let document = parse(
        "app.toml",
        "name = \"app\"\n[[imports]]\nresource = \"base.toml\"\nignore_errors = true\n",
    )?;
    let imports = document.imports().map_err(|err| anyhow!(err.to_string()))?;
    ensure!(
        imports
            == vec![ImportDeclaration {
                resource: String::from("base.toml"),
                ignore_errors: true,
            }],
        "unexpected imports {imports:?}"
    );
    let layer = document.into_layer().map_err(|err| anyhow!(err.to_string()))?;
    ensure!(layer == json!({"name": "app"}), "unexpected layer {layer}");
    Ok(())
}

#[cfg(feature = "toml")]
#[rstest]
fn toml_syntax_errors_are_reported_eagerly() -> Result<()> {
    let result = Document::parse(
        Utf8Path::new("app.toml"),
        b"name = ",
        DocumentSyntax::Yaml,
    );
    let Err(err) = result else {
        return Err(anyhow!("expected invalid TOML to fail"));
    };
    ensure!(
        matches!(err.as_ref(), ImportError::DocumentFormat { resource, .. } if resource == "app.toml"),
        "unexpected error {err:?}"
    );
    Ok(())
}

#[cfg(feature = "toml")]
#[rstest]
fn unknown_extensions_use_the_fallback_syntax() -> Result<()> {
    let document = Document::parse(
        Utf8Path::new("app.conf"),
        b"name = \"app\"",
        DocumentSyntax::Toml,
    )
    .map_err(|err| anyhow!(err.to_string()))?;
    let layer = document.into_layer().map_err(|err| anyhow!(err.to_string()))?;
    ensure!(layer == json!({"name": "app"}), "unexpected layer {layer}");
    Ok(())
}

#[cfg(not(feature = "json5"))]
#[rstest]
fn disabled_syntaxes_are_reported() -> Result<()> {
    let result = Document::parse(Utf8Path::new("app.json"), b"{}", DocumentSyntax::Yaml);
    expect_format_error(result, "json5 feature disabled")
}

#[cfg(feature = "json5")]
#[rstest]
fn json5_documents_declare_imports() -> Result<()> {
    let document = Document::parse(
        Utf8Path::new("app.json5"),
        b"{ imports: [{ resource: 'base.json' }], name: 'app', }",
        DocumentSyntax::Yaml,
    )
    .map_err(|err| anyhow!(err.to_string()))?;
    let imports = document.imports().map_err(|err| anyhow!(err.to_string()))?;
    ensure!(
        imports
            == [ImportDeclaration {
                resource: "base.json".into(),
                ignore_errors: false,
            }],
        "unexpected imports {imports:?}"
    );
    let layer = document.into_layer().map_err(|err| anyhow!(err.to_string()))?;
    ensure!(layer == json!({"name": "app"}), "unexpected layer {layer}");
    Ok(())
}
