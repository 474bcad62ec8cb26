//! Map destinations are refused before any resource is read.

use anyhow::{Result, anyhow, ensure};
use camino::Utf8Path;
use config_imports::{ImportError, ImportLoader, ImportResult, Overlay};
use rstest::rstest;
use test_helpers::MemoryReader;

use std::collections::{BTreeMap, HashMap};

fn load_into<T: Overlay + ?Sized>(reader: &MemoryReader, destination: &mut T) -> ImportResult<()> {
    ImportLoader::with_reader(|resource: &Utf8Path| reader.read(resource))
        .load_into("app.yml", destination)
}

fn reader() -> MemoryReader {
    MemoryReader::new().with_resource("app.yml", "name: app\n")
}

fn ensure_rejected(result: ImportResult<()>, reader: &MemoryReader) -> Result<()> {
    let err = result
        .err()
        .ok_or_else(|| anyhow!("map destination accepted"))?;
    ensure!(
        matches!(*err, ImportError::UnsupportedDestination),
        "unexpected error: {err}"
    );
    ensure!(
        reader.read_count() == 0,
        "resources were read: {:?}",
        reader.reads()
    );
    Ok(())
}

#[rstest]
fn hash_maps_are_rejected() -> Result<()> {
    let reader = reader();
    let mut destination: HashMap<String, String> = HashMap::new();
    let result = load_into(&reader, &mut destination);
    ensure_rejected(result, &reader)?;
    ensure!(destination.is_empty(), "destination modified");
    Ok(())
}

#[rstest]
fn btree_maps_are_rejected() -> Result<()> {
    let reader = reader();
    let mut destination: BTreeMap<String, u32> = BTreeMap::new();
    let result = load_into(&reader, &mut destination);
    ensure_rejected(result, &reader)
}

#[rstest]
fn boxed_and_optional_maps_are_rejected() -> Result<()> {
    let reader = reader();
    let mut boxed: Box<HashMap<String, String>> = Box::default();
    ensure_rejected(load_into(&reader, &mut boxed), &reader)?;
    let mut optional: Option<BTreeMap<String, String>> = None;
    ensure_rejected(load_into(&reader, &mut optional), &reader)
}

#[rstest]
fn records_are_accepted() -> Result<()> {
    #[derive(Default, Overlay)]
    struct Named {
        name: String,
    }

    let reader = reader();
    let mut destination = Named::default();
    load_into(&reader, &mut destination).map_err(|err| anyhow!(err))?;
    ensure!(destination.name == "app", "root not applied");
    ensure!(reader.read_count() == 2, "expected one resolve and one merge read");
    Ok(())
}
