//! Discovery and whole-pipeline tests.

use modhost_application::ModResolver;
use modhost_domain::metadata::ModMetadata;
use modhost_domain::version::SemanticVersion;
use modhost_infrastructure::{CompatibilityDatabase, ManifestReader, ModScanner};
use modhost_testing::{
    content_pack_json, init_test_logging, manifest_json, mods_root, write_empty_folder,
    write_mod_folder,
};
use serde_json::json;
use std::path::Path;

fn read(root: &Path, db: &CompatibilityDatabase) -> Vec<ModMetadata> {
    init_test_logging();
    let scanner = ModScanner::new(ManifestReader::new());
    ModResolver::new().read_manifests(&scanner, root, db)
}

#[test]
fn nonexistent_root_yields_no_records() {
    let records = read(Path::new("/definitely/not/a/mods/folder"), &CompatibilityDatabase::empty());
    assert!(records.is_empty());
}

#[test]
fn empty_root_yields_no_records() -> anyhow::Result<()> {
    let root = mods_root()?;
    let records = read(root.path(), &CompatibilityDatabase::empty());
    assert!(records.is_empty());
    Ok(())
}

#[test]
fn empty_mod_folder_yields_one_failed_record() -> anyhow::Result<()> {
    let root = mods_root()?;
    write_empty_folder(root.path(), "EmptyMod")?;

    let records = read(root.path(), &CompatibilityDatabase::empty());
    assert_eq!(records.len(), 1);
    assert!(records[0].is_failed());
    assert_eq!(records[0].error(), Some("no manifest found"));
    Ok(())
}

#[test]
fn valid_mod_folder_yields_a_found_record() -> anyhow::Result<()> {
    let root = mods_root()?;
    write_mod_folder(root.path(), "ExampleMod", &manifest_json("Example.Mod", "1.2.0"))?;

    let records = read(root.path(), &CompatibilityDatabase::empty());
    assert_eq!(records.len(), 1);
    assert!(records[0].is_found());
    assert_eq!(records[0].display_name(), "Example.Mod");
    assert!(records[0].has_id("example.mod"));
    assert!(records[0].data_record().is_none());
    Ok(())
}

#[test]
fn matching_compatibility_record_is_attached() -> anyhow::Result<()> {
    let root = mods_root()?;
    write_mod_folder(root.path(), "BrokenMod", &manifest_json("Broken.Mod", "1.0.0"))?;
    let db = CompatibilityDatabase::from_json(
        r#"{ "mods": [{ "id": "broken.mod", "status": "assume_broken", "statusUpperVersion": "1.5" }] }"#,
    )?;

    let records = read(root.path(), &db);
    assert!(records[0].data_record().is_some());
    Ok(())
}

#[test]
fn unparseable_manifest_yields_a_failed_record_with_folder_name() -> anyhow::Result<()> {
    let root = mods_root()?;
    let dir = root.path().join("BadMod");
    std::fs::create_dir_all(&dir)?;
    std::fs::write(dir.join("manifest.json"), "{ not json")?;

    let records = read(root.path(), &CompatibilityDatabase::empty());
    assert_eq!(records.len(), 1);
    assert!(records[0].is_failed());
    assert_eq!(records[0].display_name(), "BadMod");
    assert!(records[0].error().unwrap().contains("malformed"));
    Ok(())
}

#[test]
fn unknown_manifest_fields_survive_the_pipeline() -> anyhow::Result<()> {
    let root = mods_root()?;
    let manifest = json!({
        "Name": "Example Mod",
        "UniqueID": "Example.Mod",
        "Version": "1.0.0",
        "EntryFile": "Mod.dll",
        "UpdateKeys": ["Nexus:42"],
        "CustomNumber": 7,
    });
    write_mod_folder(root.path(), "ExampleMod", &manifest)?;

    let records = read(root.path(), &CompatibilityDatabase::empty());
    let parsed = records[0].manifest().unwrap();
    assert_eq!(parsed.extra_fields["UpdateKeys"], json!(["Nexus:42"]));
    assert_eq!(parsed.extra_fields["CustomNumber"], json!(7));
    Ok(())
}

#[test]
fn full_pipeline_orders_mods_and_reports_failures() -> anyhow::Result<()> {
    let root = mods_root()?;

    // A chain (base <- mid <- addon), a content pack, an empty folder, and a
    // mod whose dependency was never installed.
    let addon = json!({
        "Name": "Addon",
        "UniqueID": "Example.Addon",
        "Version": "1.0.0",
        "EntryFile": "Mod.dll",
        "Dependencies": [{ "UniqueID": "Example.Mid" }],
    });
    let mid = json!({
        "Name": "Mid",
        "UniqueID": "Example.Mid",
        "Version": "1.0.0",
        "EntryFile": "Mod.dll",
        "Dependencies": [{ "UniqueID": "Example.Base", "MinimumVersion": "1.0" }],
    });
    let orphan = json!({
        "Name": "Orphan",
        "UniqueID": "Example.Orphan",
        "Version": "1.0.0",
        "EntryFile": "Mod.dll",
        "Dependencies": [{ "UniqueID": "Example.NotInstalled" }],
    });
    write_mod_folder(root.path(), "Addon", &addon)?;
    write_mod_folder(root.path(), "Mid", &mid)?;
    write_mod_folder(root.path(), "Base", &manifest_json("Example.Base", "1.2.0"))?;
    write_mod_folder(
        root.path(),
        "BasePack",
        &content_pack_json("Example.BasePack", "1.0.0", "Example.Base"),
    )?;
    write_empty_folder(root.path(), "Empty")?;
    write_mod_folder(root.path(), "Orphan", &orphan)?;

    let db = CompatibilityDatabase::empty();
    let resolver = ModResolver::new();
    let scanner = ModScanner::new(ManifestReader::new());
    let mut records = resolver.read_manifests(&scanner, root.path(), &db);
    assert_eq!(records.len(), 6);

    resolver.validate_manifests(&mut records, &SemanticVersion::new(4, 0, 0), |_id| None);
    let ordered = resolver.process_dependencies(records, &db);

    // The empty folder failed at discovery, so it leads the output.
    assert_eq!(ordered[0].display_name(), "Empty");
    assert!(ordered[0].is_failed());

    // Loadable mods follow in dependency order.
    let position = |id: &str| {
        ordered
            .iter()
            .position(|record| record.has_id(id))
            .unwrap_or_else(|| panic!("{id} missing from output"))
    };
    assert!(position("Example.Base") < position("Example.Mid"));
    assert!(position("Example.Mid") < position("Example.Addon"));
    assert!(position("Example.Base") < position("Example.BasePack"));

    // The orphan failed during dependency resolution and trails the output.
    let orphan = ordered.iter().find(|record| record.has_id("Example.Orphan")).unwrap();
    assert!(orphan
        .error()
        .unwrap()
        .starts_with("missing dependencies: "));

    Ok(())
}
