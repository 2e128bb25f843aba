//! Per-mod validation rule tests.

use modhost_application::ModResolver;
use modhost_domain::compatibility::CompatibilityStatus;
use modhost_domain::metadata::ModMetadata;
use modhost_domain::version::SemanticVersion;
use modhost_testing::{data_record, init_test_logging, manifest_json, mods_root, write_mod_folder, ModBuilder};

fn validate(records: &mut [ModMetadata]) {
    validate_with_update_urls(records, |_id| None)
}

fn validate_with_update_urls<F>(records: &mut [ModMetadata], get_update_url: F)
where
    F: Fn(&str) -> Option<String>,
{
    init_test_logging();
    let api_version = SemanticVersion::new(4, 0, 0);
    ModResolver::new().validate_manifests(records, &api_version, get_update_url);
}

#[test]
fn broken_mod_fails_with_alternative_url() {
    let mut records = vec![ModBuilder::new("Broken.Mod")
        .with_data_record(data_record(
            "Broken.Mod",
            CompatibilityStatus::AssumeBroken,
            Some("https://example.org/fixed"),
        ))
        .build()];

    validate(&mut records);

    assert!(records[0].is_failed());
    let error = records[0].error().unwrap();
    assert!(error.starts_with("broken: "), "unexpected error: {error}");
    assert!(error.contains("assumed broken"));
    assert!(error.contains("https://example.org/fixed"));
    assert_eq!(records[0].update_key(), None);
}

#[test]
fn broken_mod_falls_back_to_update_url_lookup() {
    let mut records = vec![ModBuilder::new("Broken.Mod")
        .with_data_record(data_record("Broken.Mod", CompatibilityStatus::AssumeBroken, None))
        .build()];

    validate_with_update_urls(&mut records, |id| {
        Some(format!("https://mods.example.org/{id}"))
    });

    let error = records[0].error().unwrap();
    assert!(error.starts_with("broken: "));
    assert!(error.contains("https://mods.example.org/Broken.Mod"));
    assert_eq!(records[0].update_key(), Some("Broken.Mod"));
}

#[test]
fn obsolete_mod_fails_with_status_name() {
    let mut records = vec![ModBuilder::new("Old.Mod")
        .with_data_record(data_record("Old.Mod", CompatibilityStatus::Obsolete, None))
        .build()];

    validate(&mut records);

    let error = records[0].error().unwrap();
    assert!(error.starts_with("broken: "));
    assert!(error.contains("obsolete"));
}

#[test]
fn assumed_ok_record_does_not_fail_the_mod() -> anyhow::Result<()> {
    let root = mods_root()?;
    let dir = write_mod_folder(root.path(), "OkMod", &manifest_json("Ok.Mod", "1.0.0"))?;
    let mut records = vec![ModBuilder::new("Ok.Mod")
        .in_directory(dir)
        .with_data_record(data_record("Ok.Mod", CompatibilityStatus::AssumedOk, None))
        .build()];

    validate(&mut records);

    assert!(records[0].is_found());
    Ok(())
}

#[test]
fn mod_needing_newer_host_fails_with_both_versions() {
    let mut records = vec![ModBuilder::new("Future.Mod")
        .with_minimum_api_version("99.0.0")
        .build()];

    validate(&mut records);

    let error = records[0].error().unwrap();
    assert!(
        error.starts_with("needs newer SMAPI version: "),
        "unexpected error: {error}"
    );
    assert!(error.contains("99.0.0") && error.contains("4.0.0"));
}

#[test]
fn satisfied_api_floor_passes() -> anyhow::Result<()> {
    let root = mods_root()?;
    let dir = write_mod_folder(root.path(), "Current", &manifest_json("Current.Mod", "1.0.0"))?;
    let mut records = vec![ModBuilder::new("Current.Mod")
        .in_directory(dir)
        .with_minimum_api_version("3.2.0")
        .build()];

    validate(&mut records);

    assert!(records[0].is_found());
    Ok(())
}

#[test]
fn missing_entry_file_fails() {
    // The builder's default folder doesn't exist, so the DLL can't either.
    let mut records = vec![ModBuilder::new("NoDll.Mod").build()];

    validate(&mut records);

    let error = records[0].error().unwrap();
    assert!(error.starts_with("missing DLL: "), "unexpected error: {error}");
    assert!(error.contains("Mod.dll"));
}

#[test]
fn content_pack_is_exempt_from_the_entry_file_check() {
    let mut records = vec![ModBuilder::new("Example.Pack")
        .as_content_pack_for("Example.Mod")
        .build()];

    validate(&mut records);

    assert!(records[0].is_found());
}

#[test]
fn content_pack_with_entry_file_fails() {
    let mut records = vec![ModBuilder::new("Example.Pack")
        .as_content_pack_for("Example.Mod")
        .with_entry_file("Sneaky.dll")
        .build()];

    validate(&mut records);

    assert!(records[0].is_failed());
    assert!(records[0].error().unwrap().contains("content pack"));
}

#[test]
fn duplicate_unique_ids_fail_every_member() -> anyhow::Result<()> {
    let root = mods_root()?;
    let first = write_mod_folder(root.path(), "CopyA", &manifest_json("Dup.Mod", "1.0.0"))?;
    let second = write_mod_folder(root.path(), "CopyB", &manifest_json("Dup.Mod", "1.1.0"))?;
    let mut records = vec![
        ModBuilder::new("Dup.Mod").with_version("1.0.0").in_directory(first.clone()).build(),
        ModBuilder::new("DUP.MOD").with_version("1.1.0").in_directory(second.clone()).build(),
    ];

    validate(&mut records);

    for record in &records {
        assert!(record.is_failed());
        let error = record.error().unwrap();
        assert!(
            error.starts_with("duplicate unique ID: "),
            "unexpected error: {error}"
        );
        assert!(error.contains(&first.display().to_string()));
        assert!(error.contains(&second.display().to_string()));
    }
    Ok(())
}

#[test]
fn unique_ids_in_different_cases_count_as_duplicates() -> anyhow::Result<()> {
    // Covered above via DUP.MOD vs Dup.Mod; this checks distinct IDs survive.
    let root = mods_root()?;
    let first = write_mod_folder(root.path(), "ModA", &manifest_json("Mod.A", "1.0.0"))?;
    let second = write_mod_folder(root.path(), "ModB", &manifest_json("Mod.B", "1.0.0"))?;
    let mut records = vec![
        ModBuilder::new("Mod.A").in_directory(first).build(),
        ModBuilder::new("Mod.B").in_directory(second).build(),
    ];

    validate(&mut records);

    assert!(records.iter().all(ModMetadata::is_found));
    Ok(())
}

#[test]
fn records_already_failed_are_left_untouched() {
    let mut records = vec![
        ModMetadata::failed("/mods/Empty", "Empty", "no manifest found"),
        // Same ID as nothing else; would fail the entry-file check if visited.
        ModBuilder::new("Other.Mod").build(),
    ];

    validate(&mut records);

    assert_eq!(records[0].error(), Some("no manifest found"));
    assert!(records[1].is_failed());
}

#[test]
fn rules_apply_in_order_compatibility_before_api_floor() {
    // A mod that trips both rule 1 and rule 2 reports the override.
    let mut records = vec![ModBuilder::new("Both.Mod")
        .with_minimum_api_version("99.0.0")
        .with_data_record(data_record("Both.Mod", CompatibilityStatus::AssumeBroken, None))
        .build()];

    validate(&mut records);

    assert!(records[0].error().unwrap().starts_with("broken: "));
}
