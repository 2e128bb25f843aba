//! Per-mod validation rules.
//!
//! The validator walks the metadata records once and fails any that can't be
//! loaded: mods overridden by the compatibility database, mods that need a
//! newer host API, mods whose entry file is missing, and mods that share a
//! unique ID. Records that arrive already failed are skipped untouched.

use modhost_domain::manifest::ManifestKind;
use modhost_domain::metadata::ModMetadata;
use modhost_domain::version::SemanticVersion;
use std::collections::HashMap;
use tracing::warn;

/// The outcome of the per-record checks, computed before any mutation so the
/// record's manifest borrow has ended by the time we fail it
struct RecordOutcome {
    error: Option<String>,
    update_key: Option<String>,
}

pub(crate) fn validate_manifests<F>(
    records: &mut [ModMetadata],
    api_version: &SemanticVersion,
    get_update_url: F,
) where
    F: Fn(&str) -> Option<String>,
{
    // IDs seen during the pass, for the duplicate check afterwards. Only
    // records that were Found at the start of the pass participate.
    let mut seen_ids: Vec<(usize, String)> = Vec::new();

    for (index, record) in records.iter_mut().enumerate() {
        if record.is_failed() {
            continue;
        }

        if let Some(manifest) = record.manifest() {
            seen_ids.push((index, manifest.unique_id.comparable()));
        }

        let outcome = check_record(record, api_version, &get_update_url);
        if let Some(key) = outcome.update_key {
            record.set_update_key(key);
        }
        if let Some(error) = outcome.error {
            record.set_failed(error);
        }
    }

    fail_duplicate_ids(records, &seen_ids);
}

fn check_record<F>(
    record: &ModMetadata,
    api_version: &SemanticVersion,
    get_update_url: &F,
) -> RecordOutcome
where
    F: Fn(&str) -> Option<String>,
{
    let mut outcome = RecordOutcome {
        error: None,
        update_key: None,
    };
    let Some(manifest) = record.manifest() else {
        return outcome;
    };

    if !manifest.unique_id.is_well_formed() {
        warn!(
            mod_name = %record.display_name(),
            id = %manifest.unique_id,
            "mod ID contains characters outside A-Z, 0-9, '_', '.', and '-'; \
             other tools may not be able to reference it"
        );
    }

    // Compatibility database override
    if let Some(data) = record.data_record() {
        if data.status.blocks_loading() {
            let url = match &data.alternative_url {
                Some(url) => Some(url.clone()),
                None => {
                    let url = get_update_url(manifest.unique_id.as_str());
                    if url.is_some() {
                        outcome.update_key = Some(manifest.unique_id.to_string());
                    }
                    url
                }
            };
            let hint = match url {
                Some(url) => format!("; you can probably find an updated version at {url}"),
                None => String::new(),
            };
            outcome.error = Some(format!(
                "broken: it's marked '{}' in the compatibility database{hint}",
                data.status.display_name()
            ));
            return outcome;
        }
    }

    // Host API floor
    if let Some(minimum) = &manifest.minimum_api_version {
        if !api_version.is_at_least(minimum) {
            outcome.error = Some(format!(
                "needs newer SMAPI version: it requires {minimum} or later, but {api_version} is installed"
            ));
            return outcome;
        }
    }

    // Entry file: code mods need theirs to exist, content packs must not
    // have one at all
    match manifest.kind() {
        ManifestKind::CodeMod { entry_file } => {
            if !record.directory_path().join(entry_file).is_file() {
                outcome.error = Some(format!(
                    "missing DLL: {entry_file} wasn't found in the mod folder"
                ));
                return outcome;
            }
        }
        ManifestKind::ContentPack { .. } => {
            if manifest.entry_file.is_some() {
                outcome.error =
                    Some("content packs can't have their own entry DLL".to_string());
                return outcome;
            }
        }
    }

    outcome
}

/// Fail every member of any group of records sharing a unique ID
fn fail_duplicate_ids(records: &mut [ModMetadata], seen_ids: &[(usize, String)]) {
    let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
    for (index, id) in seen_ids {
        groups.entry(id.as_str()).or_default().push(*index);
    }

    for (_, members) in groups {
        if members.len() < 2 {
            continue;
        }

        let folders = members
            .iter()
            .map(|&index| records[index].directory_path().display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        for &index in &members {
            let id = records[index]
                .manifest()
                .map(|manifest| manifest.unique_id.to_string())
                .unwrap_or_default();
            records[index].set_failed(format!(
                "duplicate unique ID: '{id}' is declared by multiple folders ({folders})"
            ));
        }
    }
}
