//! Dependency resolution and load ordering.
//!
//! Takes the validated metadata records, resolves each mod's declared
//! dependencies to sibling records, fails mods whose requirements can't be
//! met (missing, too old, failed transitively, or cyclic), and emits the
//! records in a load order where every mod follows its dependencies.

use modhost_domain::identifiers::ModId;
use modhost_domain::metadata::ModMetadata;
use modhost_domain::version::SemanticVersion;
use modhost_infrastructure::compatibility_db::CompatibilityDatabase;
use std::collections::HashMap;
use tracing::debug;

/// A dependency declaration pulled out of a manifest, with the content-pack
/// target folded in as an implicit required dependency
struct DeclaredDependency {
    unique_id: ModId,
    minimum_version: Option<SemanticVersion>,
    required: bool,
}

pub(crate) fn process_dependencies(
    records: Vec<ModMetadata>,
    db: &CompatibilityDatabase,
) -> Vec<ModMetadata> {
    let mut records = records;

    // Partition: records that already failed keep their relative order and
    // are emitted ahead of everything else, untouched.
    let entry_failed: Vec<usize> = (0..records.len())
        .filter(|&index| records[index].is_failed())
        .collect();
    let found: Vec<usize> = (0..records.len())
        .filter(|&index| records[index].is_found())
        .collect();

    // Resolve dependency references to record indices.
    let edges = resolve_references(&mut records, &found, db);

    // Fail mods whose dependencies failed, directly or through a cycle,
    // until nothing new fails.
    loop {
        propagate_failures(&mut records, &found, &edges);
        if !fail_cycles(&mut records, &found, &edges) {
            break;
        }
    }

    // A failed record's resolved list may name mods that later failed too;
    // drop it so emitted lists only ever name loadable mods.
    for record in records.iter_mut() {
        if record.is_failed() {
            record.clear_resolved_dependencies();
        }
    }

    // Topological emit over the surviving records, ties broken by input
    // order so identical inputs give identical outputs.
    let sorted = topological_order(&records, &found, &edges);
    let stage_failed: Vec<usize> = found
        .iter()
        .copied()
        .filter(|&index| records[index].is_failed())
        .collect();

    debug!(
        loadable = sorted.len(),
        failed = entry_failed.len() + stage_failed.len(),
        "processed dependencies"
    );

    let mut slots: Vec<Option<ModMetadata>> = records.into_iter().map(Some).collect();
    entry_failed
        .into_iter()
        .chain(sorted)
        .chain(stage_failed)
        .filter_map(|index| slots[index].take())
        .collect()
}

/// Resolve each Found record's declared dependencies to record indices,
/// failing records with missing or too-old requirements (step 2)
fn resolve_references(
    records: &mut [ModMetadata],
    found: &[usize],
    db: &CompatibilityDatabase,
) -> Vec<Vec<usize>> {
    let mut by_id: HashMap<String, usize> = HashMap::new();
    for &index in found {
        if let Some(manifest) = records[index].manifest() {
            by_id.entry(manifest.unique_id.comparable()).or_insert(index);
        }
    }

    let mut edges: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    for &index in found {
        let Some(manifest) = records[index].manifest() else {
            continue;
        };

        let mut declared: Vec<DeclaredDependency> = manifest
            .dependencies
            .iter()
            .map(|dependency| DeclaredDependency {
                unique_id: dependency.unique_id.clone(),
                minimum_version: dependency.minimum_version.clone(),
                required: dependency.required,
            })
            .collect();
        if let Some(pack) = &manifest.content_pack_for {
            declared.push(DeclaredDependency {
                unique_id: pack.unique_id.clone(),
                minimum_version: None,
                required: true,
            });
        }

        let mut resolved_ids: Vec<ModId> = Vec::new();
        let mut resolved_edges: Vec<usize> = Vec::new();
        let mut missing: Vec<String> = Vec::new();
        let mut too_old: Vec<String> = Vec::new();

        for dependency in declared {
            match by_id.get(&dependency.unique_id.comparable()) {
                // A mod listing itself adds nothing to the graph.
                Some(&target) if target == index => {}
                Some(&target) => {
                    let target_version =
                        records[target].manifest().map(|manifest| &manifest.version);
                    if let (Some(minimum), Some(version)) =
                        (&dependency.minimum_version, target_version)
                    {
                        if !version.is_at_least(minimum) {
                            too_old.push(format!(
                                "it needs {} {minimum} or later, but {version} is installed",
                                dependency.unique_id
                            ));
                            continue;
                        }
                    }
                    resolved_edges.push(target);
                    resolved_ids.push(dependency.unique_id);
                }
                None if dependency.required => {
                    missing.push(friendly_name(db, &dependency.unique_id));
                }
                None => {}
            }
        }

        if missing.is_empty() && too_old.is_empty() {
            edges[index] = resolved_edges;
            records[index].set_resolved_dependencies(resolved_ids);
        } else {
            let mut parts = Vec::new();
            if !missing.is_empty() {
                parts.push(format!("missing dependencies: {}", missing.join(", ")));
            }
            parts.extend(too_old);
            records[index].set_failed(parts.join("; "));
        }
    }
    edges
}

/// The compatibility database's friendly name for a mod, when it has one
fn friendly_name(db: &CompatibilityDatabase, id: &ModId) -> String {
    match db.display_name(id.as_str()) {
        Some(name) => format!("{name} ({id})"),
        None => id.to_string(),
    }
}

/// Fail every Found record with a failed resolved dependency, repeating
/// until a full sweep changes nothing (step 3)
fn propagate_failures(records: &mut [ModMetadata], found: &[usize], edges: &[Vec<usize>]) {
    loop {
        let mut changed = false;
        for &index in found {
            if records[index].is_failed() {
                continue;
            }
            let failed_dependency = edges[index]
                .iter()
                .copied()
                .find(|&target| records[target].is_failed());
            if let Some(target) = failed_dependency {
                let name = records[target].display_name().to_string();
                records[index]
                    .set_failed(format!("it requires '{name}', which couldn't be loaded"));
                changed = true;
            }
        }
        if !changed {
            return;
        }
    }
}

const WHITE: u8 = 0;
const GRAY: u8 = 1;
const BLACK: u8 = 2;

struct CycleWalk<'a> {
    edges: &'a [Vec<usize>],
    active: Vec<bool>,
    color: Vec<u8>,
    stack: Vec<usize>,
    cycles: Vec<Vec<usize>>,
}

impl CycleWalk<'_> {
    fn visit(&mut self, node: usize) {
        self.color[node] = GRAY;
        self.stack.push(node);
        let edges = self.edges;
        for &next in &edges[node] {
            if !self.active[next] {
                continue;
            }
            match self.color[next] {
                WHITE => self.visit(next),
                GRAY => {
                    // The gray node is on the stack; everything from it down
                    // is the cycle.
                    if let Some(position) = self.stack.iter().position(|&n| n == next) {
                        self.cycles.push(self.stack[position..].to_vec());
                    }
                }
                _ => {}
            }
        }
        self.stack.pop();
        self.color[node] = BLACK;
    }
}

/// Detect cycles among the still-Found records and fail every member of
/// each, returning whether anything failed (step 4)
fn fail_cycles(records: &mut [ModMetadata], found: &[usize], edges: &[Vec<usize>]) -> bool {
    let mut walk = CycleWalk {
        edges,
        active: records.iter().map(ModMetadata::is_found).collect(),
        color: vec![WHITE; records.len()],
        stack: Vec::new(),
        cycles: Vec::new(),
    };
    for &index in found {
        if walk.active[index] && walk.color[index] == WHITE {
            walk.visit(index);
        }
    }

    let mut failed_any = false;
    for cycle in walk.cycles {
        let chain = cycle
            .iter()
            .chain(cycle.first())
            .map(|&index| records[index].display_name().to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        for &index in &cycle {
            if records[index].is_found() {
                records[index].set_failed(format!("dependency cycle: {chain}"));
                failed_any = true;
            }
        }
    }
    failed_any
}

/// Emit the surviving records so every mod follows its dependencies,
/// walking from each record in input order (step 5)
fn topological_order(records: &[ModMetadata], found: &[usize], edges: &[Vec<usize>]) -> Vec<usize> {
    struct TopoWalk<'a> {
        records: &'a [ModMetadata],
        edges: &'a [Vec<usize>],
        visited: Vec<bool>,
        order: Vec<usize>,
    }

    impl TopoWalk<'_> {
        fn visit(&mut self, node: usize) {
            if self.visited[node] || self.records[node].is_failed() {
                return;
            }
            self.visited[node] = true;
            let edges = self.edges;
            for &dependency in &edges[node] {
                self.visit(dependency);
            }
            self.order.push(node);
        }
    }

    let mut walk = TopoWalk {
        records,
        edges,
        visited: vec![false; records.len()],
        order: Vec::new(),
    };
    for &index in found {
        walk.visit(index);
    }
    walk.order
}
