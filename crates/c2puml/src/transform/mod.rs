//! Model transformation: filters, renames and include-relation processing.
//!
//! The transformer loads a project model and a configuration, applies the
//! configured operations in a fixed order (file filters, element filters,
//! model transformations, include processing) and writes the result to a new
//! file. The loaded model is consumed by value; the on-disk parse output is
//! never rewritten, so the parse stage stays idempotent and re-runnable.

use crate::config::{Config, FilterPatterns, RemoveSpec, RenameSpec, Transformations};
use crate::error::Result;
use crate::model::{resolve_include_key, FileModel, IncludeRelation, ProjectModel};
use log::{debug, info, warn};
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Applies a declarative [`Config`] to a loaded [`ProjectModel`].
#[derive(Debug, Default)]
pub struct Transformer;

impl Transformer {
    pub fn new() -> Self {
        Self
    }

    /// Load `model_path` and `config_path`, apply all configured
    /// transformations and save the result to `output_path`.
    pub fn transform(
        &self,
        model_path: &Path,
        config_path: &Path,
        output_path: &Path,
    ) -> Result<()> {
        info!("Transforming model: {}", model_path.display());

        let model = ProjectModel::load(model_path)?;
        let config = Config::load(config_path)?;
        let transformed = self.apply(model, &config);
        transformed.save(output_path)?;

        info!(
            "Transform complete, {} files remain: {}",
            transformed.files.len(),
            output_path.display()
        );
        Ok(())
    }

    /// Apply all configured transformations, in order.
    pub fn apply(&self, mut model: ProjectModel, config: &Config) -> ProjectModel {
        if !config.file_filters.is_empty() {
            model = self.apply_file_filters(model, &config.file_filters);
        }

        model = self.apply_element_filters(model, config);
        model = self.apply_model_transformations(model, &config.transformations);

        if config.include_depth > 1 {
            model = self.process_include_relations(
                model,
                config.include_depth,
                &config.include_filters,
            );
        }

        model
    }

    /// Drop files whose path matches the exclude patterns or fails the
    /// include patterns.
    fn apply_file_filters(&self, mut model: ProjectModel, filters: &FilterPatterns) -> ProjectModel {
        let include = compile_patterns(&filters.include);
        let exclude = compile_patterns(&filters.exclude);

        model
            .files
            .retain(|_, file| should_keep(&file.relative_path, &include, &exclude));
        debug!("File filtering left {} files", model.files.len());
        model
    }

    /// Replace each file's element collections with filtered copies,
    /// preserving original ordering.
    fn apply_element_filters(&self, mut model: ProjectModel, config: &Config) -> ProjectModel {
        let filters = &config.element_filters;

        for file in model.files.values_mut() {
            file.structs = filter_map(std::mem::take(&mut file.structs), &filters.structs);
            file.enums = filter_map(std::mem::take(&mut file.enums), &filters.enums);
            file.unions = filter_map(std::mem::take(&mut file.unions), &filters.unions);
            file.typedefs = filter_map(std::mem::take(&mut file.typedefs), &filters.typedefs);
            filter_vec(&mut file.functions, &filters.functions, |f| f.name.clone());
            filter_vec(&mut file.globals, &filters.globals, |g| g.name.clone());
            filter_vec(&mut file.macros, &filters.macros, |m| {
                macro_name(m).to_string()
            });

            // Keep typedef classifications in step with the filtered table
            if !filters.typedefs.is_empty() {
                let typedefs = file.typedefs.clone();
                file.typedef_relations
                    .retain(|rel| typedefs.contains_key(&rel.typedef_name));
            }
        }

        model
    }

    /// Apply rename/add/remove to the files selected by
    /// `transformations.file_selection` (empty selection = every file).
    fn apply_model_transformations(
        &self,
        mut model: ProjectModel,
        transformations: &Transformations,
    ) -> ProjectModel {
        let selected = compile_patterns(&transformations.file_selection.selected_files);

        let target_keys: Vec<String> = model
            .files
            .iter()
            .filter(|(_, file)| {
                selected.is_empty() || matches_any(&file.relative_path, &selected)
            })
            .map(|(key, _)| key.clone())
            .collect();

        debug!("Applying model transformations to {} files", target_keys.len());

        for key in &target_keys {
            if let Some(file) = model.files.get_mut(key) {
                apply_renames(file, &transformations.rename);
                apply_additions(file, &transformations.add);
                apply_removals(file, &transformations.remove);
            }
        }

        model
    }

    /// Walk each source file's includes through the model's `files` mapping
    /// and record depth-tagged include relations up to `max_depth`.
    fn process_include_relations(
        &self,
        mut model: ProjectModel,
        max_depth: u32,
        include_filters: &BTreeMap<String, Vec<String>>,
    ) -> ProjectModel {
        info!("Processing include relations up to depth {max_depth}");

        // Re-runnable: the pass owns this field completely
        for file in model.files.values_mut() {
            file.include_relations.clear();
        }

        let root_keys: Vec<String> = model
            .files
            .iter()
            .filter(|(_, file)| file.is_source_file())
            .map(|(key, _)| key.clone())
            .collect();

        for root_key in root_keys {
            let filters = include_filters
                .get(&root_key)
                .map(|patterns| compile_patterns(patterns))
                .unwrap_or_default();

            let mut relations = Vec::new();
            collect_relations(
                &model.files,
                &root_key,
                max_depth,
                1,
                &HashSet::new(),
                &filters,
                &mut relations,
            );

            if let Some(root) = model.files.get_mut(&root_key) {
                root.include_relations = relations;
            }
        }

        model
    }
}

/// Recursively collect include edges reachable from `current_key`.
///
/// The visited set is cloned per branch: a cycle terminates the branch it
/// occurs on, but a file reached again through a sibling branch is still
/// traversed there.
fn collect_relations(
    files: &BTreeMap<String, FileModel>,
    current_key: &str,
    max_depth: u32,
    depth: u32,
    visited: &HashSet<String>,
    filters: &[Regex],
    out: &mut Vec<IncludeRelation>,
) {
    if depth > max_depth {
        return;
    }
    let Some(current) = files.get(current_key) else {
        return;
    };

    let mut branch_visited = visited.clone();
    branch_visited.insert(current_key.to_string());

    for include_name in &current.includes {
        let Some(target_key) = resolve_include_key(files, include_name) else {
            // System or otherwise unresolvable include: keep the name, no edge
            continue;
        };
        let target_key = target_key.to_string();

        if target_key == current_key {
            debug!("Skipping self-include for {current_key}");
            continue;
        }
        if branch_visited.contains(&target_key) {
            debug!("Cycle detected, stopping branch: {current_key} -> {target_key}");
            continue;
        }
        if !filters.is_empty() && !matches_any(include_name, filters) {
            debug!("Include filtered out: {current_key} -> {include_name}");
            continue;
        }
        if out
            .iter()
            .any(|rel| rel.source_file == current_key && rel.included_file == target_key)
        {
            continue;
        }

        if let Some(relation) = IncludeRelation::new(current_key, target_key.as_str(), depth) {
            out.push(relation);
        }

        collect_relations(
            files,
            &target_key,
            max_depth,
            depth + 1,
            &branch_visited,
            filters,
            out,
        );
    }
}

fn apply_renames(file: &mut FileModel, rename: &RenameSpec) {
    for (old, new) in &rename.structs {
        if let Some(mut item) = file.structs.remove(old) {
            item.name = new.clone();
            file.structs.insert(new.clone(), item);
        }
    }
    for (old, new) in &rename.enums {
        if let Some(mut item) = file.enums.remove(old) {
            item.name = new.clone();
            file.enums.insert(new.clone(), item);
        }
    }
    for (old, new) in &rename.unions {
        if let Some(mut item) = file.unions.remove(old) {
            item.name = new.clone();
            file.unions.insert(new.clone(), item);
        }
    }
    for (old, new) in &rename.typedefs {
        if let Some(underlying) = file.typedefs.remove(old) {
            file.typedefs.insert(new.clone(), underlying);
        }
        for rel in &mut file.typedef_relations {
            if rel.typedef_name == *old {
                rel.typedef_name = new.clone();
            }
        }
    }
    for function in &mut file.functions {
        if let Some(new) = rename.functions.get(&function.name) {
            function.name = new.clone();
        }
    }
    for global in &mut file.globals {
        if let Some(new) = rename.globals.get(&global.name) {
            global.name = new.clone();
        }
    }
    for text in &mut file.macros {
        if let Some(new) = rename.macros.get(macro_name(text)) {
            let rest = text[macro_name(text).len()..].to_string();
            *text = format!("{new}{rest}");
        }
    }
}

fn apply_additions(file: &mut FileModel, add: &crate::config::AddSpec) {
    for item in &add.structs {
        file.structs.insert(item.name.clone(), item.clone());
    }
    for item in &add.enums {
        file.enums.insert(item.name.clone(), item.clone());
    }
    for item in &add.unions {
        file.unions.insert(item.name.clone(), item.clone());
    }
    file.functions.extend(add.functions.iter().cloned());
    file.globals.extend(add.globals.iter().cloned());
    file.macros.extend(add.macros.iter().cloned());
    for (name, underlying) in &add.typedefs {
        file.typedefs.insert(name.clone(), underlying.clone());
    }
}

fn apply_removals(file: &mut FileModel, remove: &RemoveSpec) {
    for name in &remove.structs {
        file.structs.remove(name);
    }
    for name in &remove.enums {
        file.enums.remove(name);
    }
    for name in &remove.unions {
        file.unions.remove(name);
    }
    for name in &remove.typedefs {
        file.typedefs.remove(name);
        file.typedef_relations.retain(|rel| rel.typedef_name != *name);
    }
    file.functions
        .retain(|f| !remove.functions.contains(&f.name));
    file.globals.retain(|g| !remove.globals.contains(&g.name));
    file.macros
        .retain(|m| !remove.macros.iter().any(|name| macro_name(m) == name));
}

/// Compile pattern strings, logging and skipping any invalid regex.
pub fn compile_patterns(patterns: &[String]) -> Vec<Regex> {
    let mut compiled = Vec::new();
    for pattern in patterns {
        match Regex::new(pattern) {
            Ok(regex) => compiled.push(regex),
            Err(e) => warn!("Invalid regex pattern '{pattern}': {e}"),
        }
    }
    compiled
}

pub fn matches_any(text: &str, patterns: &[Regex]) -> bool {
    patterns.iter().any(|pattern| pattern.is_match(text))
}

/// Include patterns (when present) must match; exclude patterns always drop.
pub fn should_keep(name: &str, include: &[Regex], exclude: &[Regex]) -> bool {
    if !include.is_empty() && !matches_any(name, include) {
        return false;
    }
    !matches_any(name, exclude)
}

/// The name part of a stored macro text: everything before the first
/// whitespace or parameter list.
pub(crate) fn macro_name(text: &str) -> &str {
    let end = text
        .find(|c: char| c.is_whitespace() || c == '(')
        .unwrap_or(text.len());
    &text[..end]
}

fn filter_map<V>(map: BTreeMap<String, V>, filters: &FilterPatterns) -> BTreeMap<String, V> {
    if filters.is_empty() {
        return map;
    }
    let include = compile_patterns(&filters.include);
    let exclude = compile_patterns(&filters.exclude);
    map.into_iter()
        .filter(|(name, _)| should_keep(name, &include, &exclude))
        .collect()
}

fn filter_vec<T, F>(items: &mut Vec<T>, filters: &FilterPatterns, key: F)
where
    F: Fn(&T) -> String,
{
    if filters.is_empty() {
        return;
    }
    let include = compile_patterns(&filters.include);
    let exclude = compile_patterns(&filters.exclude);
    items.retain(|item| should_keep(&key(item), &include, &exclude));
}
