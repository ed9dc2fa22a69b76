pub mod entities;
pub mod set;

use std::path::PathBuf;

use anyhow::Result;

use crate::context::ProjectContext;
use crate::output::OutputManager;
use crate::scanner::{ScannedEntity, discover_entities, parse_entity_file};

/// Resolve the project context from an explicit path or the current directory.
pub fn project_context(path: Option<PathBuf>) -> Result<ProjectContext> {
    match path {
        Some(path) => ProjectContext::find_from(&path),
        None => ProjectContext::find(),
    }
}

/// Scan the project for entity structs. Unparseable files are reported and skipped.
pub fn scan_project(ctx: &ProjectContext, output: &OutputManager) -> Result<Vec<ScannedEntity>> {
    let files = discover_entities(&ctx.project_root, &ctx.scan_dirs())?;
    output.verbose(&format!("scanning {} candidate file(s)", files.len()));

    let mut entities = Vec::new();
    for file in files {
        match parse_entity_file(&file.path, &file.relative_path) {
            Ok(found) => {
                output.verbose(&format!("{}: {} entity(ies)", file.relative_path, found.len()));
                entities.extend(found);
            }
            Err(err) => output.warning(&format!("{err:#}")),
        }
    }

    Ok(entities)
}
