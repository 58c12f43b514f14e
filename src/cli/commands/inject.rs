use std::path::Path;

use anyhow::Result;

use super::{CommandResult, CommandSummary, InjectSummary};
use crate::{
    cli::args::InjectCommand,
    core::{CatalogSource, InjectContext, InjectOptions, context::SiblingChange},
    issues::Issue,
};

impl From<&InjectCommand> for InjectOptions {
    fn from(cmd: &InjectCommand) -> Self {
        let catalog = match (&cmd.catalog, &cmd.url) {
            (Some(file), _) => Some(CatalogSource::File(file.clone())),
            (None, Some(url)) => Some(CatalogSource::Url(url.clone())),
            (None, None) => None,
        };

        InjectOptions {
            path: cmd.path.clone(),
            catalog,
            mode: cmd.mode,
            reference_language: cmd.reference_language.clone(),
            format: !cmd.no_format,
            dry_run: cmd.dry_run,
            verbose: cmd.verbose,
        }
    }
}

pub fn inject(cmd: InjectCommand) -> Result<CommandResult> {
    let ctx = InjectContext::new(&InjectOptions::from(&cmd), Path::new("."))?;
    let catalog = ctx.load_catalog()?;
    let outcomes = ctx.process(&catalog);

    let mut issues: Vec<Issue> = outcomes
        .iter()
        .flat_map(|outcome| outcome.issues.iter().cloned())
        .collect();

    let summary = if ctx.dry_run {
        let mut summary = InjectSummary {
            files_checked: outcomes.len(),
            is_dry_run: true,
            ..Default::default()
        };
        for outcome in &outcomes {
            if outcome.output.is_some() {
                summary.updated.push(outcome.path.clone());
            }
            match &outcome.sibling {
                Some(SiblingChange::Write { path, .. }) => summary.updated.push(path.clone()),
                Some(SiblingChange::Remove { path }) => summary.removed.push(path.clone()),
                None => {}
            }
        }
        summary
    } else {
        let applied = ctx.apply(&outcomes);
        issues.extend(applied.issues);
        InjectSummary {
            files_checked: outcomes.len(),
            updated: applied.written,
            removed: applied.removed,
            is_dry_run: false,
        }
    };

    Ok(CommandResult::new(CommandSummary::Inject(summary), issues))
}
