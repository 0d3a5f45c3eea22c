//! `create`, `update`, `delete`, and `list` commands

use subdomain_core::SubdomainSpec;

use super::{CommandOutput, Outcome};
use crate::cli::{DeleteArgs, RecordArgs};
use crate::context::Context;
use crate::prompt::{require, Prompter};

fn spec_from(args: RecordArgs, prompter: &mut dyn Prompter) -> anyhow::Result<SubdomainSpec> {
    Ok(SubdomainSpec::new(
        require(args.name, "Subdomain name", prompter)?,
        require(args.record_type, "Record type", prompter)?,
        require(args.value, "Record value", prompter)?,
    ))
}

pub(super) async fn create(
    args: RecordArgs,
    ctx: &mut Context,
    prompter: &mut dyn Prompter,
) -> anyhow::Result<Outcome> {
    let spec = spec_from(args, prompter)?;
    let resolved = ctx.resolve_key().await?;
    let result = ctx.api.create_subdomain(&resolved.key, &spec).await?;

    Ok(Outcome::with_key(&resolved, CommandOutput::Result(result)))
}

pub(super) async fn update(
    args: RecordArgs,
    ctx: &mut Context,
    prompter: &mut dyn Prompter,
) -> anyhow::Result<Outcome> {
    let spec = spec_from(args, prompter)?;
    let resolved = ctx.resolve_key().await?;
    let result = ctx.api.update_subdomain(&resolved.key, &spec).await?;

    Ok(Outcome::with_key(&resolved, CommandOutput::Result(result)))
}

pub(super) async fn delete(
    args: DeleteArgs,
    ctx: &mut Context,
    prompter: &mut dyn Prompter,
) -> anyhow::Result<Outcome> {
    let name = require(args.name, "Subdomain name", prompter)?;
    let resolved = ctx.resolve_key().await?;
    let result = ctx.api.delete_subdomain(&resolved.key, &name).await?;

    Ok(Outcome::with_key(&resolved, CommandOutput::Result(result)))
}

pub(super) async fn list(ctx: &mut Context) -> anyhow::Result<Outcome> {
    let resolved = ctx.resolve_key().await?;
    let records = ctx.api.list_subdomains(&resolved.key).await?;

    Ok(Outcome::with_key(&resolved, CommandOutput::Subdomains(records)))
}
