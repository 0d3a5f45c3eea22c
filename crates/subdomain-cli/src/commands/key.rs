//! `key` command

use tracing::info;

use subdomain_core::{store_key, ApiKey};

use super::{persisted, CommandOutput, Outcome};
use crate::cli::KeyAction;
use crate::context::Context;
use crate::prompt::{require_secret, Prompter};

pub(super) async fn run(
    action: KeyAction,
    ctx: &mut Context,
    prompter: &mut dyn Prompter,
) -> anyhow::Result<Outcome> {
    match action {
        KeyAction::Create => create(ctx).await,
        KeyAction::Set(value) => set(value, ctx, prompter).await,
        KeyAction::Delete => delete(ctx).await,
        KeyAction::Info => show(ctx).await,
    }
}

async fn create(ctx: &mut Context) -> anyhow::Result<Outcome> {
    let key = ctx.api.create_key().await?;
    let persisted = persisted(store_key(&key, &mut ctx.config, &ctx.store).await)?;

    Ok(Outcome::new(CommandOutput::KeySaved {
        key,
        created: true,
        persisted,
    }))
}

async fn set(
    value: Option<String>,
    ctx: &mut Context,
    prompter: &mut dyn Prompter,
) -> anyhow::Result<Outcome> {
    let key = ApiKey::new(require_secret(value, "API key", prompter)?);
    let persisted = persisted(store_key(&key, &mut ctx.config, &ctx.store).await)?;

    Ok(Outcome::new(CommandOutput::KeySaved {
        key,
        created: false,
        persisted,
    }))
}

async fn delete(ctx: &mut Context) -> anyhow::Result<Outcome> {
    let resolved = ctx.resolve_key().await?;
    let result = ctx.api.delete_key(&resolved.key).await?;

    // A different key passed with --key leaves the stored one alone
    let cleared = if ctx.config.api_key() == Some(resolved.key.expose()) {
        let cleared = persisted(ctx.store.clear(&mut ctx.config).await)?;
        if cleared {
            info!("Removed stored API key {}", resolved.key.prefix());
        }
        cleared
    } else {
        false
    };

    // A key provisioned just to be deleted is not worth announcing
    Ok(Outcome::new(CommandOutput::KeyDeleted { result, cleared }))
}

async fn show(ctx: &mut Context) -> anyhow::Result<Outcome> {
    let resolved = ctx.resolve_key().await?;
    let info = ctx.api.key_info(&resolved.key).await?;

    Ok(Outcome::with_key(&resolved, CommandOutput::KeyInfo(info)))
}
