use std::path::Path;

use anyhow::{Context, Result};
use ixmon_core::DirectorySource;
use ixmon_kb::{FileKv, KnowledgeBase};
use ixmon_settings::Settings;
use ixmon_types::GovernanceCase;
use tracing::info;

use crate::cli::{KbArgs, KbCommands, KbStoreArgs};
use crate::{config, render};

fn open(settings: &Settings, args: &KbStoreArgs) -> Result<KnowledgeBase<FileKv>> {
    let mut names = settings.feeds.clone();
    names.dir = Some(config::feed_dir(settings, args.feeds.as_deref()));
    let seed_cases = DirectorySource::from_settings(&names)
        .cases()
        .context("Failed to load governance cases for the knowledge-base seed")?;

    let dir = config::kb_store_dir(settings, args.store.as_deref());
    info!(store = %dir.display(), "opening knowledge base");
    Ok(KnowledgeBase::new(
        FileKv::new(dir),
        settings.kb.key.clone(),
        seed_cases,
    ))
}

fn read_case(path: &Path) -> Result<GovernanceCase> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read case file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid governance case in {}", path.display()))
}

pub(crate) fn handle(args: KbArgs, settings: &Settings) -> Result<()> {
    match args.command {
        KbCommands::List(list) => {
            let mut kb = open(settings, &list.store)?;
            let articles = kb.list().context("Failed to read knowledge base")?;
            render::emit(list.format, &articles, || render::articles_text(&articles))
        }
        KbCommands::Upsert(upsert) => {
            let case = read_case(&upsert.case)?;
            let mut kb = open(settings, &upsert.store)?;
            let article = kb
                .upsert(&case, upsert.decision.as_deref(), upsert.status.into())
                .context("Failed to record knowledge-base article")?;
            render::emit(upsert.format, &article, || render::article_text(&article))
        }
    }
}
