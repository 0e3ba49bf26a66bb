use std::path::Path;

use anyhow::Result;
use ixmon_core::{DirectorySource, Session};
use ixmon_settings::Settings;

use crate::cli::SummaryArgs;
use crate::{config, render};

pub(crate) fn open_session(settings: &Settings, feeds: Option<&Path>) -> Session<DirectorySource> {
    let mut names = settings.feeds.clone();
    names.dir = Some(config::feed_dir(settings, feeds));
    let mut session = Session::new(DirectorySource::from_settings(&names), settings.health);
    session.refresh();
    session
}

pub(crate) fn handle(args: SummaryArgs, settings: &Settings) -> Result<()> {
    let session = open_session(settings, args.feeds.feeds.as_deref());
    let summary = session.summary();
    render::emit(args.format, &summary, || render::summary_text(&summary))
}
