use anyhow::{Result, bail};
use ixmon_settings::Settings;

use crate::cli::DrillArgs;
use crate::commands::summary::open_session;
use crate::render;

pub(crate) fn handle(args: DrillArgs, settings: &Settings) -> Result<()> {
    let session = open_session(settings, args.feeds.feeds.as_deref());
    let view = session.drill_down(&args.request_id);
    if view.is_empty() {
        bail!("No records found for request id '{}'", args.request_id);
    }
    render::emit(args.format, &view, || render::drill_text(&view))
}
