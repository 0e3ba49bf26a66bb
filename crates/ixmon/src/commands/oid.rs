use anyhow::{Context, Result, bail};
use ixmon_core::{DirectorySource, FeedKind, OidDirectory};
use ixmon_settings::Settings;

use crate::cli::OidArgs;
use crate::{config, render};

pub(crate) fn handle(args: OidArgs, settings: &Settings) -> Result<()> {
    let mut names = settings.feeds.clone();
    names.dir = Some(config::feed_dir(settings, args.feeds.feeds.as_deref()));
    let source = DirectorySource::from_settings(&names);
    let directory = OidDirectory::new(source.oids().with_context(|| {
        format!(
            "Failed to load OID directory from {}",
            source.path_for(FeedKind::Oids).display()
        )
    })?);

    if let Some(oid) = &args.lookup {
        let Some(entry) = directory.lookup(oid) else {
            bail!("OID '{oid}' is not in the directory");
        };
        let row = render::OidRow::new(entry);
        return render::emit(args.format, &row, || {
            format!("{} {} {}\n", row.oid, row.status, row.name)
        });
    }

    let listing = render::oid_listing(&directory);
    render::emit(args.format, &listing, || render::oid_text(&listing))
}
