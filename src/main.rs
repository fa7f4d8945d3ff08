mod fonts;
mod opts;
#[cfg(test)]
mod test_utils;

use fonts::{
    fs::RealFs,
    remote::{FontCache, GoogleFonts, RemoteFetcher},
    BuiltinFonts, Resolver,
};
use opts::{Args, Config, Opts};

use clap::Parser;
use tracing_subscriber::{prelude::*, EnvFilter};

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "posterfont=info".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    setup_logging();

    let args = Args::parse();
    let config = match &args.config {
        Some(config_path) => Config::load_from_file(config_path)?,
        None => Config::load_from_system().unwrap_or_else(|err| {
            tracing::warn!(
                "Failed reading config file. Falling back to defaults. Error: {}",
                err
            );
            Config::default()
        }),
    };
    let opts = Opts::parse_and_load_from(&args, config)?;

    // Everything else falls back to these, so there's no point going any further without them
    let defaults = BuiltinFonts::load(&opts.builtin_dir)?;

    let remote = opts.catalog.map(|catalog| {
        let cache = FontCache::new(catalog.cache_dir.join("fonts"));
        tracing::debug!(url = %catalog.url, cache = %cache.dir().display(), "Using font catalog");
        RemoteFetcher::new(GoogleFonts::new(catalog.url), cache, catalog.timeout)
    });
    let mut resolver = Resolver::new(&defaults, RealFs);
    if let Some(remote) = &remote {
        resolver = resolver.with_remote(remote);
    }

    let resolution = resolver.resolve(&opts.request);
    for entry in resolution.report.entries() {
        if entry.is_warning() {
            tracing::warn!("{entry}");
        } else {
            tracing::info!("{entry}");
        }
    }
    println!("{}", resolution.bundle);

    Ok(())
}
