//! Generate static files

use anyhow::Result;
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::time::{Duration, Instant};

use crate::generator::Generator;
use crate::{Site, CONFIG_FILE};

/// Quiet period before a batch of changes triggers a rebuild
const DEBOUNCE: Duration = Duration::from_millis(500);

/// Generate the static site
pub fn run(site: &Site) -> Result<()> {
    let start = Instant::now();

    Generator::new(site).generate()?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Inputs watched for changes; missing ones are left out
fn watch_targets(site: &Site) -> Vec<(PathBuf, RecursiveMode)> {
    [
        (site.posts_dir.clone(), RecursiveMode::Recursive),
        (site.assets_dir.clone(), RecursiveMode::Recursive),
        (site.templates_dir.clone(), RecursiveMode::Recursive),
        (site.base_dir.join(CONFIG_FILE), RecursiveMode::NonRecursive),
    ]
    .into_iter()
    .filter(|(path, _)| path.exists())
    .collect()
}

/// Watch the site's inputs and rebuild everything on change.
///
/// Events are batched until the inputs have been quiet for 500 ms, so one
/// editor save triggers one rebuild after the write has finished. Blocks
/// until the watcher goes away. A failed rebuild is logged and watching
/// continues.
pub fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();

    let mut debouncer = new_debouncer(DEBOUNCE, tx)?;

    for (path, mode) in watch_targets(site) {
        debouncer.watcher().watch(&path, mode)?;
        tracing::debug!("Watching {:?}", path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    rebuild_on_change(site, rx);

    Ok(())
}

/// Rebuild once per batch of changes until the sender is dropped.
/// Returns the number of rebuilds.
fn rebuild_on_change(site: &Site, rx: Receiver<DebounceEventResult>) -> usize {
    let mut rebuilds = 0;

    for result in rx {
        match result {
            Ok(events) if !events.is_empty() => {
                let paths: Vec<_> = events.iter().map(|e| &e.path).collect();
                tracing::info!("Changed {:?}, regenerating...", paths);
                if let Err(e) = run(site) {
                    tracing::error!("Generation failed: {:#}", e);
                }
                rebuilds += 1;
            }
            Ok(_) => {}
            Err(e) => tracing::error!("Watch error: {}", e),
        }
    }

    rebuilds
}
