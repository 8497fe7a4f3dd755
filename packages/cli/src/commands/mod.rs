pub mod apply;
pub mod components;
pub mod export;
pub mod import;
pub mod init;
pub mod inspect;
pub mod render;

pub use apply::{apply, ApplyArgs};
pub use components::{components, ComponentsArgs};
pub use export::{export, ExportArgs};
pub use import::{import, ImportArgs};
pub use init::{init, InitArgs};
pub use inspect::{inspect, InspectArgs};
pub use render::{render, RenderArgs};

use crate::config::Config;
use anyhow::Result;
use colored::Colorize;
use sitecraft_editor::Engine;
use sitecraft_registry::ComponentRegistry;
use sitecraft_workspace::{load_into, FileStore, RestoreOrigin};
use std::sync::Arc;

/// Config, store and an engine holding the stored document
pub struct Project {
    pub config: Config,
    pub store: FileStore,
    pub engine: Engine,
}

impl Project {
    pub fn open(cwd: &str) -> Result<Self> {
        let config = Config::load(cwd)?;
        let store = config.store(cwd);
        let mut engine = Engine::new(Arc::new(ComponentRegistry::builtin()), config.engine_config());

        let origin = load_into(&mut engine, &store);
        tracing::debug!("Opened {} ({:?})", store.root().display(), origin);
        if let RestoreOrigin::Recovered(err) = origin {
            println!(
                "{} Stored document unusable ({}), using the starter site",
                "⚠️".yellow(),
                err
            );
        }

        Ok(Self {
            config,
            store,
            engine,
        })
    }
}
