use super::*;

/// Environment variable naming the menu directory when the builder sets none.
pub const MENU_DIR_ENV: &str = "NAVMENU_MENU_DIR";
/// Environment variable overriding the event channel capacity.
pub const EVENT_CAPACITY_ENV: &str = "NAVMENU_EVENT_CAPACITY";

const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Effective loader settings after applying builder values and the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub menu_dir: Option<PathBuf>,
    /// Completed fetches buffered before the loader waits for the engine to drain them.
    pub event_capacity: usize,
}

/// Configures and starts the section loader.
///
/// The loader runs a [`SectionLoaderActor`] on a dedicated thread with its own
/// current-thread Tokio runtime, so it can be used from code that has no runtime at
/// all. Sections are read from an explicit [`SectionStore`] if one is given,
/// otherwise from the menu directory.
#[derive(Default, Debug)]
pub struct SectionLoaderBuilder {
    menu_dir: Option<PathBuf>,
    store: Option<SectionStore>,
    event_capacity: Option<usize>,
}

impl SectionLoaderBuilder {
    /// Read sections from JSON files in `dir`. Env `NAVMENU_MENU_DIR` is used when
    /// this is not called.
    pub fn with_menu_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.menu_dir = Some(dir.into());
        self
    }

    /// Use `store` instead of a menu directory.
    pub fn with_store(mut self, store: SectionStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the event channel capacity; clamped to 1..=4096. Takes precedence over
    /// env `NAVMENU_EVENT_CAPACITY`.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = Some(capacity);
        self
    }

    pub fn config(&self) -> LoaderConfig {
        let env_dir = std::env::var_os(MENU_DIR_ENV).map(PathBuf::from);
        let env_capacity = std::env::var(EVENT_CAPACITY_ENV)
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok());
        LoaderConfig {
            menu_dir: self.menu_dir.clone().or(env_dir),
            event_capacity: compute_event_capacity_from_inputs(env_capacity, self.event_capacity),
        }
    }

    /// Start the loader thread and return the request handle and the event receiver.
    pub fn build(self) -> Result<(SectionLoaderHandle, SectionEvents), LoaderError> {
        let config = self.config();
        let store = match (self.store, config.menu_dir) {
            (Some(store), _) => store,
            (None, Some(dir)) => {
                let dir = std::path::absolute(&dir)
                    .map_err(|e| LoaderError::file_operation("resolve", &dir, e))?;
                SectionStore::Directory(dir)
            }
            (None, None) => {
                return Err(LoaderError::Config(format!(
                    "no section store or menu directory (set {MENU_DIR_ENV})"
                )));
            }
        };

        let (tx, rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::channel(config.event_capacity);

        tracing::debug!(event_capacity = config.event_capacity, "starting section loader");
        thread::Builder::new()
            .name("navmenu-loader".to_string())
            .spawn(move || {
                let rt = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(rt) => rt,
                    Err(e) => {
                        // Dropping the receivers makes every handle report a closed channel.
                        tracing::error!(error = %e, "failed to build section loader runtime");
                        return;
                    }
                };
                rt.block_on(async {
                    let actor = SectionLoaderActor::new(rx, events_tx, store);
                    actor.run().await;
                });
            })
            .map_err(|e| LoaderError::Spawn(e.to_string()))?;

        Ok((
            SectionLoaderHandle { request_sender: tx },
            SectionEvents { receiver: events_rx },
        ))
    }
}

/// Precedence: builder override > env override > default (64). Clamped to 1..=4096.
pub(crate) fn compute_event_capacity_from_inputs(
    env_override: Option<usize>,
    builder_override: Option<usize>,
) -> usize {
    builder_override
        .or(env_override)
        .unwrap_or(DEFAULT_EVENT_CAPACITY)
        .clamp(1, 4096)
}
