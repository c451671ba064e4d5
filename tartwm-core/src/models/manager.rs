use crate::config::Config;
use crate::state::State;
use crate::utils::child_process::WatcherProcess;

/// Maintains current program state.
#[derive(Debug)]
pub struct Manager {
    pub state: State,
    pub config: Config,

    pub(crate) watcher: Option<WatcherProcess>,
}

impl Manager {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            state: State::default(),
            config,
            watcher: None,
        }
    }
}

#[cfg(test)]
impl Manager {
    pub(crate) fn new_test() -> Self {
        Self::new(Config::default())
    }
}
