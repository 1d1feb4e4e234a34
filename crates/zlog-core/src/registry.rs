//! Logger registry — one [`Logger`] per module.
//!
//! The first config registered for a module wins. Later lookups with a
//! different config for the same module get the first logger back and the new
//! config is ignored.
//!
//! Check-and-create runs under a single lock, so two threads racing to
//! register the same module always observe the same instance. A failed
//! construction registers nothing.

use std::sync::{Arc, LazyLock, Mutex, MutexGuard};

use ahash::AHashMap;
use tracing::{debug, info};

use crate::{config::LogConfig, error::Result, logger::Logger, types::ModuleId};

static GLOBAL: LazyLock<LoggerRegistry> = LazyLock::new(LoggerRegistry::new);

/// Guarded map from module to its logger.
#[derive(Debug, Default)]
pub struct LoggerRegistry {
    loggers: Mutex<AHashMap<ModuleId, Arc<Logger>>>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self {
            loggers: Mutex::new(AHashMap::new()),
        }
    }

    /// Process-wide registry, created on first use.
    pub fn global() -> &'static LoggerRegistry {
        &GLOBAL
    }

    fn lock(&self) -> MutexGuard<'_, AHashMap<ModuleId, Arc<Logger>>> {
        self.loggers.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Return the logger for `config.module`, building it on first request.
    pub fn get_or_create(&self, config: LogConfig) -> Result<Arc<Logger>> {
        let mut loggers = self.lock();

        if let Some(existing) = loggers.get(&config.module) {
            if existing.config() != &config {
                debug!(
                    "module '{}' already registered — ignoring new config {config:?}",
                    config.module
                );
            }
            return Ok(Arc::clone(existing));
        }

        let module = config.module.clone();
        let logger = Arc::new(Logger::new(config)?);
        loggers.insert(module.clone(), Arc::clone(&logger));
        info!("registered logger for module '{module}'");
        Ok(logger)
    }

    /// Logger for `module`, if one was registered.
    pub fn get(&self, module: &ModuleId) -> Option<Arc<Logger>> {
        self.lock().get(module).cloned()
    }

    /// Registered modules, sorted.
    pub fn modules(&self) -> Vec<ModuleId> {
        let mut modules: Vec<_> = self.lock().keys().cloned().collect();
        modules.sort();
        modules
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every registered logger. Meant for test isolation; loggers
    /// already handed out keep working.
    pub fn reset(&self) {
        self.lock().clear();
    }
}
