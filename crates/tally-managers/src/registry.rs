//! Manager registry: name-to-backend resolution with caching

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::backend::ManagerBackend;
use crate::backends::{
    BrewBackend, CargoBackend, GemBackend, GoBackend, NodeBackend, UvBackend,
};
use crate::{Error, Result};

type BackendCtor = Box<dyn Fn() -> Arc<dyn ManagerBackend> + Send + Sync>;

/// Central registry mapping manager names to live backend instances.
///
/// Constructed once and passed by reference to every consumer. Tests
/// build their own instance and register substitute constructors, so
/// overrides never leak through process-global state.
pub struct ManagerRegistry {
    ctors: HashMap<String, BackendCtor>,
    cache: Mutex<HashMap<String, Arc<dyn ManagerBackend>>>,
}

impl ManagerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            ctors: HashMap::new(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Create a registry pre-populated with all builtin backends.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("brew", || Arc::new(BrewBackend::new()) as Arc<dyn ManagerBackend>);
        registry.register("cargo", || Arc::new(CargoBackend::new()) as Arc<dyn ManagerBackend>);
        registry.register("gem", || Arc::new(GemBackend::new()) as Arc<dyn ManagerBackend>);
        registry.register("go", || Arc::new(GoBackend::new()) as Arc<dyn ManagerBackend>);
        registry.register("npm", || Arc::new(NodeBackend::npm()) as Arc<dyn ManagerBackend>);
        registry.register("pnpm", || Arc::new(NodeBackend::pnpm()) as Arc<dyn ManagerBackend>);
        registry.register("bun", || Arc::new(NodeBackend::bun()) as Arc<dyn ManagerBackend>);
        registry.register("uv", || Arc::new(UvBackend::new()) as Arc<dyn ManagerBackend>);
        registry
    }

    /// Register a backend constructor under a manager name.
    pub fn register<F>(&mut self, name: impl Into<String>, ctor: F)
    where
        F: Fn() -> Arc<dyn ManagerBackend> + Send + Sync + 'static,
    {
        self.ctors.insert(name.into(), Box::new(ctor));
    }

    /// Resolve a manager name to its backend instance.
    ///
    /// Instances are cached: repeat calls for the same name return the
    /// same backend.
    pub fn get(&self, name: &str) -> Result<Arc<dyn ManagerBackend>> {
        if let Some(backend) = self.cache.lock().unwrap().get(name) {
            return Ok(backend.clone());
        }

        let ctor = self.ctors.get(name).ok_or_else(|| Error::UnsupportedManager {
            name: name.to_string(),
            supported: self.manager_names().join(", "),
        })?;

        let backend = ctor();
        self.cache
            .lock()
            .unwrap()
            .insert(name.to_string(), backend.clone());
        Ok(backend)
    }

    /// Check if a manager is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.ctors.contains_key(name)
    }

    /// All registered manager names (sorted), irrespective of whether
    /// they are usable on the current host.
    pub fn manager_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.ctors.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered managers.
    pub fn len(&self) -> usize {
        self.ctors.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.ctors.is_empty()
    }
}

impl Default for ManagerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
