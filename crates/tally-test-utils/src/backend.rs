//! Scriptable in-memory manager backend

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tally_managers::{Error, ManagerBackend, ManagerRegistry, Result};

/// A manager backend with scriptable behavior and call recording.
///
/// Tracks an in-memory installed set; availability and per-operation
/// failures are configured at construction. Install and uninstall
/// calls are recorded so tests can assert on what was invoked.
#[derive(Debug, Default)]
pub struct MockBackend {
    unavailable: bool,
    fail_available: bool,
    fail_list: bool,
    fail_install: bool,
    fail_uninstall: bool,
    installed: Mutex<Vec<String>>,
    install_calls: Mutex<Vec<String>>,
    uninstall_calls: Mutex<Vec<String>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the installed set.
    pub fn with_installed<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.installed.lock().unwrap() = names.into_iter().map(Into::into).collect();
        self
    }

    /// Report the manager as not available on this host.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Fail the availability probe itself.
    pub fn failing_availability(mut self) -> Self {
        self.fail_available = true;
        self
    }

    /// Fail `list_installed`.
    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    /// Fail `install`.
    pub fn failing_install(mut self) -> Self {
        self.fail_install = true;
        self
    }

    /// Fail `uninstall`.
    pub fn failing_uninstall(mut self) -> Self {
        self.fail_uninstall = true;
        self
    }

    /// Names passed to `install` so far.
    pub fn install_calls(&self) -> Vec<String> {
        self.install_calls.lock().unwrap().clone()
    }

    /// Names passed to `uninstall` so far.
    pub fn uninstall_calls(&self) -> Vec<String> {
        self.uninstall_calls.lock().unwrap().clone()
    }

    /// Current installed set.
    pub fn installed(&self) -> Vec<String> {
        self.installed.lock().unwrap().clone()
    }

    fn command_failed(&self, what: &str) -> Error {
        Error::CommandFailed {
            program: "mock".to_string(),
            output: format!("{what} failed"),
        }
    }
}

#[async_trait]
impl ManagerBackend for MockBackend {
    async fn is_available(&self) -> Result<bool> {
        if self.fail_available {
            return Err(self.command_failed("availability probe"));
        }
        Ok(!self.unavailable)
    }

    async fn list_installed(&self) -> Result<Vec<String>> {
        if self.fail_list {
            return Err(self.command_failed("list"));
        }
        Ok(self.installed())
    }

    async fn install(&self, name: &str) -> Result<()> {
        self.install_calls.lock().unwrap().push(name.to_string());
        if self.fail_install {
            return Err(self.command_failed("install"));
        }
        let mut installed = self.installed.lock().unwrap();
        if !installed.iter().any(|p| p == name) {
            installed.push(name.to_string());
        }
        Ok(())
    }

    async fn uninstall(&self, name: &str) -> Result<()> {
        self.uninstall_calls.lock().unwrap().push(name.to_string());
        if self.fail_uninstall {
            return Err(self.command_failed("uninstall"));
        }
        self.installed.lock().unwrap().retain(|p| p != name);
        Ok(())
    }
}

/// Build a registry over pre-constructed mock backends.
pub fn registry_with<I>(backends: I) -> ManagerRegistry
where
    I: IntoIterator<Item = (&'static str, Arc<MockBackend>)>,
{
    let mut registry = ManagerRegistry::new();
    for (name, backend) in backends {
        registry.register(name, move || backend.clone() as Arc<dyn ManagerBackend>);
    }
    registry
}
