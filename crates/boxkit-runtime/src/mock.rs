use crate::backend::BoxBackend;
use crate::RuntimeError;
use std::collections::{BTreeSet, HashSet};
use std::sync::Mutex;

/// A call recorded by [`MockBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Exists { name: String, root: bool },
    Create { args: Vec<String> },
    Remove { name: String, root: bool },
    Enter { name: String, root: bool, command: Vec<String> },
}

#[derive(Default)]
struct MockState {
    containers: BTreeSet<String>,
    fail_create: HashSet<String>,
    calls: Vec<MockCall>,
}

/// In-memory backend that records every call.
#[derive(Default)]
pub struct MockBackend {
    state: Mutex<MockState>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend `name` already exists.
    #[must_use]
    pub fn with_container(self, name: &str) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.containers.insert(name.to_owned());
        }
        self
    }

    /// Make `create` fail for `name`.
    #[must_use]
    pub fn failing_create(self, name: &str) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.fail_create.insert(name.to_owned());
        }
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.state
            .lock()
            .map(|s| s.calls.clone())
            .unwrap_or_default()
    }

    pub fn containers(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|s| s.containers.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MockState>, RuntimeError> {
        self.state
            .lock()
            .map_err(|e| RuntimeError::Config(format!("mutex poisoned: {e}")))
    }
}

fn name_arg(args: &[String]) -> Option<&str> {
    args.iter()
        .position(|a| a == "--name")
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

impl BoxBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn available(&self) -> bool {
        true
    }

    fn exists(&self, name: &str, root: bool) -> Result<bool, RuntimeError> {
        let mut state = self.lock()?;
        state.calls.push(MockCall::Exists {
            name: name.to_owned(),
            root,
        });
        Ok(state.containers.contains(name))
    }

    fn create(&self, args: &[String]) -> Result<(), RuntimeError> {
        let mut state = self.lock()?;
        state.calls.push(MockCall::Create {
            args: args.to_vec(),
        });
        let name = name_arg(args).unwrap_or_default().to_owned();
        if state.fail_create.contains(&name) {
            return Err(RuntimeError::CommandFailed {
                program: "distrobox-create".to_owned(),
                status: "exit status: 1".to_owned(),
            });
        }
        state.containers.insert(name);
        Ok(())
    }

    fn remove(&self, name: &str, root: bool) -> Result<(), RuntimeError> {
        let mut state = self.lock()?;
        state.calls.push(MockCall::Remove {
            name: name.to_owned(),
            root,
        });
        state.containers.remove(name);
        Ok(())
    }

    fn enter(&self, name: &str, root: bool, command: &[String]) -> Result<(), RuntimeError> {
        let mut state = self.lock()?;
        state.calls.push(MockCall::Enter {
            name: name.to_owned(),
            root,
            command: command.to_vec(),
        });
        if state.containers.contains(name) {
            Ok(())
        } else {
            Err(RuntimeError::CommandFailed {
                program: "distrobox-enter".to_owned(),
                status: format!("no such container: {name}"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(name: &str) -> Vec<String> {
        vec!["--yes".to_owned(), "--name".to_owned(), name.to_owned()]
    }

    #[test]
    fn mock_lifecycle() {
        let backend = MockBackend::new();
        assert!(!backend.exists("box", false).unwrap());

        backend.create(&args("box")).unwrap();
        assert!(backend.exists("box", false).unwrap());
        backend
            .enter("box", false, &["touch".to_owned(), "/dev/null".to_owned()])
            .unwrap();

        backend.remove("box", false).unwrap();
        assert!(!backend.exists("box", false).unwrap());
        assert_eq!(backend.calls().len(), 6);
    }

    #[test]
    fn enter_missing_container_fails() {
        let backend = MockBackend::new();
        assert!(backend.enter("ghost", false, &[]).is_err());
    }

    #[test]
    fn preseeded_and_failing_containers() {
        let backend = MockBackend::new()
            .with_container("old")
            .failing_create("broken");
        assert!(backend.exists("old", true).unwrap());
        assert!(backend.create(&args("broken")).is_err());
        assert_eq!(backend.containers(), vec!["old"]);
        assert_eq!(
            backend.calls()[0],
            MockCall::Exists {
                name: "old".to_owned(),
                root: true
            }
        );
    }
}
