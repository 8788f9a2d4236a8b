//! Test sources — mock `ResourceSource` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use folktale_core::error::FetchError;
use folktale_core::source::ResourceSource;

#[derive(Debug, Clone)]
enum Scripted {
    Body(Vec<u8>),
    Fail(FetchError),
    Stall,
}

/// A resource source with a scripted reaction per resource name. Records
/// every requested name. Unscripted names fail with `FetchError::NotFound`.
#[derive(Debug, Default)]
pub struct ScriptedResourceSource {
    script: HashMap<String, Scripted>,
    requested: Mutex<Vec<String>>,
}

impl ScriptedResourceSource {
    /// Creates a source with nothing scripted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `resource`.
    #[must_use]
    pub fn respond(mut self, resource: &str, body: Vec<u8>) -> Self {
        self.script.insert(resource.to_owned(), Scripted::Body(body));
        self
    }

    /// Fail every fetch of `resource` with `error`.
    #[must_use]
    pub fn fail(mut self, resource: &str, error: FetchError) -> Self {
        self.script.insert(resource.to_owned(), Scripted::Fail(error));
        self
    }

    /// Never settle fetches of `resource`.
    #[must_use]
    pub fn stall(mut self, resource: &str) -> Self {
        self.script.insert(resource.to_owned(), Scripted::Stall);
        self
    }

    /// Returns every resource name requested so far, in request order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResourceSource for ScriptedResourceSource {
    async fn fetch(&self, resource: &str) -> Result<Vec<u8>, FetchError> {
        self.requested.lock().unwrap().push(resource.to_owned());
        match self.script.get(resource).cloned() {
            Some(Scripted::Body(body)) => Ok(body),
            Some(Scripted::Fail(error)) => Err(error),
            Some(Scripted::Stall) => std::future::pending::<Result<Vec<u8>, FetchError>>().await,
            None => Err(FetchError::NotFound(resource.to_owned())),
        }
    }
}

/// A resource source that fails every fetch with the same error. Useful for
/// testing the all-embedded path.
#[derive(Debug)]
pub struct FailingResourceSource(pub FetchError);

#[async_trait]
impl ResourceSource for FailingResourceSource {
    async fn fetch(&self, _resource: &str) -> Result<Vec<u8>, FetchError> {
        Err(self.0.clone())
    }
}
