//! Project fetch service.
//!
//! [`ProjectService`] retrieves one project or the project list of a
//! namespace and runs the result through the core parser. Failures never
//! reach the caller: a failed list fetch yields an empty list, a failed
//! single fetch yields `None`, and a single project whose body is not
//! valid JSON is parsed as `{}` (a default-valued project). Every
//! failure is logged at `warn`.
//!
//! The `fetch_*` methods spawn one tokio task per call and report
//! through a [`ProjectCallback`], which is invoked exactly once per
//! call. Callbacks of concurrent calls may arrive in any order. They may
//! be called from any thread: tasks go to the runtime the service was
//! built in, or to a shared background runtime when it was built outside
//! one.

use std::sync::{Arc, OnceLock};

use collector_core::types::ProjectId;
use collector_core::{parse_document, parse_project, parse_projects, Project};
use serde_json::{Map, Value};
use tokio::runtime::{Handle, Runtime};
use tokio::task::JoinHandle;

use crate::api::{HttpTransport, ProjectTransport, TransportError};
use crate::config::ClientConfig;
use crate::token::{Sha256TokenSource, TokenSource};

/// Which project namespace a list fetch targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Private,
    Public,
}

impl Scope {
    pub fn namespace(self) -> &'static str {
        match self {
            Scope::Private => "private",
            Scope::Public => "public",
        }
    }

    /// Parse a namespace name (`private` / `public`, any case).
    pub fn from_namespace(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "private" => Some(Scope::Private),
            "public" => Some(Scope::Public),
            _ => None,
        }
    }

    fn path(self) -> String {
        format!("?namespace={}", self.namespace())
    }
}

/// Completion contract for the `fetch_*` methods.
pub trait ProjectCallback: Send + Sync {
    /// Result of [`ProjectService::fetch_projects`]; empty when nothing
    /// could be fetched.
    fn on_projects(&self, projects: Vec<Project>);

    /// Result of [`ProjectService::fetch_project`]; `None` when the
    /// project could not be fetched.
    fn on_project(&self, project: Option<Project>);
}

/// Runtime for services created outside of any tokio runtime. Lives for
/// the rest of the process.
fn background_runtime() -> &'static Runtime {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("collector-fetch")
            .enable_all()
            .build()
            .expect("Failed to build background fetch runtime")
    })
}

/// Fetches and parses remote projects.
///
/// Cheap to clone; clones share the transport, token source and runtime.
#[derive(Clone)]
pub struct ProjectService {
    transport: Arc<dyn ProjectTransport>,
    tokens: Arc<dyn TokenSource>,
    runtime: Handle,
}

impl ProjectService {
    /// Create a service over `transport` using [`Sha256TokenSource`].
    ///
    /// Fetch tasks run on the current tokio runtime, or on a shared
    /// background runtime when there is none.
    pub fn new(transport: Arc<dyn ProjectTransport>) -> Self {
        let runtime = Handle::try_current().unwrap_or_else(|_| background_runtime().handle().clone());
        Self {
            transport,
            tokens: Arc::new(Sha256TokenSource),
            runtime,
        }
    }

    /// Create a service talking HTTP to the configured base URL.
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    /// Replace the token derivation.
    pub fn with_token_source(mut self, tokens: Arc<dyn TokenSource>) -> Self {
        self.tokens = tokens;
        self
    }

    /// Run fetch tasks on `runtime`.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = runtime;
        self
    }

    /// Fetch and parse the project list of `scope`.
    pub async fn projects(&self, scope: Scope, identity: &str) -> Vec<Project> {
        let token = self.tokens.token_for(identity);
        let namespace = scope.namespace();

        let body = match self.transport.get(&scope.path(), &token).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(namespace, error = %e, "Project list fetch failed");
                return Vec::new();
            }
        };

        match parse_document(&body) {
            Ok(doc) if doc.is_array() => {
                let projects = parse_projects(&doc);
                tracing::info!(namespace, count = projects.len(), "Project list fetched");
                projects
            }
            Ok(_) => {
                tracing::warn!(namespace, "Project list response is not an array");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(namespace, error = %e, "Project list response is not valid JSON");
                Vec::new()
            }
        }
    }

    /// Fetch and parse a single project.
    pub async fn project(&self, id: ProjectId, identity: &str) -> Option<Project> {
        let token = self.tokens.token_for(identity);

        let body = match self.transport.get(&id.to_string(), &token).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(project_id = id, error = %e, "Project fetch failed");
                return None;
            }
        };

        let doc = parse_document(&body).unwrap_or_else(|e| {
            tracing::warn!(project_id = id, error = %e, "Project response is not valid JSON");
            Value::Object(Map::new())
        });

        let project = parse_project(&doc);
        tracing::info!(
            project_id = id,
            version = project.version,
            layers = project.layers.len(),
            "Project fetched"
        );
        Some(project)
    }

    /// Spawn a list fetch and report it through
    /// [`ProjectCallback::on_projects`]. Returns immediately; callable
    /// from any thread.
    pub fn fetch_projects(
        &self,
        scope: Scope,
        identity: impl Into<String>,
        callback: Arc<dyn ProjectCallback>,
    ) -> JoinHandle<()> {
        let service = self.clone();
        let identity = identity.into();
        self.runtime.spawn(async move {
            let projects = service.projects(scope, &identity).await;
            callback.on_projects(projects);
        })
    }

    /// Spawn a single-project fetch and report it through
    /// [`ProjectCallback::on_project`]. Returns immediately; callable
    /// from any thread.
    pub fn fetch_project(
        &self,
        id: ProjectId,
        identity: impl Into<String>,
        callback: Arc<dyn ProjectCallback>,
    ) -> JoinHandle<()> {
        let service = self.clone();
        let identity = identity.into();
        self.runtime.spawn(async move {
            let project = service.project(id, &identity).await;
            callback.on_project(project);
        })
    }
}
