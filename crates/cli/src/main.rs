//! `collector-cli` -- fetch collector projects and print them as JSON.
//!
//! # Environment variables
//!
//! | Variable                         | Required | Default                              | Description                        |
//! |----------------------------------|----------|--------------------------------------|------------------------------------|
//! | `COLLECTOR_IDENTITY`             | yes      | --                                   | Identity the requests are made for |
//! | `COLLECTOR_PROJECT_ID`           | no       | --                                   | Fetch this project instead of a list |
//! | `COLLECTOR_NAMESPACE`            | no       | `public`                             | `private` or `public`; list fetches only |
//! | `COLLECTOR_BASE_URL`             | no       | `http://localhost:8080/api/projects` | Project API base URL               |
//! | `COLLECTOR_REQUEST_TIMEOUT_SECS` | no       | `30`                                 | Per-request timeout                |

use anyhow::Context;
use collector_client::{ClientConfig, ProjectService, Scope};
use collector_core::types::ProjectId;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "collector_cli=info,collector_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let identity =
        std::env::var("COLLECTOR_IDENTITY").context("COLLECTOR_IDENTITY must be set")?;

    let project_id: Option<ProjectId> = std::env::var("COLLECTOR_PROJECT_ID")
        .ok()
        .map(|v| v.trim().parse())
        .transpose()
        .context("COLLECTOR_PROJECT_ID must be a valid integer")?;

    let config = ClientConfig::from_env();
    tracing::info!(
        base_url = %config.base_url,
        timeout_secs = config.request_timeout_secs,
        "Starting collector-cli",
    );

    let service = ProjectService::from_config(&config).context("Failed to build HTTP client")?;

    let output = match project_id {
        Some(id) => match service.project(id, &identity).await {
            Some(project) => serde_json::to_string_pretty(&project)?,
            None => {
                tracing::warn!(project_id = id, "No project data available");
                "null".to_string()
            }
        },
        None => {
            let scope = list_scope(std::env::var("COLLECTOR_NAMESPACE").ok())?;
            let projects = service.projects(scope, &identity).await;
            if projects.is_empty() {
                tracing::warn!(namespace = scope.namespace(), "No projects available");
            }
            serde_json::to_string_pretty(&projects)?
        }
    };

    println!("{output}");
    Ok(())
}

/// Scope of a list fetch; `public` when the namespace is unset.
fn list_scope(namespace: Option<String>) -> anyhow::Result<Scope> {
    let namespace = namespace.unwrap_or_else(|| "public".into());
    Scope::from_namespace(&namespace)
        .with_context(|| format!("COLLECTOR_NAMESPACE must be `private` or `public`, got `{namespace}`"))
}
