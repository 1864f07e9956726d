//! Human-readable policy directory.

use crate::policy::domain::{PolicyDocument, PolicyError, PolicyResult};
use minijinja::Environment;
use serde::Serialize;
use serde_json::Value;

const DIRECTORY_TEMPLATE: &str = "\
PROTOCOL DIRECTORY
  Protocol cluster:            {{ protocol_cluster }}
  Protocol level:              {{ protocol_level }}
  Policy cluster:              {{ policy_cluster }}
  MCP registry:                {{ mcp_registry }}
  Registry discovery endpoint: {{ registry_discovery_endpoint }}
  Cache verified servers:      {{ cache_enabled }}
  Policy tags:                 {{ policy_tags | join(\", \") }}
  Policy fingerprint:          {{ fingerprint }}

POLICY QUALIFIERS
{%- for qualifier in qualifiers %}
  {{ qualifier.name }} = {{ qualifier.value }} ({{ qualifier.need }})
{%- endfor %}
";

#[derive(Serialize)]
struct DirectoryView<'a> {
    protocol_cluster: String,
    protocol_level: String,
    policy_cluster: String,
    mcp_registry: String,
    registry_discovery_endpoint: &'a str,
    cache_enabled: bool,
    policy_tags: &'a [String],
    fingerprint: &'a str,
    qualifiers: Vec<QualifierView<'a>>,
}

#[derive(Serialize)]
struct QualifierView<'a> {
    name: &'a str,
    value: String,
    need: &'a str,
}

/// Renders the policy metadata and every declared qualifier as text.
///
/// # Errors
///
/// Returns [`PolicyError::Render`] when template rendering fails.
pub fn render_policy_directory(document: &PolicyDocument) -> PolicyResult<String> {
    let metadata = document.metadata();
    let view = DirectoryView {
        protocol_cluster: display(metadata.protocol_cluster.as_ref()),
        protocol_level: display(metadata.protocol_level.as_ref()),
        policy_cluster: display(metadata.policy_cluster.as_ref()),
        mcp_registry: display(metadata.mcp_registry.as_ref()),
        registry_discovery_endpoint: document.registry_discovery_endpoint().as_str(),
        cache_enabled: document.cache_enabled(),
        policy_tags: &metadata.policy_tags,
        fingerprint: document.fingerprint(),
        qualifiers: document
            .qualifiers()
            .iter()
            .map(|qualifier| QualifierView {
                name: &qualifier.name,
                value: display(Some(&qualifier.value)),
                need: &qualifier.need,
            })
            .collect(),
    };

    Environment::new()
        .render_str(DIRECTORY_TEMPLATE, view)
        .map_err(|err| PolicyError::Render(err.to_string()))
}

fn display(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_owned(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
