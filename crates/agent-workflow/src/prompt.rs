//! Prompt rendering for roles and stage inputs

use crate::{Result, RoleSpec, TaskSpec};
use minijinja::{Environment, Value};
use serde_json::json;

const ROLE_PROMPT: &str = "\
You are the {{ name }}.
Your goal: {{ goal }}

{{ backstory }}
{%- if tools %}

You can call these tools: {{ tools | join(\", \") }}.
Use them to obtain every figure you report. Never invent numbers.
{%- endif %}";

const STAGE_INPUT: &str = "\
Request: {{ query }}

Task:
{{ description }}

Expected output:
{{ expected_output }}
{%- if prior %}

Context from the previous stage:
{{ prior }}
{%- endif %}";

/// System prompt for the agent playing `role`
pub fn render_role_prompt(role: &RoleSpec) -> Result<String> {
    render(
        ROLE_PROMPT,
        &json!({
            "name": role.name,
            "goal": role.goal,
            "backstory": role.backstory,
            "tools": role.tool_names(),
        }),
    )
}

/// User message that starts a stage
pub fn render_stage_input(task: &TaskSpec, query: &str, prior: Option<&str>) -> Result<String> {
    render(
        STAGE_INPUT,
        &json!({
            "query": query,
            "description": task.description,
            "expected_output": task.expected_output,
            "prior": prior,
        }),
    )
}

fn render(template: &str, vars: &serde_json::Value) -> Result<String> {
    let env = Environment::new();
    Ok(env.render_str(template, Value::from_serialize(vars))?)
}
