#![allow(dead_code)]

use std::path::Path;

use pathway_core::{
    generator::CommandGenerator, models::RoadmapType, Navigator, NavigatorBuilder, SaveRoadmap,
};
use tempfile::TempDir;

/// Generator script answering both request kinds with fixed content.
pub const GENERATOR_SCRIPT: &str = r#"request=$(cat)
case "$request" in
  *'"request":"generate_roadmap"'*)
    printf '%s' '{"role_summary":{"title":"Data Engineer"},"gap_analysis":{"missing":["Spark"]},"roadmap":{"phases":[{"phase_name":"Foundations","tasks":[{"task_id":"t1","title":"Learn SQL"},{"task_id":"t2","title":"Learn Python"}]}]}}'
    ;;
  *'"request":"regenerate_task"'*)
    printf '%s' '{"new_task":{"task_id":"t2","title":"Learn Pandas","skills_gained":["pandas"]}}'
    ;;
  *)
    echo "unknown request" >&2
    exit 2
    ;;
esac
"#;

/// Helper function to create a test navigator without a generator
pub async fn create_test_navigator() -> (TempDir, Navigator) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let navigator = NavigatorBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .build()
        .await
        .expect("Failed to create navigator");
    (temp_dir, navigator)
}

/// Helper function to create a navigator whose generator runs `script`
/// through `sh -c`.
pub async fn create_scripted_navigator(script: &str) -> (TempDir, Navigator) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let navigator = scripted_navigator(temp_dir.path(), script).await;
    (temp_dir, navigator)
}

pub async fn scripted_navigator(dir: &Path, script: &str) -> Navigator {
    NavigatorBuilder::new()
        .with_database_path(Some(dir.join("test.db")))
        .with_generator(CommandGenerator::new("sh").with_args(["-c", script]))
        .build()
        .await
        .expect("Failed to create navigator")
}

/// Save parameters for a one-phase roadmap holding `tasks`.
pub fn save_params(title: &str, tasks: &[(&str, &str)]) -> SaveRoadmap {
    let tasks: Vec<serde_json::Value> = tasks
        .iter()
        .map(|(task_id, title)| serde_json::json!({"task_id": task_id, "title": title}))
        .collect();
    SaveRoadmap {
        roadmap_data: serde_json::json!({
            "role_summary": {"title": title},
            "gap_analysis": {},
            "roadmap": {"phases": [{"phase_name": "Foundations", "tasks": tasks}]},
        }),
        title: title.to_string(),
        job_id: None,
        roadmap_type: RoadmapType::Career,
        target_career: Some(title.to_string()),
    }
}
