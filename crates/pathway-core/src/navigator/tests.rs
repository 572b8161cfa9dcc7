//! Tests for the navigator module.

use std::time::Duration;

use tempfile::TempDir;

use super::*;
use crate::{
    db::Database,
    gate::RegenerationState,
    generator::{FakeGenerator, GeneratorCall},
    logger::FakeInteractionSink,
    models::{
        ActionType, FeedbackType, MoveDirection, Phase, RoadmapData, RoadmapType, Task,
        MAX_SAVED_ROADMAPS,
    },
    params::{
        GenerateRoadmap, Id, ListInteractions, MoveRoadmap, RegenerateTask, ReorderRoadmaps,
        SaveRoadmap, TaskAction, TaskPointer,
    },
    tree,
};

/// Helper function to create a test navigator with fakes on both seams
async fn create_test_navigator() -> (TempDir, Navigator, FakeGenerator, FakeInteractionSink) {
    create_navigator_with_timeout(Duration::from_secs(5)).await
}

async fn create_navigator_with_timeout(
    timeout: Duration,
) -> (TempDir, Navigator, FakeGenerator, FakeInteractionSink) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let generator = FakeGenerator::new();
    let sink = FakeInteractionSink::new();
    let navigator = NavigatorBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_generator(generator.clone())
        .with_interaction_sink(sink.clone())
        .with_generation_timeout(timeout)
        .build()
        .await
        .expect("Failed to create navigator");
    (temp_dir, navigator, generator, sink)
}

fn sample_data() -> RoadmapData {
    let mut data = RoadmapData {
        role_summary: serde_json::json!({"title": "Data Engineer"}),
        gap_analysis: serde_json::json!({"missing": ["Spark"]}),
        ..Default::default()
    };
    data.roadmap.phases.push(
        Phase::new(
            "Foundations",
            vec![Task::titled("Learn SQL"), Task::titled("Learn Python").with_id("t2")],
        )
        .into(),
    );
    data.roadmap.phases.push(
        Phase::new(
            "Projects",
            vec![Task::titled("Build a pipeline"), Task::titled("Learn SQL")],
        )
        .into(),
    );
    data
}

fn save_params(title: &str) -> SaveRoadmap {
    SaveRoadmap {
        roadmap_data: serde_json::to_value(sample_data()).unwrap(),
        title: title.to_string(),
        job_id: None,
        roadmap_type: RoadmapType::Career,
        target_career: Some("Data Engineer".to_string()),
    }
}

fn regenerate(roadmap_id: u64, task: &str) -> RegenerateTask {
    RegenerateTask {
        roadmap_id,
        pointer: TaskPointer {
            task: task.to_string(),
            ..Default::default()
        },
        feedback_type: FeedbackType::Skip,
        rating: None,
    }
}

fn action(roadmap_id: u64, task: &str, action: ActionType, rating: Option<u8>) -> TaskAction {
    TaskAction {
        roadmap_id,
        pointer: TaskPointer {
            task: task.to_string(),
            ..Default::default()
        },
        action,
        rating,
        duration_seconds: None,
    }
}

#[tokio::test]
async fn test_regenerate_replaces_only_the_target_task() {
    let (_temp_dir, navigator, generator, _sink) = create_test_navigator().await;
    let slot = navigator.save_roadmap(&save_params("Data")).await.unwrap();
    let sql_before = serde_json::to_string(&slot.roadmap.phases[0].tasks[0]).unwrap();

    generator.push_task(Task::titled("Learn Pandas").with_id("t2"));
    let regeneration = navigator
        .regenerate_task(&regenerate(slot.id(), "t2"))
        .await
        .expect("regeneration should succeed");

    let tasks = &regeneration.roadmap.phases[0].tasks;
    assert_eq!(tasks[0].title, "Learn SQL");
    assert_eq!(tasks[1].title, "Learn Pandas");
    assert_eq!(tasks[1].task_id.as_deref(), Some("t2"));
    assert_eq!(serde_json::to_string(&tasks[0]).unwrap(), sql_before);
    assert_eq!(regeneration.previous_task.title, "Learn Python");
    assert_eq!(regeneration.replaced_at, tree::TaskRef::new(0, 1));

    let stored = navigator.view_roadmap(&Id { id: slot.id() }).await.unwrap();
    assert_eq!(stored.roadmap.phases, regeneration.roadmap.phases);
    assert_eq!(stored.roadmap.revision, 1);
    assert_eq!(stored.roadmap.role_summary, slot.roadmap.role_summary);
    assert_eq!(stored.roadmap.phases[1], slot.roadmap.phases[1]);
}

#[tokio::test]
async fn test_regenerate_sends_current_task_to_generator() {
    let (_temp_dir, navigator, generator, _sink) = create_test_navigator().await;
    let slot = navigator.save_roadmap(&save_params("Data")).await.unwrap();

    generator.push_task(Task::titled("Read a SQL book"));
    let mut params = regenerate(slot.id(), "Learn SQL");
    params.feedback_type = FeedbackType::TooHard;
    params.rating = Some(1);
    navigator.regenerate_task(&params).await.unwrap();

    let calls = generator.calls();
    let [GeneratorCall::RegenerateTask(request)] = calls.as_slice() else {
        panic!("expected one regeneration call, got {calls:?}");
    };
    assert_eq!(request.task_identity, "Learn SQL");
    assert_eq!(request.feedback_type, FeedbackType::TooHard);
    assert_eq!(request.difficulty_rating.map(|r| r.get()), Some(1));
    assert_eq!(request.target_career.as_deref(), Some("Data Engineer"));
    assert_eq!(request.current_task.title, "Learn SQL");
}

#[tokio::test]
async fn test_concurrent_regenerations_are_single_flight() {
    let (_temp_dir, navigator, generator, _sink) = create_test_navigator().await;
    let slot = navigator.save_roadmap(&save_params("Data")).await.unwrap();

    generator.set_delay(Some(Duration::from_millis(100)));
    generator.push_task(Task::titled("Learn Pandas").with_id("t2"));
    generator.push_task(Task::titled("Learn Spark"));

    let first_params = regenerate(slot.id(), "t2");
    let second_params = regenerate(slot.id(), "Build a pipeline");
    let (first, second) = tokio::join!(
        navigator.regenerate_task(&first_params),
        navigator.regenerate_task(&second_params)
    );

    assert!(first.is_ok());
    assert!(matches!(
        second,
        Err(RoadmapError::RegenerationInFlight { ref identity, .. }) if identity == "t2"
    ));
    assert_eq!(generator.regeneration_calls(), 1);
    assert_eq!(generator.max_in_flight(), 1);
    assert_eq!(navigator.regeneration_state(slot.id()), RegenerationState::Idle);

    // The lock is free again once the first call returned.
    navigator
        .regenerate_task(&second_params)
        .await
        .expect("second regeneration after release");
}

#[tokio::test]
async fn test_regenerations_on_different_roadmaps_run_together() {
    let (_temp_dir, navigator, generator, _sink) = create_test_navigator().await;
    let first_slot = navigator.save_roadmap(&save_params("A")).await.unwrap();
    let second_slot = navigator.save_roadmap(&save_params("B")).await.unwrap();

    generator.set_delay(Some(Duration::from_millis(100)));
    generator.push_task(Task::titled("One"));
    generator.push_task(Task::titled("Two"));

    let first_params = regenerate(first_slot.id(), "t2");
    let second_params = regenerate(second_slot.id(), "t2");
    let (first, second) = tokio::join!(
        navigator.regenerate_task(&first_params),
        navigator.regenerate_task(&second_params)
    );

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(generator.max_in_flight(), 2);
}

#[tokio::test]
async fn test_regeneration_state_while_in_flight() {
    let (_temp_dir, navigator, generator, _sink) = create_test_navigator().await;
    let slot = navigator.save_roadmap(&save_params("Data")).await.unwrap();

    generator.set_delay(Some(Duration::from_millis(200)));
    generator.push_task(Task::titled("Learn Pandas").with_id("t2"));

    let background = navigator.clone();
    let roadmap_id = slot.id();
    let handle =
        tokio::spawn(async move {
            background
                .regenerate_task(&regenerate(roadmap_id, "t2"))
                .await
        });

    tokio::time::sleep(Duration::from_millis(50)).await;
    let state = navigator.regeneration_state(roadmap_id);
    assert!(state.is_locking("t2"));
    assert!(!state.is_locking("Learn SQL"));

    handle.await.unwrap().unwrap();
    assert_eq!(navigator.regeneration_state(roadmap_id), RegenerationState::Idle);
}

#[tokio::test]
async fn test_generator_failure_leaves_roadmap_unchanged() {
    let (_temp_dir, navigator, generator, _sink) = create_test_navigator().await;
    let slot = navigator.save_roadmap(&save_params("Data")).await.unwrap();

    generator.set_failure(Some("model overloaded"));
    let err = navigator
        .regenerate_task(&regenerate(slot.id(), "t2"))
        .await
        .unwrap_err();

    assert!(matches!(err, RoadmapError::Generation { ref message } if message.contains("model overloaded")));
    assert_eq!(navigator.regeneration_state(slot.id()), RegenerationState::Idle);

    let stored = navigator.view_roadmap(&Id { id: slot.id() }).await.unwrap();
    assert_eq!(stored.roadmap, slot.roadmap);
}

#[tokio::test]
async fn test_generator_timeout_is_generation_error_and_releases_lock() {
    let (_temp_dir, navigator, generator, _sink) =
        create_navigator_with_timeout(Duration::from_millis(50)).await;
    let slot = navigator.save_roadmap(&save_params("Data")).await.unwrap();

    generator.set_delay(Some(Duration::from_secs(2)));
    generator.push_task(Task::titled("Too late"));

    let err = navigator
        .regenerate_task(&regenerate(slot.id(), "t2"))
        .await
        .unwrap_err();

    assert!(matches!(err, RoadmapError::Generation { ref message } if message.contains("timed out")));
    assert_eq!(navigator.regeneration_state(slot.id()), RegenerationState::Idle);

    let stored = navigator.view_roadmap(&Id { id: slot.id() }).await.unwrap();
    assert_eq!(stored.roadmap.revision, 0);
    assert_eq!(stored.roadmap.phases[0].tasks[1].title, "Learn Python");
}

#[tokio::test]
async fn test_generated_task_without_title_is_rejected() {
    let (_temp_dir, navigator, generator, _sink) = create_test_navigator().await;
    let slot = navigator.save_roadmap(&save_params("Data")).await.unwrap();

    generator.push_task(Task::titled("   "));
    let err = navigator
        .regenerate_task(&regenerate(slot.id(), "t2"))
        .await
        .unwrap_err();
    assert!(matches!(err, RoadmapError::Generation { .. }));
}

#[tokio::test]
async fn test_regenerate_unknown_roadmap_and_task() {
    let (_temp_dir, navigator, generator, _sink) = create_test_navigator().await;
    let slot = navigator.save_roadmap(&save_params("Data")).await.unwrap();

    let err = navigator
        .regenerate_task(&regenerate(999, "t2"))
        .await
        .unwrap_err();
    assert!(matches!(err, RoadmapError::RoadmapNotFound { id: 999 }));

    let err = navigator
        .regenerate_task(&regenerate(slot.id(), "Learn Rust"))
        .await
        .unwrap_err();
    assert!(matches!(err, RoadmapError::TaskNotFound { ref identity } if identity == "Learn Rust"));

    assert_eq!(generator.regeneration_calls(), 0);
    assert_eq!(navigator.regeneration_state(slot.id()), RegenerationState::Idle);
}

#[tokio::test]
async fn test_concurrent_content_change_is_stale() {
    let (temp_dir, navigator, generator, _sink) = create_test_navigator().await;
    let slot = navigator.save_roadmap(&save_params("Data")).await.unwrap();
    let roadmap_id = slot.id();

    generator.set_delay(Some(Duration::from_millis(200)));
    generator.push_task(Task::titled("Learn Pandas").with_id("t2"));

    let background = navigator.clone();
    let handle =
        tokio::spawn(async move {
            background
                .regenerate_task(&regenerate(roadmap_id, "t2"))
                .await
        });

    // Another writer commits a new revision while the generator is busy.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let mut db = Database::new(temp_dir.path().join("test.db")).unwrap();
    let other = tree::replace_task(&slot.roadmap, tree::TaskRef::new(1, 0), Task::titled("Other"))
        .unwrap();
    db.update_roadmap_content(navigator.user_id(), &other, 0).unwrap();

    let err = handle.await.unwrap().unwrap_err();
    assert!(matches!(err, RoadmapError::StaleRoadmap { id } if id == roadmap_id));

    let stored = navigator.view_roadmap(&Id { id: roadmap_id }).await.unwrap();
    assert_eq!(stored.roadmap.phases[0].tasks[1].title, "Learn Python");
    assert_eq!(stored.roadmap.phases[1].tasks[0].title, "Other");
}

#[tokio::test]
async fn test_skip_logs_and_regenerates() {
    let (_temp_dir, navigator, generator, sink) = create_test_navigator().await;
    let slot = navigator.save_roadmap(&save_params("Data")).await.unwrap();

    generator.push_task(Task::titled("Learn Pandas").with_id("t2"));
    let outcome = navigator
        .handle_task_action(&action(slot.id(), "t2", ActionType::Skip, None))
        .await
        .unwrap();

    assert!(outcome.logged());
    let regeneration = outcome.regeneration.expect("skip regenerates");
    assert_eq!(regeneration.new_task.title, "Learn Pandas");
    assert_eq!(regeneration.feedback_type, FeedbackType::Skip);

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action_type, ActionType::Skip);
    assert_eq!(events[0].task_identity, "t2");
    assert_eq!(events[0].roadmap_id, Some(slot.id()));
    assert_eq!(events[0].reward, -0.5);
}

#[tokio::test]
async fn test_skip_regenerates_even_when_logging_fails() {
    let (_temp_dir, navigator, generator, sink) = create_test_navigator().await;
    let slot = navigator.save_roadmap(&save_params("Data")).await.unwrap();

    sink.set_failure(Some("log service unreachable"));
    generator.push_task(Task::titled("Learn Pandas").with_id("t2"));

    let outcome = navigator
        .handle_task_action(&action(slot.id(), "t2", ActionType::Skip, None))
        .await
        .expect("log failure must not fail the action");

    assert_eq!(sink.attempts(), 1);
    assert!(!outcome.logged());
    assert_eq!(generator.regeneration_calls(), 1);
    assert!(outcome.regeneration.is_some());
}

#[tokio::test]
async fn test_skip_reports_generation_failure_after_logging() {
    let (_temp_dir, navigator, generator, sink) = create_test_navigator().await;
    let slot = navigator.save_roadmap(&save_params("Data")).await.unwrap();

    generator.set_failure(Some("no ideas"));
    let err = navigator
        .handle_task_action(&action(slot.id(), "t2", ActionType::Skip, None))
        .await
        .unwrap_err();

    assert!(matches!(err, RoadmapError::Generation { .. }));
    assert_eq!(sink.events().len(), 1);
}

#[tokio::test]
async fn test_complete_and_rate_do_not_touch_roadmap() {
    let (_temp_dir, navigator, generator, sink) = create_test_navigator().await;
    let slot = navigator.save_roadmap(&save_params("Data")).await.unwrap();

    let completed = navigator
        .handle_task_action(&action(slot.id(), "Learn SQL", ActionType::Complete, None))
        .await
        .unwrap();
    assert!(completed.regeneration.is_none());

    let rated = navigator
        .handle_task_action(&action(slot.id(), "t2", ActionType::RateDifficulty, Some(5)))
        .await
        .unwrap();
    assert!(rated.regeneration.is_none());

    assert_eq!(generator.regeneration_calls(), 0);
    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].difficulty_rating, None);
    assert_eq!(events[0].reward, 1.0);
    assert_eq!(events[1].difficulty_rating.map(|r| r.get()), Some(5));
    assert_eq!(events[1].reward, 1.0);

    let stored = navigator.view_roadmap(&Id { id: slot.id() }).await.unwrap();
    assert_eq!(stored.roadmap, slot.roadmap);
}

#[tokio::test]
async fn test_rate_without_rating_is_invalid() {
    let (_temp_dir, navigator, _generator, sink) = create_test_navigator().await;
    let slot = navigator.save_roadmap(&save_params("Data")).await.unwrap();

    let err = navigator
        .handle_task_action(&action(slot.id(), "t2", ActionType::RateDifficulty, None))
        .await
        .unwrap_err();
    assert!(matches!(err, RoadmapError::InvalidInput { ref field, .. } if field == "rating"));
    assert_eq!(sink.attempts(), 0);
}

#[tokio::test]
async fn test_action_on_unknown_task_is_still_logged() {
    let (_temp_dir, navigator, _generator, sink) = create_test_navigator().await;
    let slot = navigator.save_roadmap(&save_params("Data")).await.unwrap();

    let err = navigator
        .handle_task_action(&action(slot.id(), "ghost", ActionType::Complete, None))
        .await
        .unwrap_err();

    assert!(matches!(err, RoadmapError::TaskNotFound { .. }));
    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].task_identity, "ghost");
}

#[tokio::test]
async fn test_skip_with_position_hint_hits_duplicate() {
    let (_temp_dir, navigator, generator, _sink) = create_test_navigator().await;
    let slot = navigator.save_roadmap(&save_params("Data")).await.unwrap();
    assert_eq!(slot.roadmap.ambiguous_identities(), vec!["Learn SQL".to_string()]);

    generator.push_task(Task::titled("Advanced SQL"));
    let mut params = action(slot.id(), "Learn SQL", ActionType::Skip, None);
    params.pointer.phase_index = Some(1);
    params.pointer.task_index = Some(1);

    let outcome = navigator.handle_task_action(&params).await.unwrap();
    let roadmap = outcome.regeneration.unwrap().roadmap;
    assert_eq!(roadmap.phases[0].tasks[0].title, "Learn SQL");
    assert_eq!(roadmap.phases[1].tasks[1].title, "Advanced SQL");
}

#[tokio::test]
async fn test_viewed_roadmap_shows_duplicate_positions() {
    let (_temp_dir, navigator, _generator, _sink) = create_test_navigator().await;
    let slot = navigator.save_roadmap(&save_params("Data")).await.unwrap();

    let shown = navigator
        .view_roadmap(&Id { id: slot.id() })
        .await
        .unwrap()
        .roadmap
        .to_string();

    assert!(shown.contains("**Duplicate task identities**"));
    assert!(shown.contains(
        "- `Learn SQL`: phase_index 0 task_index 0; phase_index 1 task_index 1"
    ));
}

#[tokio::test]
async fn test_capacity_limit_and_delete_frees_slot() {
    let (_temp_dir, navigator, _generator, _sink) = create_test_navigator().await;

    let mut ids = Vec::new();
    for title in ["A", "B", "C"] {
        ids.push(navigator.save_roadmap(&save_params(title)).await.unwrap().id());
    }

    let err = navigator.save_roadmap(&save_params("D")).await.unwrap_err();
    assert!(matches!(err, RoadmapError::Capacity { limit } if limit == MAX_SAVED_ROADMAPS));
    assert_eq!(navigator.list_saved().await.unwrap().ids(), ids);

    let removed = navigator.delete_roadmap(&Id { id: ids[0] }).await.unwrap();
    assert_eq!(removed.map(|slot| slot.roadmap.title), Some("A".to_string()));

    let saved = navigator.save_roadmap(&save_params("D")).await.unwrap();
    assert_eq!(saved.position, 2);

    let list = navigator.list_saved().await.unwrap();
    let positions: Vec<u32> = list.iter().map(|slot| slot.position).collect();
    assert_eq!(positions, vec![0, 1, 2]);
    let titles: Vec<&str> = list.iter().map(|slot| slot.roadmap.title.as_str()).collect();
    assert_eq!(titles, vec!["B", "C", "D"]);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let (_temp_dir, navigator, _generator, _sink) = create_test_navigator().await;
    let slot = navigator.save_roadmap(&save_params("A")).await.unwrap();

    assert!(navigator.delete_roadmap(&Id { id: slot.id() }).await.unwrap().is_some());
    assert!(navigator.delete_roadmap(&Id { id: slot.id() }).await.unwrap().is_none());
    assert!(navigator.list_saved().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_reorder_swaps_exactly_two() {
    let (_temp_dir, navigator, _generator, _sink) = create_test_navigator().await;
    let a = navigator.save_roadmap(&save_params("A")).await.unwrap().id();
    let b = navigator.save_roadmap(&save_params("B")).await.unwrap().id();
    let c = navigator.save_roadmap(&save_params("C")).await.unwrap().id();

    let list = navigator
        .reorder_roadmaps(&ReorderRoadmaps {
            first_id: b,
            second_id: c,
        })
        .await
        .unwrap();
    assert_eq!(list.ids(), vec![a, c, b]);

    let err = navigator
        .reorder_roadmaps(&ReorderRoadmaps {
            first_id: a,
            second_id: 999,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RoadmapError::RoadmapNotFound { id: 999 }));
    assert_eq!(navigator.list_saved().await.unwrap().ids(), vec![a, c, b]);
}

#[tokio::test]
async fn test_move_roadmap_up_and_down() {
    let (_temp_dir, navigator, _generator, _sink) = create_test_navigator().await;
    let a = navigator.save_roadmap(&save_params("A")).await.unwrap().id();
    let b = navigator.save_roadmap(&save_params("B")).await.unwrap().id();

    let list = navigator
        .move_roadmap(&MoveRoadmap {
            id: b,
            direction: MoveDirection::Up,
        })
        .await
        .unwrap();
    assert_eq!(list.ids(), vec![b, a]);

    // Already first: nothing changes.
    let list = navigator
        .move_roadmap(&MoveRoadmap {
            id: b,
            direction: MoveDirection::Up,
        })
        .await
        .unwrap();
    assert_eq!(list.ids(), vec![b, a]);

    let list = navigator
        .move_roadmap(&MoveRoadmap {
            id: b,
            direction: MoveDirection::Down,
        })
        .await
        .unwrap();
    assert_eq!(list.ids(), vec![a, b]);
}

#[tokio::test]
async fn test_generate_roadmap_titles_and_validation() {
    let (_temp_dir, navigator, generator, _sink) = create_test_navigator().await;
    generator.set_roadmap(sample_data());

    let roadmap = navigator
        .generate_roadmap(&GenerateRoadmap {
            target_career: Some("Data Engineer".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(roadmap.is_ephemeral());
    assert_eq!(roadmap.title, "Data Engineer");
    assert_eq!(roadmap.roadmap_type, RoadmapType::Career);
    assert_eq!(roadmap.target_career.as_deref(), Some("Data Engineer"));

    let roadmap = navigator
        .generate_roadmap(&GenerateRoadmap {
            job_id: Some(12),
            title: Some("My job plan".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(roadmap.title, "My job plan");
    assert_eq!(roadmap.job_id, Some(12));
    assert_eq!(roadmap.roadmap_type, RoadmapType::Job);

    let saved = navigator.save_generated(&roadmap).await.unwrap();
    assert_eq!(saved.roadmap.job_id, Some(12));
    assert_eq!(saved.roadmap.created_at, roadmap.created_at);

    generator.set_roadmap(RoadmapData::default());
    let err = navigator
        .generate_roadmap(&GenerateRoadmap {
            job_id: Some(12),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RoadmapError::Generation { .. }));
}

#[tokio::test]
async fn test_unconfigured_generator_is_generation_error() {
    let temp_dir = TempDir::new().unwrap();
    let navigator = NavigatorBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .build()
        .await
        .unwrap();

    let err = navigator
        .generate_roadmap(&GenerateRoadmap {
            target_career: Some("Data Engineer".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RoadmapError::Generation { .. }));
}

#[tokio::test]
async fn test_default_sink_persists_history() {
    let temp_dir = TempDir::new().unwrap();
    let navigator = NavigatorBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .build()
        .await
        .unwrap();
    let slot = navigator.save_roadmap(&save_params("A")).await.unwrap();

    navigator
        .handle_task_action(&action(slot.id(), "t2", ActionType::Start, None))
        .await
        .unwrap();
    navigator
        .handle_task_action(&action(slot.id(), "t2", ActionType::Complete, None))
        .await
        .unwrap();

    let history = navigator
        .list_interactions(&ListInteractions {
            roadmap_id: Some(slot.id()),
        })
        .await
        .unwrap();
    let actions: Vec<ActionType> = history.iter().map(|event| event.action_type).collect();
    assert_eq!(actions, vec![ActionType::Start, ActionType::Complete]);
}

#[tokio::test]
async fn test_users_have_separate_collections() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let first = NavigatorBuilder::new()
        .with_database_path(Some(&db_path))
        .with_user_id(1)
        .build()
        .await
        .unwrap();
    let second = NavigatorBuilder::new()
        .with_database_path(Some(&db_path))
        .with_user_id(2)
        .build()
        .await
        .unwrap();

    for title in ["A", "B", "C"] {
        first.save_roadmap(&save_params(title)).await.unwrap();
    }
    let slot = second.save_roadmap(&save_params("Mine")).await.unwrap();

    assert_eq!(slot.position, 0);
    assert!(matches!(
        second.view_roadmap(&Id { id: first.list_saved().await.unwrap()[0].id() }).await,
        Err(RoadmapError::RoadmapNotFound { .. })
    ));
}

#[tokio::test]
async fn test_zero_timeout_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let result = NavigatorBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_generation_timeout(Duration::ZERO)
        .build()
        .await;
    assert!(matches!(result, Err(RoadmapError::Configuration { .. })));
}
