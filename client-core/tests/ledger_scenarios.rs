//! End-to-end scenarios through the wired client core.
//!
//! These exercise whole user sessions over the real local repositories and
//! one shared store: earn Kaiblooms by completing tasks, spend them in the
//! collectible shop, reflect, and wipe everything.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use client_core::ClientCore;
use client_core::domain::{
    ErrorCode, STARTING_KAIBLOOMS, Sentiment, StepDraft, StepStatus, TASK_COMPLETION_AWARD,
    TaskDraft, TaskUpdate, UserId,
};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn core() -> ClientCore {
    ClientCore::local(Arc::new(FixtureClock {
        utc_now: Utc
            .with_ymd_and_hms(2026, 8, 30, 9, 0, 0)
            .single()
            .expect("valid fixture timestamp"),
    }))
}

fn student() -> UserId {
    UserId::try_new(1).expect("positive id")
}

fn essay_draft() -> TaskDraft {
    TaskDraft::try_new(
        "Write history essay",
        60,
        vec![
            StepDraft::try_new("Outline the argument", None).expect("valid step"),
            StepDraft::try_new("Write the first draft", Some("Laptop".to_owned()))
                .expect("valid step"),
            StepDraft::try_new("Proofread", None).expect("valid step"),
        ],
    )
    .expect("valid draft")
}

const GOLDEN_LEAF: i64 = 1;
const GOLDEN_LEAF_COST: u32 = 50;
const MOONSTONE: i64 = 5;
const MOONSTONE_COST: u32 = 200;

#[tokio::test]
async fn essay_session_earns_spends_and_reflects() {
    let core = core();
    let user = student();

    let balance = core.progress().balance(user).await.expect("balance");
    assert_eq!(balance.kaiblooms_points, STARTING_KAIBLOOMS);

    let task = core
        .tasks()
        .create_task(user, essay_draft())
        .await
        .expect("create");

    // Tick the first two steps off before completing.
    core.tasks()
        .update_task(
            user,
            TaskUpdate {
                task_id: task.id,
                completed: None,
                steps: Some(vec![
                    StepStatus {
                        id: task.steps[0].id,
                        completed: true,
                    },
                    StepStatus {
                        id: task.steps[1].id,
                        completed: true,
                    },
                ]),
            },
        )
        .await
        .expect("update");

    let completed = core
        .tasks()
        .complete_task(user, task.id)
        .await
        .expect("complete");
    assert_eq!(completed.kaiblooms_awarded, TASK_COMPLETION_AWARD);
    assert!(completed.task.steps[0].completed);
    assert!(completed.task.steps[1].completed);
    assert!(!completed.task.steps[2].completed);

    assert!(core.tasks().list_tasks(user).await.expect("list").is_empty());
    let balance = core.progress().balance(user).await.expect("balance");
    assert_eq!(
        balance.kaiblooms_points,
        STARTING_KAIBLOOMS + TASK_COMPLETION_AWARD
    );

    let outcome = core
        .collectibles()
        .purchase(user, GOLDEN_LEAF)
        .await
        .expect("purchase");
    assert_eq!(
        outcome.new_balance,
        STARTING_KAIBLOOMS + TASK_COMPLETION_AWARD - GOLDEN_LEAF_COST
    );

    let reflection = core
        .reflections()
        .append_reflection(
            user,
            client_core::domain::ReflectionDraft::try_new(task.id, 4, "Stayed focused throughout")
                .expect("valid draft"),
        )
        .await
        .expect("reflect");
    assert_eq!(reflection.sentiment, Sentiment::Positive);
    // The task is already gone, so the entry carries the placeholder title.
    assert_eq!(reflection.task_title, format!("Task {}", task.id));
}

#[tokio::test]
async fn award_sum_accounting_holds_over_many_completions() {
    let core = core();
    let user = student();
    let completions = 4_u32;

    for _ in 0..completions {
        let task = core
            .tasks()
            .create_task(user, essay_draft())
            .await
            .expect("create");
        core.tasks()
            .complete_task(user, task.id)
            .await
            .expect("complete");
    }

    let balance = core.progress().balance(user).await.expect("balance");
    assert_eq!(
        balance.kaiblooms_points,
        STARTING_KAIBLOOMS + completions * TASK_COMPLETION_AWARD
    );
}

#[tokio::test]
async fn double_purchase_aggregates_into_one_row() {
    let core = core();
    let user = student();

    core.collectibles()
        .purchase(user, GOLDEN_LEAF)
        .await
        .expect("first purchase");
    let outcome = core
        .collectibles()
        .purchase(user, GOLDEN_LEAF)
        .await
        .expect("second purchase");

    assert_eq!(
        outcome.new_balance,
        STARTING_KAIBLOOMS - 2 * GOLDEN_LEAF_COST
    );
    let collection = core.collectibles().collection(user).await.expect("collection");
    assert_eq!(collection.len(), 1);
    assert_eq!(collection[0].quantity, 2);
}

#[tokio::test]
async fn insufficient_balance_purchase_leaves_everything_untouched() {
    let core = core();
    let user = student();

    // 500 covers two Moonstones, not three.
    for _ in 0..2 {
        core.collectibles()
            .purchase(user, MOONSTONE)
            .await
            .expect("affordable purchase");
    }

    let err = core
        .collectibles()
        .purchase(user, MOONSTONE)
        .await
        .expect_err("cannot afford a third");
    assert_eq!(err.code(), ErrorCode::InsufficientBalance);

    let collection = core.collectibles().collection(user).await.expect("collection");
    assert_eq!(collection.len(), 1);
    assert_eq!(collection[0].quantity, 2);
    let balance = core.progress().balance(user).await.expect("balance");
    assert_eq!(
        balance.kaiblooms_points,
        STARTING_KAIBLOOMS - 2 * MOONSTONE_COST
    );
}

#[tokio::test]
async fn completing_a_task_twice_reports_not_found() {
    let core = core();
    let user = student();

    let task = core
        .tasks()
        .create_task(user, essay_draft())
        .await
        .expect("create");
    core.tasks()
        .complete_task(user, task.id)
        .await
        .expect("first completion");

    let err = core
        .tasks()
        .complete_task(user, task.id)
        .await
        .expect_err("already removed");
    assert_eq!(err.code(), ErrorCode::NotFound);

    // The award from the failed attempt must not have landed.
    let balance = core.progress().balance(user).await.expect("balance");
    assert_eq!(
        balance.kaiblooms_points,
        STARTING_KAIBLOOMS + TASK_COMPLETION_AWARD
    );
}

#[tokio::test]
async fn users_never_see_each_other_in_any_repository() {
    let core = core();
    let first = student();
    let second = UserId::try_new(2).expect("positive id");

    let task = core
        .tasks()
        .create_task(first, essay_draft())
        .await
        .expect("create");
    core.tasks()
        .complete_task(first, task.id)
        .await
        .expect("complete");
    core.collectibles()
        .purchase(first, GOLDEN_LEAF)
        .await
        .expect("purchase");

    assert!(core.tasks().list_tasks(second).await.expect("list").is_empty());
    assert!(
        core.collectibles()
            .collection(second)
            .await
            .expect("collection")
            .is_empty()
    );
    let balance = core.progress().balance(second).await.expect("balance");
    assert_eq!(balance.kaiblooms_points, STARTING_KAIBLOOMS);
}

#[tokio::test]
async fn clear_data_resets_a_user_to_first_run_state() {
    let core = core();
    let user = student();

    let task = core
        .tasks()
        .create_task(user, essay_draft())
        .await
        .expect("create");
    core.tasks()
        .complete_task(user, task.id)
        .await
        .expect("complete");
    core.collectibles()
        .purchase(user, GOLDEN_LEAF)
        .await
        .expect("purchase");
    core.reflections()
        .append_reflection(
            user,
            client_core::domain::ReflectionDraft::try_new(task.id, 5, "Great session")
                .expect("valid draft"),
        )
        .await
        .expect("reflect");

    core.settings().clear_data(user).await.expect("clear");

    assert!(core.tasks().list_tasks(user).await.expect("list").is_empty());
    assert!(
        core.collectibles()
            .collection(user)
            .await
            .expect("collection")
            .is_empty()
    );
    assert!(
        core.reflections()
            .list_reflections(user)
            .await
            .expect("list")
            .is_empty()
    );
    let balance = core.progress().balance(user).await.expect("balance");
    assert_eq!(balance.kaiblooms_points, STARTING_KAIBLOOMS);
}
