//! Service orchestration tests for task intake.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

use super::support::{
    FailingHandoffQueue, RecordingHandoffQueue, minute_mark, persisted_task,
};
use crate::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{EventCategory, TaskDomainError, TaskId, TaskStatus},
    ports::TaskStore,
    services::{IntakeError, IntakeService},
};

type TestStore = InMemoryTaskStore<DefaultClock>;
type TestService = IntakeService<TestStore, RecordingHandoffQueue, DefaultClock>;

#[fixture]
fn store() -> Arc<TestStore> {
    Arc::new(InMemoryTaskStore::new(Arc::new(DefaultClock)))
}

#[fixture]
fn queue() -> Arc<RecordingHandoffQueue> {
    Arc::new(RecordingHandoffQueue::new())
}

fn service_over(store: &Arc<TestStore>, queue: &Arc<RecordingHandoffQueue>) -> TestService {
    IntakeService::new(Arc::clone(store), Arc::clone(queue), Arc::new(DefaultClock))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_task_persists_pending_task_and_publishes_handoff(
    store: Arc<TestStore>,
    queue: Arc<RecordingHandoffQueue>,
) {
    let service = service_over(&store, &queue);

    let receipt = service
        .create_task("Find me a landscaper in Charlotte under $300")
        .await
        .expect("creation should succeed");

    assert_eq!(receipt.status, TaskStatus::Pending);
    let task = store
        .get(receipt.id)
        .await
        .expect("lookup should succeed")
        .expect("task should be persisted");
    assert_eq!(task.status(), TaskStatus::Pending);
    assert_eq!(task.events().len(), 2);
    let seed = task.events().first().expect("seed event");
    assert_eq!(seed.message, "Task created");
    let queued = task.events().get(1).expect("queue event");
    assert_eq!(queued.category, EventCategory::Info);

    let published = queue.published();
    assert_eq!(published.len(), 1);
    let message = published.first().expect("one message");
    assert_eq!(message.task_id, receipt.id);
    assert_eq!(
        message.description,
        "Find me a landscaper in Charlotte under $300"
    );
}

#[rstest]
#[case("")]
#[case("   ")]
#[tokio::test(flavor = "multi_thread")]
async fn create_task_rejects_blank_description_without_persisting(
    store: Arc<TestStore>,
    queue: Arc<RecordingHandoffQueue>,
    #[case] description: &str,
) {
    let service = service_over(&store, &queue);

    let result = service.create_task(description).await;

    assert!(matches!(
        result,
        Err(IntakeError::Domain(TaskDomainError::EmptyDescription))
    ));
    let page = store.list(10, None).await.expect("list should succeed");
    assert!(page.tasks.is_empty());
    assert!(queue.published().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_task_parks_task_in_error_when_handoff_fails(store: Arc<TestStore>) {
    let service = IntakeService::new(
        Arc::clone(&store),
        Arc::new(FailingHandoffQueue),
        Arc::new(DefaultClock),
    );

    let receipt = service
        .create_task("Deep clean my kitchen in Charlotte")
        .await
        .expect("creation still succeeds");

    assert_eq!(receipt.status, TaskStatus::Error);
    let task = store
        .get(receipt.id)
        .await
        .expect("lookup should succeed")
        .expect("task should be persisted");
    assert_eq!(task.status(), TaskStatus::Error);
    let reason = task.error_message().expect("error message recorded");
    assert!(reason.contains("queueing"));
    let last = task.events().last().expect("hand-off event");
    assert_eq!(last.category, EventCategory::Error);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_tasks_orders_newest_first(
    store: Arc<TestStore>,
    queue: Arc<RecordingHandoffQueue>,
) {
    let service = service_over(&store, &queue);
    let oldest = persisted_task("first", minute_mark(0));
    let middle = persisted_task("second", minute_mark(5));
    let newest = persisted_task("third", minute_mark(10));
    for task in [&middle, &oldest, &newest] {
        store.put(task).await.expect("put should succeed");
    }

    let listed = service.list_tasks().await.expect("list should succeed");

    let descriptions: Vec<&str> = listed.iter().map(|task| task.description()).collect();
    assert_eq!(descriptions, vec!["third", "second", "first"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_task_unknown_id_is_not_found(
    store: Arc<TestStore>,
    queue: Arc<RecordingHandoffQueue>,
) {
    let service = service_over(&store, &queue);
    let missing = TaskId::new();

    let result = service.get_task(missing).await;

    assert!(matches!(result, Err(IntakeError::TaskNotFound(id)) if id == missing));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_task_is_idempotent_between_mutations(
    store: Arc<TestStore>,
    queue: Arc<RecordingHandoffQueue>,
) {
    let service = service_over(&store, &queue);
    let task = persisted_task("inspect the roof", minute_mark(0));
    store.put(&task).await.expect("put should succeed");

    let first = service.get_task(task.id()).await.expect("first read");
    let second = service.get_task(task.id()).await.expect("second read");

    assert_eq!(first, second);
}
