//! Shared world state for task lifecycle BDD scenarios.

use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use majordomo::concierge::{
    adapters::{StaticVendorDirectory, TracingEmailOutbox},
    services::ConciergeStub,
};
use majordomo::task::{
    adapters::memory::InMemoryTaskStore,
    domain::Task,
    ports::{
        AgentInvocationError, AgentReply, AgentResult, AgentRuntime, HandoffMessage,
        HandoffQueue, HandoffResult,
    },
    services::{
        CreateTaskReceipt, IntakeError, IntakeService, ProcessOutcome, ProcessingError,
        ProcessingService,
    },
};

/// Store type used by the BDD world.
pub type TestStore = InMemoryTaskStore<DefaultClock>;

/// Hand-off queue that accepts and drops messages; the worker is driven
/// explicitly by scenario steps.
#[derive(Debug, Clone, Default)]
pub struct DroppingHandoffQueue;

#[async_trait]
impl HandoffQueue for DroppingHandoffQueue {
    async fn publish(&self, _message: HandoffMessage) -> HandoffResult<()> {
        Ok(())
    }
}

/// Agent runtime whose availability scenarios can toggle.
pub struct ToggleAgent {
    down: Arc<AtomicBool>,
    inner: ConciergeStub<StaticVendorDirectory, TracingEmailOutbox, DefaultClock>,
}

#[async_trait]
impl AgentRuntime for ToggleAgent {
    async fn invoke(&self, prompt: &str) -> AgentResult<AgentReply> {
        if self.down.load(Ordering::SeqCst) {
            return Err(AgentInvocationError::RuntimeStatus(503));
        }
        self.inner.invoke(prompt).await
    }
}

/// Scenario world for task lifecycle behaviour tests.
pub struct TaskLifecycleWorld {
    pub store: Arc<TestStore>,
    pub intake: IntakeService<TestStore, DroppingHandoffQueue, DefaultClock>,
    pub processing: ProcessingService<TestStore, ToggleAgent, DefaultClock>,
    pub agent_down: Arc<AtomicBool>,
    pub description: Option<String>,
    pub last_receipt: Option<CreateTaskReceipt>,
    pub last_create_error: Option<IntakeError>,
    pub last_process_result: Option<Result<ProcessOutcome, ProcessingError>>,
}

impl TaskLifecycleWorld {
    /// Creates a world with empty pending scenario state.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryTaskStore::new(Arc::new(DefaultClock)));
        let intake = IntakeService::new(
            Arc::clone(&store),
            Arc::new(DroppingHandoffQueue),
            Arc::new(DefaultClock),
        );
        let agent_down = Arc::new(AtomicBool::new(false));
        let agent = ToggleAgent {
            down: Arc::clone(&agent_down),
            inner: ConciergeStub::new(
                Arc::new(StaticVendorDirectory::with_demo_listings()),
                Arc::new(TracingEmailOutbox::new()),
                Arc::new(DefaultClock),
            ),
        };
        let processing =
            ProcessingService::new(Arc::clone(&store), Arc::new(agent), Arc::new(DefaultClock));

        Self {
            store,
            intake,
            processing,
            agent_down,
            description: None,
            last_receipt: None,
            last_create_error: None,
            last_process_result: None,
        }
    }

    /// Submits the pending description through intake.
    pub fn submit(&mut self) -> Result<(), eyre::Report> {
        let description = self
            .description
            .clone()
            .ok_or_else(|| eyre::eyre!("missing request description in scenario world"))?;
        match run_async(self.intake.create_task(&description)) {
            Ok(receipt) => self.last_receipt = Some(receipt),
            Err(err) => self.last_create_error = Some(err),
        }
        Ok(())
    }

    /// Fetches the task referenced by the last receipt.
    pub fn current_task(&self) -> Result<Task, eyre::Report> {
        let receipt = self
            .last_receipt
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing creation receipt in scenario world"))?;
        run_async(self.intake.get_task(receipt.id))
            .map_err(|err| eyre::eyre!("task lookup failed: {err}"))
    }
}

impl Default for TaskLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskLifecycleWorld {
    TaskLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
