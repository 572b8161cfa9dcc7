//! Scriptable in-memory generator.

use std::{collections::VecDeque, sync::Arc, time::Duration};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{
    ContentGenerator, GenerationTarget, GeneratorError, RegeneratedTask, TaskRegenerationRequest,
};
use crate::models::{RoadmapData, Task};

/// Recorded generator call
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorCall {
    GenerateRoadmap(GenerationTarget),
    RegenerateTask(TaskRegenerationRequest),
}

#[derive(Debug, Default)]
struct FakeState {
    roadmap: Option<RoadmapData>,
    tasks: VecDeque<Task>,
    failure: Option<String>,
    delay: Option<Duration>,
    calls: Vec<GeneratorCall>,
    in_flight: usize,
    max_in_flight: usize,
}

/// Fake generator for testing.
///
/// Clones share state, so a test can keep one handle while the navigator
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct FakeGenerator {
    inner: Arc<Mutex<FakeState>>,
}

/// Decrements the in-flight count even when the call future is dropped.
struct InFlight(Arc<Mutex<FakeState>>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.lock().in_flight -= 1;
    }
}

impl FakeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the content returned by every `generate_roadmap` call.
    pub fn set_roadmap(&self, data: RoadmapData) {
        self.inner.lock().roadmap = Some(data);
    }

    /// Queues a task for the next `regenerate_task` call.
    pub fn push_task(&self, task: Task) {
        self.inner.lock().tasks.push_back(task);
    }

    /// Makes every call fail with `message` until cleared.
    pub fn set_failure(&self, message: Option<&str>) {
        self.inner.lock().failure = message.map(String::from);
    }

    /// Makes every call sleep before answering.
    pub fn set_delay(&self, delay: Option<Duration>) {
        self.inner.lock().delay = delay;
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<GeneratorCall> {
        self.inner.lock().calls.clone()
    }

    /// Number of `regenerate_task` calls received.
    pub fn regeneration_calls(&self) -> usize {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|call| matches!(call, GeneratorCall::RegenerateTask(_)))
            .count()
    }

    /// Highest number of calls that were outstanding at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.inner.lock().max_in_flight
    }

    fn enter(&self, call: GeneratorCall) -> (InFlight, Option<Duration>) {
        let mut state = self.inner.lock();
        state.calls.push(call);
        state.in_flight += 1;
        state.max_in_flight = state.max_in_flight.max(state.in_flight);
        (InFlight(Arc::clone(&self.inner)), state.delay)
    }

    async fn pause(delay: Option<Duration>) {
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn failure(&self) -> Option<GeneratorError> {
        self.inner
            .lock()
            .failure
            .clone()
            .map(GeneratorError::Rejected)
    }
}

#[async_trait]
impl ContentGenerator for FakeGenerator {
    async fn generate_roadmap(
        &self,
        target: &GenerationTarget,
    ) -> Result<RoadmapData, GeneratorError> {
        let (_in_flight, delay) = self.enter(GeneratorCall::GenerateRoadmap(target.clone()));
        Self::pause(delay).await;

        if let Some(error) = self.failure() {
            return Err(error);
        }
        self.inner
            .lock()
            .roadmap
            .clone()
            .ok_or_else(|| GeneratorError::Rejected("no scripted roadmap".to_string()))
    }

    async fn regenerate_task(
        &self,
        request: &TaskRegenerationRequest,
    ) -> Result<RegeneratedTask, GeneratorError> {
        let (_in_flight, delay) = self.enter(GeneratorCall::RegenerateTask(request.clone()));
        Self::pause(delay).await;

        if let Some(error) = self.failure() {
            return Err(error);
        }
        self.inner
            .lock()
            .tasks
            .pop_front()
            .map(|new_task| RegeneratedTask { new_task })
            .ok_or_else(|| GeneratorError::Rejected("no scripted task".to_string()))
    }
}
