use crate::animation::AnimationId;
use crate::{Result, SimilarityError};
use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;
use core::mem;
use core::panic::AssertUnwindSafe;
use core::sync::atomic::{AtomicU64, Ordering};
use parking_lot::{Condvar, Mutex};

/// The stages of a similarity computation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Voxelization of every animation.
    Descriptors,
    /// Computation of the pairwise distance matrix.
    Distances,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Descriptors => f.pad("descriptor computation"),
            Stage::Distances => f.pad("distance computation"),
        }
    }
}

/// The failure of the task handling one animation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskFailure {
    /// The animation handled by the failed task.
    pub id: AnimationId,
    /// A human-readable description of the failure.
    pub reason: String,
}

/// Identifies the collection of animations a stage ran on.
///
/// Every engine draws a fresh identifier when it is built; its clones share it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct CollectionId(u64);

impl CollectionId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// The outcome of a stage: its output, complete or partial, and its failed tasks.
#[derive(Debug)]
pub struct StageReport<T> {
    stage: Stage,
    pub(crate) collection: CollectionId,
    output: Arc<T>,
    failures: Vec<TaskFailure>,
}

impl<T> Clone for StageReport<T> {
    fn clone(&self) -> Self {
        Self {
            stage: self.stage,
            collection: self.collection,
            output: self.output.clone(),
            failures: self.failures.clone(),
        }
    }
}

impl<T> StageReport<T> {
    pub(crate) fn new(
        stage: Stage,
        collection: CollectionId,
        output: T,
        mut failures: Vec<TaskFailure>,
    ) -> Self {
        failures.sort_by_key(|failure| failure.id);

        if !failures.is_empty() {
            log::warn!(
                "{} failed for {} animations: {:?}",
                stage,
                failures.len(),
                failures
            );
        }

        Self {
            stage,
            collection,
            output: Arc::new(output),
            failures,
        }
    }

    /// The stage this report is about.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The output of the stage.
    ///
    /// If some tasks failed, this contains whatever the successful tasks
    /// produced.
    pub fn output(&self) -> &Arc<T> {
        &self.output
    }

    /// The failed tasks, sorted by animation identifier.
    pub fn failures(&self) -> &[TaskFailure] {
        &self.failures
    }

    /// The identifiers of the animations whose task failed, in increasing order.
    pub fn failed_ids(&self) -> Vec<AnimationId> {
        self.failures.iter().map(|failure| failure.id).collect()
    }

    /// Did every task of the stage succeed?
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// The output of the stage if every task succeeded.
    ///
    /// Fails with [`SimilarityError::StageFailed`] otherwise.
    pub fn result(&self) -> Result<Arc<T>> {
        if self.is_success() {
            Ok(self.output.clone())
        } else {
            Err(SimilarityError::StageFailed {
                stage: self.stage,
                failed: self.failed_ids(),
            })
        }
    }
}

/// Runs one task, turning both its errors and its panics into a failure reason.
pub(crate) fn catch_task<T>(task: impl FnOnce() -> Result<T>) -> core::result::Result<T, String> {
    match std::panic::catch_unwind(AssertUnwindSafe(task)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(err.to_string()),
        Err(payload) => Err(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", msg)
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("panicked: {}", msg)
    } else {
        String::from("panicked")
    }
}

type Continuation<T> = Box<dyn FnOnce(Arc<T>) + Send>;

enum State<T> {
    Pending(Vec<Continuation<T>>),
    Done(Arc<T>),
}

struct Shared<T> {
    state: Mutex<State<T>>,
    done: Condvar,
}

/// An asynchronous handle to the value computed by a pipeline stage.
///
/// The stage runs on the rayon thread pool. The handle can be polled with
/// [`Self::is_finished`] and [`Self::try_result`], blocked on with
/// [`Self::wait`], or given continuations with [`Self::on_complete`],
/// [`Self::map`] and [`Self::then`]. Handles are cheap to clone; all the
/// clones observe the same value.
pub struct StageHandle<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for StageHandle<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T> fmt::Debug for StageHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageHandle")
            .field(
                "finished",
                &matches!(*self.shared.state.lock(), State::Done(_)),
            )
            .finish()
    }
}

/// The sending side of a [`StageHandle`].
pub(crate) struct Completer<T> {
    shared: Arc<Shared<T>>,
}

impl<T: Send + Sync + 'static> Completer<T> {
    pub(crate) fn complete(self, value: T) {
        self.complete_shared(Arc::new(value))
    }

    fn complete_shared(self, value: Arc<T>) {
        let continuations = {
            let mut state = self.shared.state.lock();
            match mem::replace(&mut *state, State::Done(value.clone())) {
                State::Pending(continuations) => continuations,
                State::Done(_) => Vec::new(),
            }
        };
        let _ = self.shared.done.notify_all();

        for continuation in continuations {
            continuation(value.clone());
        }
    }
}

impl<T: Send + Sync + 'static> StageHandle<T> {
    /// A handle that is not finished yet, and the means of finishing it.
    pub(crate) fn pending() -> (Self, Completer<T>) {
        let shared = Arc::new(Shared {
            state: Mutex::new(State::Pending(Vec::new())),
            done: Condvar::new(),
        });
        let completer = Completer {
            shared: shared.clone(),
        };
        (Self { shared }, completer)
    }

    /// A handle that is already finished with the given value.
    pub fn completed(value: T) -> Self {
        let (handle, completer) = Self::pending();
        completer.complete(value);
        handle
    }

    /// Runs `job` on the rayon thread pool and returns a handle to its result.
    pub(crate) fn spawn(job: impl FnOnce() -> T + Send + 'static) -> Self {
        let (handle, completer) = Self::pending();
        rayon::spawn(move || completer.complete(job()));
        handle
    }

    /// Has the stage finished?
    pub fn is_finished(&self) -> bool {
        matches!(*self.shared.state.lock(), State::Done(_))
    }

    /// The value computed by the stage, or `None` if it is still running.
    pub fn try_result(&self) -> Option<Arc<T>> {
        match &*self.shared.state.lock() {
            State::Done(value) => Some(value.clone()),
            State::Pending(_) => None,
        }
    }

    /// Blocks the current thread until the stage finishes, and returns its value.
    ///
    /// This must not be called from a rayon worker thread of the pool the stage
    /// runs on.
    pub fn wait(&self) -> Arc<T> {
        let mut state = self.shared.state.lock();
        loop {
            if let State::Done(value) = &*state {
                return value.clone();
            }
            self.shared.done.wait(&mut state);
        }
    }

    /// Registers a function to call with the value of the stage once it finishes.
    ///
    /// If the stage already finished, `continuation` is called immediately on
    /// the current thread. Otherwise it is called on the thread that finishes
    /// the stage, after every value written by the stage became visible.
    pub fn on_complete(&self, continuation: impl FnOnce(Arc<T>) + Send + 'static) {
        let value = {
            let mut state = self.shared.state.lock();
            match &mut *state {
                State::Pending(continuations) => {
                    continuations.push(Box::new(continuation));
                    return;
                }
                State::Done(value) => value.clone(),
            }
        };

        continuation(value)
    }

    /// A handle to the result of applying `f` to the value of this stage.
    pub fn map<U: Send + Sync + 'static>(
        &self,
        f: impl FnOnce(Arc<T>) -> U + Send + 'static,
    ) -> StageHandle<U> {
        let (next, completer) = StageHandle::pending();
        self.on_complete(move |value| completer.complete(f(value)));
        next
    }

    /// Starts the stage returned by `f` once this stage finishes.
    ///
    /// This is the sequencing barrier between stages: `f` only runs once the
    /// value of this stage is complete, and the returned handle finishes
    /// with the value of the stage started by `f`.
    pub fn then<U: Send + Sync + 'static>(
        &self,
        f: impl FnOnce(Arc<T>) -> StageHandle<U> + Send + 'static,
    ) -> StageHandle<U> {
        let (next, completer) = StageHandle::pending();
        self.on_complete(move |value| {
            f(value).on_complete(move |next_value| completer.complete_shared(next_value))
        });
        next
    }
}
