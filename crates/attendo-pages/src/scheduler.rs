//! Deferred tasks
//!
//! The page runtime only ever suspends on timers. [`Scheduler`] abstracts
//! them so the same banner logic runs against a virtual clock
//! ([`ManualScheduler`]) or a tokio runtime ([`TokioScheduler`]).

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::AbortHandle;

/// Work to run once a delay has elapsed
pub type Task = Box<dyn FnOnce() + 'static>;

/// Identifies a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

/// Source of cancellable deferred tasks
pub trait Scheduler {
	/// Runs `task` once `delay` has elapsed
	fn schedule(&self, delay: Duration, task: Task) -> TaskHandle;

	/// Cancels a pending task. Returns `false` if it already ran or was
	/// cancelled before.
	fn cancel(&self, handle: TaskHandle) -> bool;

	/// Number of tasks that have neither run nor been cancelled
	fn pending(&self) -> usize;
}

#[derive(Default)]
struct ManualState {
	now: Duration,
	next_id: u64,
	// Ordered by due time, then by scheduling order
	queue: BTreeMap<(Duration, u64), Task>,
	due: HashMap<u64, Duration>,
}

/// Scheduler driven by an explicit virtual clock
///
/// # Examples
///
/// ```
/// use attendo_pages::scheduler::{ManualScheduler, Scheduler};
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::time::Duration;
///
/// let scheduler = ManualScheduler::new();
/// let fired = Rc::new(Cell::new(false));
/// let flag = fired.clone();
/// scheduler.schedule(Duration::from_secs(5), Box::new(move || flag.set(true)));
///
/// scheduler.advance(Duration::from_secs(4));
/// assert!(!fired.get());
/// scheduler.advance(Duration::from_secs(1));
/// assert!(fired.get());
/// ```
#[derive(Clone, Default)]
pub struct ManualScheduler {
	state: Rc<RefCell<ManualState>>,
}

impl fmt::Debug for ManualScheduler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.state.borrow();
		f.debug_struct("ManualScheduler")
			.field("now", &state.now)
			.field("pending", &state.queue.len())
			.finish()
	}
}

impl ManualScheduler {
	pub fn new() -> Self {
		Self::default()
	}

	/// Time elapsed on the virtual clock
	pub fn now(&self) -> Duration {
		self.state.borrow().now
	}

	/// Moves the clock forward, running every task that falls due.
	///
	/// Tasks run in due order, with the clock set to their due time, and
	/// may schedule or cancel other tasks.
	pub fn advance(&self, by: Duration) {
		let target = self.state.borrow().now + by;
		loop {
			let next = {
				let mut state = self.state.borrow_mut();
				let first = state
					.queue
					.first_key_value()
					.map(|(key, _)| *key)
					.filter(|(due, _)| *due <= target);
				match first {
					Some((due, id)) => {
						state.now = due;
						state.due.remove(&id);
						state.queue.remove(&(due, id))
					}
					None => None,
				}
			};
			match next {
				Some(task) => task(),
				None => break,
			}
		}
		self.state.borrow_mut().now = target;
	}
}

impl Scheduler for ManualScheduler {
	fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
		let mut state = self.state.borrow_mut();
		let id = state.next_id;
		state.next_id += 1;
		let due = state.now + delay;
		state.queue.insert((due, id), task);
		state.due.insert(id, due);
		TaskHandle(id)
	}

	fn cancel(&self, handle: TaskHandle) -> bool {
		let mut state = self.state.borrow_mut();
		match state.due.remove(&handle.0) {
			Some(due) => state.queue.remove(&(due, handle.0)).is_some(),
			None => false,
		}
	}

	fn pending(&self) -> usize {
		self.state.borrow().queue.len()
	}
}

/// Scheduler backed by `tokio::time`
///
/// Tasks are spawned with [`tokio::task::spawn_local`], so the scheduler
/// must be used from within a [`tokio::task::LocalSet`].
#[derive(Clone, Default)]
pub struct TokioScheduler {
	next_id: Rc<Cell<u64>>,
	tasks: Rc<RefCell<HashMap<u64, AbortHandle>>>,
}

impl fmt::Debug for TokioScheduler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TokioScheduler")
			.field("pending", &self.tasks.borrow().len())
			.finish()
	}
}

impl TokioScheduler {
	pub fn new() -> Self {
		Self::default()
	}
}

impl Scheduler for TokioScheduler {
	fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
		let id = self.next_id.get();
		self.next_id.set(id + 1);

		let tasks = Rc::clone(&self.tasks);
		let handle = tokio::task::spawn_local(async move {
			tokio::time::sleep(delay).await;
			tasks.borrow_mut().remove(&id);
			task();
		});
		self.tasks.borrow_mut().insert(id, handle.abort_handle());
		TaskHandle(id)
	}

	fn cancel(&self, handle: TaskHandle) -> bool {
		match self.tasks.borrow_mut().remove(&handle.0) {
			Some(abort) => {
				abort.abort();
				true
			}
			None => false,
		}
	}

	fn pending(&self) -> usize {
		self.tasks.borrow().len()
	}
}
