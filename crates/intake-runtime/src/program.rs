#![forbid(unsafe_code)]

//! Elm-style model/command loop, headless.
//!
//! The program runtime manages the update loop for one row. It separates
//! state (Model) from side effects (Cmd): `update` is a pure-ish state
//! transition returning commands, and the runtime executes those commands:
//! immediate messages, worker-thread tasks for blocking collaborator
//! calls, and the per-row debounce slot.
//!
//! There is no view step and no render loop; the embedding context drives
//! the program by dispatching messages and draining whatever state it
//! needs from the model afterwards.
//!
//! # Example
//!
//! ```
//! use intake_runtime::{Cmd, Model, Program};
//!
//! struct Counter {
//!     count: i32,
//! }
//!
//! enum Msg {
//!     Increment,
//!     LoadAndIncrement,
//! }
//!
//! impl Model for Counter {
//!     type Message = Msg;
//!
//!     fn update(&mut self, msg: Msg) -> Cmd<Msg> {
//!         match msg {
//!             Msg::Increment => {
//!                 self.count += 1;
//!                 Cmd::none()
//!             }
//!             // A blocking call, run on a worker thread; its completion
//!             // re-enters update as a message.
//!             Msg::LoadAndIncrement => Cmd::task(|| Some(Msg::Increment)),
//!         }
//!     }
//! }
//!
//! let mut program = Program::new(Counter { count: 0 });
//! program.dispatch(Msg::LoadAndIncrement);
//! program.settle();
//! assert_eq!(program.model().count, 1);
//! ```

use std::fmt;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::debounce::DebounceSlot;
use crate::effect;

/// The Model trait defines row state and behavior.
pub trait Model: Sized {
    /// Messages are the only way state changes. Completions of background
    /// work cross a thread boundary, so they must be `Send`.
    type Message: Send + 'static;

    /// Initialize the model with startup commands.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Update the model in response to a message, returning commands for
    /// any side effects to execute.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;
}

/// A blocking unit of work executed on a worker thread.
///
/// Returns the completion message to deliver, or `None` for fire-and-forget
/// work.
pub type TaskFn<M> = Box<dyn FnOnce() -> Option<M> + Send + 'static>;

/// Commands represent side effects to be executed by the runtime.
pub enum Cmd<M> {
    /// No operation.
    None,
    /// Send a message straight back to the model.
    Msg(M),
    /// Execute several commands.
    Batch(Vec<Cmd<M>>),
    /// Run blocking work on a worker thread; the returned message is
    /// delivered into the program channel on completion.
    Task(TaskFn<M>),
    /// Arm the program's debounce slot: deliver `msg` after `delay` unless
    /// a newer debounce command supersedes it first.
    Debounce {
        /// Quiescent period required before delivery.
        delay: Duration,
        /// Message delivered when the timer fires.
        msg: M,
    },
}

impl<M> Cmd<M> {
    /// Create a no-op command.
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    /// Create a message command.
    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    /// Create a task command from a closure.
    pub fn task(f: impl FnOnce() -> Option<M> + Send + 'static) -> Self {
        Self::Task(Box::new(f))
    }

    /// Create a debounce command.
    #[inline]
    pub fn debounce(delay: Duration, msg: M) -> Self {
        Self::Debounce { delay, msg }
    }

    /// Create a batch of commands, collapsing trivial cases.
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<_> = cmds
            .into_iter()
            .filter(|c| !matches!(c, Self::None))
            .collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.remove(0),
            _ => Self::Batch(cmds),
        }
    }
}

impl<M> Default for Cmd<M> {
    fn default() -> Self {
        Self::None
    }
}

impl<M> fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("Cmd::None"),
            Self::Msg(_) => f.write_str("Cmd::Msg"),
            Self::Batch(cmds) => write!(f, "Cmd::Batch(len={})", cmds.len()),
            Self::Task(_) => f.write_str("Cmd::Task"),
            Self::Debounce { delay, .. } => write!(f, "Cmd::Debounce(delay={delay:?})"),
        }
    }
}

/// The message pump for one row.
///
/// Owns the model, the completion channel, the worker handles, and the
/// row's single debounce slot. Dropping the program cancels the pending
/// debounce timer and detaches outstanding workers; their completions are
/// discarded on send, so no message can reach a disposed row.
pub struct Program<M: Model> {
    model: M,
    sender: mpsc::Sender<M::Message>,
    receiver: mpsc::Receiver<M::Message>,
    workers: Vec<JoinHandle<()>>,
    debounce: DebounceSlot,
}

impl<M: Model> Program<M> {
    /// Create a program and run the model's `init` commands.
    pub fn new(mut model: M) -> Self {
        let (sender, receiver) = mpsc::channel();
        let cmd = model.init();
        let mut program = Self {
            model,
            sender,
            receiver,
            workers: Vec::new(),
            debounce: DebounceSlot::default(),
        };
        program.execute(cmd);
        program
    }

    /// Feed a message through `update` and execute the resulting commands.
    pub fn dispatch(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.execute(cmd);
    }

    /// Deliver every completion already sitting in the channel. Returns
    /// the number of messages dispatched. Non-blocking.
    pub fn drain(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.receiver.try_recv() {
            self.dispatch(msg);
            count += 1;
        }
        count
    }

    /// Run until quiescent: join every worker (including a pending
    /// debounce timer, which means waiting out its delay), deliver the
    /// completions, and repeat until no work remains.
    pub fn settle(&mut self) {
        loop {
            let workers = std::mem::take(&mut self.workers);
            let had_workers = !workers.is_empty();
            for handle in workers {
                let _ = handle.join();
            }
            let delivered = self.drain();
            if !had_workers && delivered == 0 {
                break;
            }
        }
    }

    /// A sender for injecting messages from outside the update loop (a
    /// UI thread, a standalone [`Debouncer`](crate::Debouncer)). Injected
    /// messages are delivered by the next `drain` or `settle`.
    pub fn sender(&self) -> mpsc::Sender<M::Message> {
        self.sender.clone()
    }

    /// The model, for reads.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The model, for direct mutation by the embedding context.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    fn execute(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Msg(m) => self.dispatch(m),
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.execute(c);
                }
            }
            Cmd::Task(task) => {
                effect::record_task_spawned();
                let sender = self.sender.clone();
                let handle = thread::spawn(move || {
                    if let Some(msg) = task() {
                        let _ = sender.send(msg);
                    }
                    effect::record_task_completed();
                });
                self.workers.push(handle);
            }
            Cmd::Debounce { delay, msg } => {
                tracing::debug!(target: "intake.effect", ?delay, "debounce armed");
                let handle = self.debounce.schedule(delay, msg, self.sender.clone());
                self.workers.push(handle);
            }
        }
    }
}
