#![forbid(unsafe_code)]

//! Headless Elm-style runtime for intake rows.
//!
//! # Key Components
//!
//! - [`Model`] - Trait for row state and behavior
//! - [`Cmd`] - Commands for side effects (messages, tasks, debounce)
//! - [`Program`] - Message pump that executes commands and delivers
//!   completions back into the model
//! - [`Debouncer`] - Standalone coalescing delay wrapper
//!
//! # How it fits in the system
//!
//! The runtime is the bridge between the embedding context and a row
//! model. The embedding dispatches messages; `update` returns commands;
//! the runtime executes blocking collaborator calls on worker threads and
//! feeds each completion back through `update`. All state transitions run
//! on the single thread driving [`Program::dispatch`]; concurrency exists
//! only as pending completions.

pub mod debounce;
pub mod effect;
pub mod program;

pub use debounce::{Debouncer, StopSignal, StopTrigger};
pub use program::{Cmd, Model, Program};
