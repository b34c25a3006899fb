//! Platform abstraction layer
//!
//! Host-facing pieces the simulation reads from or is driven by:
//! - Input state (movement keys, pointer)
//! - Scheduling (animation frames, interval timers)

pub mod input;
pub mod scheduler;

pub use input::{Direction, InputSource, InputState};
pub use scheduler::{Due, FrameHandle, ManualScheduler, Scheduler, TimerHandle};
