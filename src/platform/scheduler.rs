//! Host scheduling abstraction
//!
//! The game runs two independent scheduled tasks: a one-shot animation-frame
//! callback that re-arms itself every frame, and a periodic spawn interval.
//! In the browser these map to `requestAnimationFrame`/`setInterval`; the
//! `ManualScheduler` drives both from a virtual clock for headless runs.

/// Handle to a pending animation-frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Handle to a running interval timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub i32);

pub trait Scheduler {
    /// Ask for one callback on the next animation frame
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
    /// Start a repeating timer
    fn start_interval(&mut self, period_ms: u32) -> TimerHandle;
    fn clear_interval(&mut self, handle: TimerHandle);
}

/// A callback that became due while advancing the manual clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Due {
    Frame(FrameHandle),
    Interval(TimerHandle),
}

#[derive(Debug, Clone)]
struct Interval {
    handle: TimerHandle,
    period_ms: f64,
    next_due_ms: f64,
}

/// Deterministic scheduler over a virtual millisecond clock
#[derive(Debug, Clone)]
pub struct ManualScheduler {
    now_ms: f64,
    frame_period_ms: f64,
    next_id: i32,
    pending_frame: Option<(FrameHandle, f64)>,
    intervals: Vec<Interval>,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new(1000.0 / 60.0)
    }
}

impl ManualScheduler {
    pub fn new(frame_period_ms: f64) -> Self {
        Self {
            now_ms: 0.0,
            frame_period_ms,
            next_id: 1,
            pending_frame: None,
            intervals: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn frame_period_ms(&self) -> f64 {
        self.frame_period_ms
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    pub fn active_intervals(&self) -> usize {
        self.intervals.len()
    }

    /// Move the clock forward and return every callback that fell due, in
    /// chronological order. Frame callbacks are one-shot and are consumed.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<Due> {
        let target = self.now_ms + dt_ms;
        let mut fired: Vec<(f64, Due)> = Vec::new();

        if let Some((handle, due_ms)) = self.pending_frame {
            if due_ms <= target {
                fired.push((due_ms, Due::Frame(handle)));
                self.pending_frame = None;
            }
        }

        for interval in &mut self.intervals {
            while interval.next_due_ms <= target {
                fired.push((interval.next_due_ms, Due::Interval(interval.handle)));
                interval.next_due_ms += interval.period_ms;
            }
        }

        fired.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.now_ms = target;
        fired.into_iter().map(|(_, due)| due).collect()
    }

    fn allocate_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.allocate_id());
        self.pending_frame = Some((handle, self.now_ms + self.frame_period_ms));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if matches!(self.pending_frame, Some((pending, _)) if pending == handle) {
            self.pending_frame = None;
        }
    }

    fn start_interval(&mut self, period_ms: u32) -> TimerHandle {
        let handle = TimerHandle(self.allocate_id());
        let period_ms = f64::from(period_ms.max(1));
        self.intervals.push(Interval {
            handle,
            period_ms,
            next_due_ms: self.now_ms + period_ms,
        });
        handle
    }

    fn clear_interval(&mut self, handle: TimerHandle) {
        self.intervals.retain(|i| i.handle != handle);
    }
}
