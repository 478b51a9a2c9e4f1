//! Cooperative scheduling of the game's steps
//!
//! Nothing here runs on its own: the event loop asks the [`Scheduler`] how
//! long it may wait for input ([`Scheduler::until_due()`]) and, when that time
//! has passed, takes the due job ([`Scheduler::take_due()`]) and runs it.  At
//! most one job is ever pending.
use std::time::{Duration, Instant};

/// A source of the current time
pub(crate) trait Clock {
    fn now(&self) -> Instant;
}

/// The real, monotonic clock
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum LoopState {
    /// A job is held but not scheduled; the game has been drawn but is waiting
    /// for the player to pick a direction.
    WaitingForFirstInput,

    /// A job is scheduled to run at a certain time
    Running,

    /// The scheduled job has been cancelled and is held until the game is
    /// resumed
    Paused,

    /// Nothing more will ever run
    Stopped,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Scheduler<J, C = SystemClock> {
    clock: C,
    state: LoopState,
    /// The job to run next.  When `state` is `Running`, `due` is the time at
    /// which to run it; in the other states it has no timer.
    job: Option<J>,
    due: Option<Instant>,
}

impl<J, C> Scheduler<J, C> {
    pub(crate) fn state(&self) -> LoopState {
        self.state
    }
}

impl<J, C: Clock> Scheduler<J, C> {
    pub(crate) fn new(clock: C) -> Self {
        Scheduler {
            clock,
            state: LoopState::Stopped,
            job: None,
            due: None,
        }
    }

    /// Is a job waiting on a timer?
    #[cfg(test)]
    pub(crate) fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Hold `job` without scheduling it, and wait for the first input
    pub(crate) fn hold(&mut self, job: J) {
        self.job = Some(job);
        self.due = None;
        self.state = LoopState::WaitingForFirstInput;
    }

    /// Schedule `job` to run after `delay`, replacing any job already pending
    pub(crate) fn schedule(&mut self, job: J, delay: Duration) {
        self.job = Some(job);
        self.due = Some(self.clock.now() + delay);
        self.state = LoopState::Running;
    }

    /// Discard the pending job without running it
    pub(crate) fn cancel(&mut self) -> Option<J> {
        self.due = None;
        self.job.take()
    }

    /// Cancel the pending or held job and return it so that the caller can
    /// run it immediately.  The caller is expected to schedule the next job
    /// (or stop) afterwards.
    pub(crate) fn fire_now(&mut self) -> Option<J> {
        match self.state {
            LoopState::WaitingForFirstInput | LoopState::Running => {
                self.state = LoopState::Running;
                self.cancel()
            }
            LoopState::Paused | LoopState::Stopped => None,
        }
    }

    /// If the pending job's time has come, remove & return it
    pub(crate) fn take_due(&mut self) -> Option<J> {
        let due = self.due?;
        if self.clock.now() >= due {
            self.cancel()
        } else {
            None
        }
    }

    /// Return how long until the pending job is due, or `None` if there is
    /// no pending job
    pub(crate) fn until_due(&self) -> Option<Duration> {
        self.due
            .map(|due| due.saturating_duration_since(self.clock.now()))
    }

    /// Cancel the pending job and hold on to it.  Returns `false` if there
    /// was no scheduled job to pause.
    pub(crate) fn pause(&mut self) -> bool {
        if self.state != LoopState::Running {
            return false;
        }
        self.due = None;
        self.state = LoopState::Paused;
        true
    }

    /// Reschedule the job held since [`Scheduler::pause()`] to run after
    /// `delay`.  Returns `false` if not paused.
    pub(crate) fn resume(&mut self, delay: Duration) -> bool {
        if self.state != LoopState::Paused {
            return false;
        }
        match self.job.take() {
            Some(job) => self.schedule(job, delay),
            None => self.state = LoopState::Running,
        }
        true
    }

    /// Drop any job and refuse to run anything more until the next
    /// [`Scheduler::hold()`] or [`Scheduler::schedule()`]
    pub(crate) fn stop(&mut self) {
        let _ = self.cancel();
        self.state = LoopState::Stopped;
    }

    /// Return a reference to the held or pending job
    #[cfg(test)]
    pub(crate) fn job(&self) -> Option<&J> {
        self.job.as_ref()
    }
}

/// A clock that only moves when told to
#[cfg(test)]
#[derive(Clone, Debug)]
pub(crate) struct ManualClock {
    now: std::rc::Rc<std::cell::Cell<Instant>>,
}

#[cfg(test)]
impl ManualClock {
    pub(crate) fn new() -> ManualClock {
        ManualClock {
            now: std::rc::Rc::new(std::cell::Cell::new(Instant::now())),
        }
    }

    pub(crate) fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(100);

    #[test]
    fn starts_stopped() {
        let sched = Scheduler::<u32, _>::new(ManualClock::new());
        assert_eq!(sched.state(), LoopState::Stopped);
        assert!(!sched.is_pending());
        assert_eq!(sched.until_due(), None);
    }

    #[test]
    fn held_job_is_not_timed() {
        let clock = ManualClock::new();
        let mut sched = Scheduler::new(clock.clone());
        sched.hold(1);
        assert_eq!(sched.state(), LoopState::WaitingForFirstInput);
        clock.advance(Duration::from_secs(60));
        assert_eq!(sched.take_due(), None);
        assert_eq!(sched.until_due(), None);
        assert_eq!(sched.fire_now(), Some(1));
        assert_eq!(sched.state(), LoopState::Running);
    }

    #[test]
    fn job_runs_when_due() {
        let clock = ManualClock::new();
        let mut sched = Scheduler::new(clock.clone());
        sched.schedule(7, TICK);
        assert_eq!(sched.until_due(), Some(TICK));
        clock.advance(Duration::from_millis(60));
        assert_eq!(sched.take_due(), None);
        assert_eq!(sched.until_due(), Some(Duration::from_millis(40)));
        clock.advance(Duration::from_millis(40));
        assert_eq!(sched.until_due(), Some(Duration::ZERO));
        assert_eq!(sched.take_due(), Some(7));
        assert!(!sched.is_pending());
        assert_eq!(sched.take_due(), None);
    }

    #[test]
    fn schedule_replaces_pending() {
        let clock = ManualClock::new();
        let mut sched = Scheduler::new(clock.clone());
        sched.schedule(1, TICK);
        sched.schedule(2, TICK * 2);
        clock.advance(TICK * 2);
        assert_eq!(sched.take_due(), Some(2));
        assert_eq!(sched.take_due(), None);
    }

    #[test]
    fn fire_now_cancels_timer() {
        let clock = ManualClock::new();
        let mut sched = Scheduler::new(clock.clone());
        sched.schedule(3, TICK);
        clock.advance(Duration::from_millis(10));
        assert_eq!(sched.fire_now(), Some(3));
        assert!(!sched.is_pending());
        clock.advance(TICK);
        assert_eq!(sched.take_due(), None);
    }

    #[test]
    fn pause_and_resume_keep_job() {
        let clock = ManualClock::new();
        let mut sched = Scheduler::new(clock.clone());
        sched.schedule(5, TICK);
        assert!(sched.pause());
        assert_eq!(sched.state(), LoopState::Paused);
        assert!(!sched.is_pending());
        assert_eq!(sched.job(), Some(&5));
        clock.advance(TICK * 10);
        assert_eq!(sched.take_due(), None);
        assert_eq!(sched.fire_now(), None);
        assert!(sched.resume(TICK));
        assert_eq!(sched.state(), LoopState::Running);
        assert_eq!(sched.until_due(), Some(TICK));
        clock.advance(TICK);
        assert_eq!(sched.take_due(), Some(5));
    }

    #[test]
    fn pause_requires_running() {
        let mut sched = Scheduler::new(ManualClock::new());
        assert!(!sched.pause());
        sched.hold(1);
        assert!(!sched.pause());
        assert_eq!(sched.state(), LoopState::WaitingForFirstInput);
        assert!(!sched.resume(TICK));
    }

    #[test]
    fn stop_discards_job() {
        let clock = ManualClock::new();
        let mut sched = Scheduler::new(clock.clone());
        sched.schedule(9, TICK);
        sched.stop();
        assert_eq!(sched.state(), LoopState::Stopped);
        assert_eq!(sched.job(), None);
        clock.advance(TICK);
        assert_eq!(sched.take_due(), None);
        assert_eq!(sched.fire_now(), None);
    }
}
