//! Background job tracking.
//!
//! Only the most recent background job can be brought to the foreground. A
//! new background spawn displaces the previous one, which then sits on a reap
//! list until its processes exit so it never lingers as a zombie.

use std::process::Child;

use crate::ExitCode;
use crate::error::Result;
use crate::exec::wait_all;

/// The processes started by one background command or pipeline.
#[derive(Debug)]
pub struct Job {
    /// Pid reported to the user (the last stage for a pipeline).
    pub pid: u32,
    children: Vec<Child>,
}

impl Job {
    /// A job made of `children`; the last child is the reported one.
    pub fn new(children: Vec<Child>) -> Option<Self> {
        let pid = children.last()?.id();
        Some(Self { pid, children })
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Block until every process has exited; returns the last one's status.
    pub fn wait(self) -> Result<ExitCode> {
        wait_all(self.children)
    }

    /// Poll without blocking; true once every process has exited.
    fn try_reap(&mut self) -> bool {
        self.children
            .retain_mut(|child| !matches!(child.try_wait(), Ok(Some(_)) | Err(_)));
        self.children.is_empty()
    }
}

/// Single-slot holder for the most recent background job.
#[derive(Debug, Default)]
pub struct JobSlot {
    current: Option<Job>,
    displaced: Vec<Job>,
}

impl JobSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new background job, displacing any previous one.
    pub fn register(&mut self, job: Job) {
        log::info!("background job registered: pid {}", job.pid);
        if let Some(previous) = self.current.replace(job) {
            log::debug!("background job {} displaced", previous.pid);
            self.displaced.push(previous);
        }
    }

    /// Pid of the job `fg` would wait for.
    pub fn current_pid(&self) -> Option<u32> {
        self.current.as_ref().map(|job| job.pid)
    }

    /// Remove and return the current job.
    pub fn take(&mut self) -> Option<Job> {
        self.current.take()
    }

    /// Collect finished processes without blocking.
    ///
    /// Clears the slot once the current job has fully exited.
    pub fn reap(&mut self) {
        if let Some(job) = &mut self.current
            && job.try_reap()
        {
            log::info!("background job {} finished", job.pid);
            self.current = None;
        }
        self.displaced.retain_mut(|job| !job.try_reap());
    }

    /// Number of displaced jobs still running.
    pub fn displaced_count(&self) -> usize {
        self.displaced.len()
    }
}
