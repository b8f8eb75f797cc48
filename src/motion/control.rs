//! Cooperative control loop: drain commands, then tick once.

use heapless::Deque;

use crate::error::{CommandError, Result};
use crate::motor::Actuator;

use super::command::Command;
use super::coordinator::WindingCoordinator;
use super::mode::ModeEvent;

/// Maximum number of commands waiting for the next poll.
pub const COMMAND_QUEUE_DEPTH: usize = 16;

/// Owns a coordinator and the commands queued for it.
///
/// Call [`poll`](ControlLoop::poll) from the main loop as often as possible;
/// it is the only source of motion progress.
pub struct ControlLoop<W: Actuator, G: Actuator> {
    coordinator: WindingCoordinator<W, G>,
    pending: Deque<Command, COMMAND_QUEUE_DEPTH>,
}

impl<W: Actuator, G: Actuator> ControlLoop<W, G> {
    /// Wrap a coordinator with an empty command queue.
    pub fn new(coordinator: WindingCoordinator<W, G>) -> Self {
        Self {
            coordinator,
            pending: Deque::new(),
        }
    }

    /// Queue a command for the next poll.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::QueueFull` if the queue has no room.
    pub fn submit(&mut self, command: Command) -> Result<()> {
        self.pending.push_back(command).map_err(|_| {
            warn!("command queue full");
            CommandError::QueueFull
        })?;
        Ok(())
    }

    /// Number of queued commands.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Run every queued command to completion, then tick the coordinator once.
    ///
    /// # Errors
    ///
    /// Stops at the first failing command, leaving later commands queued.
    pub fn poll(&mut self) -> Result<Option<ModeEvent>> {
        while let Some(command) = self.pending.pop_front() {
            self.coordinator.execute(command)?;
        }
        self.coordinator.tick()
    }

    /// The wrapped coordinator.
    pub fn coordinator(&self) -> &WindingCoordinator<W, G> {
        &self.coordinator
    }

    /// The wrapped coordinator, for direct calls between polls.
    pub fn coordinator_mut(&mut self) -> &mut WindingCoordinator<W, G> {
        &mut self.coordinator
    }

    /// Unwrap the coordinator, dropping queued commands.
    pub fn into_inner(self) -> WindingCoordinator<W, G> {
        self.coordinator
    }
}
