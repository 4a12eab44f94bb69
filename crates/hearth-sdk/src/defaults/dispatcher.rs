// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::DefaultContextProvider;
use anyhow::{Context as _, Result};
use hearth_core::{kinds, Context, DispatchJob, DispatcherContext, ProviderId};

/// A dispatcher backed by an unbounded channel.
///
/// Jobs can be posted from any thread, through the context or a cloned
/// [`sender`](Self::sender). They run on the thread that calls `process`.
#[derive(Debug)]
pub struct QueueDispatcher {
    sender: flume::Sender<DispatchJob>,
    receiver: flume::Receiver<DispatchJob>,
}

impl QueueDispatcher {
    /// Creates an empty dispatcher.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    /// Returns a sender that posts jobs to this dispatcher.
    pub fn sender(&self) -> flume::Sender<DispatchJob> {
        self.sender.clone()
    }
}

impl Default for QueueDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Context for QueueDispatcher {
    fn kind(&self) -> &str {
        kinds::DISPATCHER
    }

    fn provider(&self) -> Option<ProviderId> {
        Some(ProviderId::of::<DefaultContextProvider>())
    }
}

impl DispatcherContext for QueueDispatcher {
    fn post(&self, job: DispatchJob) {
        log::trace!("Posting a job to the dispatcher.");
        // The receiver lives as long as `self`, so this cannot disconnect.
        if let Err(e) = self.sender.send(job) {
            log::error!("Failed to post job: {e}");
        }
    }

    fn pending(&self) -> usize {
        self.receiver.len()
    }

    fn process(&self) -> Result<usize> {
        let queued = self.receiver.len();
        let mut drained = 0;
        while drained < queued {
            let Ok(job) = self.receiver.try_recv() else {
                break;
            };
            drained += 1;
            job().context("A dispatched job failed")?;
        }
        Ok(drained)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_process_runs_jobs_in_order() {
        let dispatcher = QueueDispatcher::new();
        let log = Arc::new(std::sync::Mutex::new(Vec::new()));
        for i in 0..3 {
            let log = Arc::clone(&log);
            dispatcher.post(Box::new(move || {
                log.lock().unwrap().push(i);
                Ok(())
            }));
        }

        let drained = dispatcher.process().unwrap();

        assert_eq!(drained, 3);
        assert_eq!(*log.lock().unwrap(), vec![0, 1, 2]);
        assert_eq!(dispatcher.pending(), 0);
    }

    #[test]
    fn test_jobs_posted_while_draining_wait_for_the_next_call() {
        let dispatcher = Arc::new(QueueDispatcher::new());
        let sender = dispatcher.sender();
        dispatcher.post(Box::new(move || {
            sender
                .send(Box::new(|| Ok(())))
                .map_err(|e| anyhow::anyhow!("{e}"))
        }));

        assert_eq!(dispatcher.process().unwrap(), 1);
        assert_eq!(dispatcher.pending(), 1);
        assert_eq!(dispatcher.process().unwrap(), 1);
    }

    #[test]
    fn test_failing_job_aborts_the_drain() {
        let dispatcher = QueueDispatcher::new();
        let ran = Arc::new(AtomicUsize::new(0));
        dispatcher.post(Box::new(|| -> Result<()> { anyhow::bail!("boom") }));
        let counter = Arc::clone(&ran);
        dispatcher.post(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }));

        let result = dispatcher.process();

        assert!(result.is_err());
        assert_eq!(ran.load(Ordering::SeqCst), 0);
        assert_eq!(dispatcher.pending(), 1);
    }
}
