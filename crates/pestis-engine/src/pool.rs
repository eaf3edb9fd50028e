//! Persistent band worker pool.
//!
//! Workers are spawned once per [`Simulation`](crate::Simulation) and
//! reused for every step. Each step fans out one [`BandTask`] per band
//! over a shared bounded crossbeam channel and fans back in through a
//! bounded(1) reply channel per task. Workers own the band copy they
//! receive and hand it back, so no mutable state is shared while a step
//! is in flight.
//!
//! Results are written into the authoritative grids only after every
//! band has come back: a step either lands completely or not at all.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use pestis_core::{CompartmentGrids, GridError};
use smallvec::SmallVec;

use crate::band::{partition_rows, Band};
use crate::config::ConfigError;
use crate::error::StepError;
use crate::rates::TransitionRates;

/// A band dispatched to a worker.
struct BandTask {
    band: Band,
    rates: TransitionRates,
    cells: CompartmentGrids,
    reply: Sender<BandResult>,
}

/// A band returned by a worker after one tick.
struct BandResult {
    band: Band,
    cells: CompartmentGrids,
}

pub(crate) struct BandPool {
    bands: SmallVec<[Band; 16]>,
    task_tx: Option<Sender<BandTask>>,
    workers: Vec<JoinHandle<()>>,
}

impl BandPool {
    /// Spawn one worker per band of a `height`-row grid.
    pub(crate) fn new(height: u32, band_count: usize) -> Result<Self, ConfigError> {
        let bands = partition_rows(height, band_count);
        let (task_tx, task_rx) = crossbeam_channel::bounded(bands.len());
        let mut pool = Self {
            bands,
            task_tx: Some(task_tx),
            workers: Vec::new(),
        };
        for i in 0..pool.bands.len() {
            let rx = task_rx.clone();
            let handle = thread::Builder::new()
                .name(format!("pestis-band-{i}"))
                .spawn(move || worker_loop(rx))
                .map_err(|e| ConfigError::ThreadSpawnFailed {
                    reason: e.to_string(),
                })?;
            pool.workers.push(handle);
        }
        Ok(pool)
    }

    pub(crate) fn band_count(&self) -> usize {
        self.bands.len()
    }

    /// Advance `grids` by one tick across all bands.
    pub(crate) fn step(
        &self,
        grids: &mut CompartmentGrids,
        rates: TransitionRates,
    ) -> Result<(), StepError> {
        let Some(task_tx) = self.task_tx.as_ref() else {
            return Err(StepError::WorkerLost { band: 0 });
        };

        let mut pending: SmallVec<[(usize, Receiver<BandResult>); 16]> = SmallVec::new();
        for band in &self.bands {
            let cells = grids
                .extract_rows(band.rows.clone())
                .map_err(|source| StepError::BandLayout {
                    band: band.index,
                    source,
                })?;
            let (reply, reply_rx) = crossbeam_channel::bounded(1);
            let task = BandTask {
                band: band.clone(),
                rates,
                cells,
                reply,
            };
            task_tx
                .send(task)
                .map_err(|_| StepError::WorkerLost { band: band.index })?;
            pending.push((band.index, reply_rx));
        }

        let mut results = Vec::with_capacity(pending.len());
        for (index, reply_rx) in pending {
            let result = reply_rx
                .recv()
                .map_err(|_| StepError::WorkerLost { band: index })?;
            results.push(result);
        }

        // Check every band before writing any, so a bad one leaves the
        // grids untouched.
        for BandResult { band, cells } in &results {
            let rows = band.rows.end - band.rows.start;
            if cells.width() != grids.width() || cells.height() != rows {
                return Err(StepError::BandLayout {
                    band: band.index,
                    source: GridError::BandOutOfRange {
                        start_row: band.rows.start,
                        end_row: band.rows.start.saturating_add(cells.height()),
                        height: grids.height(),
                    },
                });
            }
        }
        for BandResult { band, cells } in &results {
            grids
                .write_rows(band.rows.start, cells)
                .map_err(|source| StepError::BandLayout {
                    band: band.index,
                    source,
                })?;
        }
        Ok(())
    }
}

impl Drop for BandPool {
    fn drop(&mut self) {
        // Closing the task channel makes every worker's recv() fail.
        self.task_tx.take();
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

/// Runs until the task channel is closed (pool dropped).
fn worker_loop(task_rx: Receiver<BandTask>) {
    while let Ok(task) = task_rx.recv() {
        let BandTask {
            band,
            rates,
            mut cells,
            reply,
        } = task;
        rates.advance_band(&mut cells);
        let _ = reply.send(BandResult { band, cells });
    }
}
