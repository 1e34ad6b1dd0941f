//! Progress checkpoints reported by the pipeline.
//!
//! The library never prints. Callers that want progress output pass a
//! `Progress` sink (the CLI forwards checkpoints to `tracing`).

/// Pipeline checkpoint, in the order they are reported.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Checkpoint {
    MeshLoaded { vertices: usize },
    DirectionsGenerated { count: usize },
    /// Summary of the bases built lazily during aggregation. Reported once the
    /// loop finishes, right before `AggregationComplete`.
    BasesBuilt { count: usize, fallbacks: usize },
    AggregationComplete { total: f64 },
}

pub trait Progress {
    fn checkpoint(&mut self, checkpoint: Checkpoint);
}

/// Discards every checkpoint.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    #[inline]
    fn checkpoint(&mut self, _checkpoint: Checkpoint) {}
}

impl<F: FnMut(Checkpoint)> Progress for F {
    #[inline]
    fn checkpoint(&mut self, checkpoint: Checkpoint) {
        self(checkpoint)
    }
}
