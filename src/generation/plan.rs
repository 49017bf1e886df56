//! Batch sizing for one run.

use crate::error::ApiError;

/// How a total count is split into fixed-size batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    pub total_count: usize,
    pub batch_size: usize,
}

impl BatchPlan {
    pub fn new(total_count: usize, batch_size: usize) -> Result<Self, ApiError> {
        if batch_size == 0 {
            return Err(ApiError::InvalidRequest(
                "batch_size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            total_count,
            batch_size,
        })
    }

    /// ceil(total / batch_size)
    pub fn batch_count(&self) -> usize {
        self.total_count.div_ceil(self.batch_size)
    }

    /// Size of the next request given how many items have been collected so far.
    pub fn request_size(&self, collected: usize) -> usize {
        self.batch_size
            .min(self.total_count.saturating_sub(collected))
    }

    /// Request sizes when every batch yields exactly what it asked for.
    pub fn nominal_sizes(&self) -> Vec<usize> {
        let mut collected = 0;
        (0..self.batch_count())
            .map(|_| {
                let size = self.request_size(collected);
                collected += size;
                size
            })
            .collect()
    }
}
