//! Property-based tests for batch planning and response extraction

mod batch_plan;
mod extraction;
