pub mod batch;
pub mod orchestrator;
pub mod plan;
pub mod request;
pub mod retry;

pub use batch::{BatchGenerator, BatchSource, ContentKind};
pub use orchestrator::{BatchOrchestrator, BatchReport, RunOutcome};
pub use plan::BatchPlan;
pub use request::{CategoryContext, Distribution, GeneratedItem, GenerationRequest};
pub use retry::{retry_bounded, RetryPolicy};
