//! Batch generator: one bounded ask to the backend, extracted and parsed.

use crate::extract::{extract_json_payload, parse_items};
use crate::generation::request::{GeneratedItem, GenerationRequest};
use crate::generation::retry::{retry_bounded, RetryPolicy};
use crate::provider::GenerationClient;
use tracing::{debug, info, warn};

/// Prompt strategy and item shape for one content type.
pub trait ContentKind: Send + Sync {
    type Item: GeneratedItem;

    /// Short identifier used in logs and summaries
    fn kind_name(&self) -> &'static str;

    /// Array key in the backend's JSON reply
    fn items_key(&self) -> &'static str;

    fn system_prompt(&self) -> String;

    fn user_prompt(&self, request: &GenerationRequest) -> String;

    fn temperature(&self) -> f32 {
        0.9
    }

    /// Most recent names surfaced to the next prompt; `None` passes full history.
    fn exclusion_window(&self) -> Option<usize> {
        None
    }

    /// Fixed label set for the distribution context, when the kind balances one.
    fn distribution_labels(&self) -> Option<Vec<String>> {
        None
    }
}

/// Anything that can turn a request into a (possibly short, possibly empty) batch.
///
/// An empty result means the batch produced nothing; implementations never raise.
#[allow(async_fn_in_trait)]
pub trait BatchSource<T> {
    async fn generate_batch(&self, request: &GenerationRequest) -> Vec<T>;
}

/// Issues generation requests for a [`ContentKind`] through an injected client.
pub struct BatchGenerator<'a, K, C: ?Sized> {
    kind: &'a K,
    client: &'a C,
    retry: RetryPolicy,
}

impl<'a, K, C> BatchGenerator<'a, K, C>
where
    K: ContentKind,
    C: GenerationClient + ?Sized,
{
    pub fn new(kind: &'a K, client: &'a C, retry: RetryPolicy) -> Self {
        Self {
            kind,
            client,
            retry,
        }
    }

    async fn attempt(&self, system: &str, user: &str, attempt: u32) -> Result<Vec<K::Item>, crate::error::ApiError> {
        let raw = self
            .client
            .generate_text(system, user, self.kind.temperature())
            .await?;
        debug!(
            kind = self.kind.kind_name(),
            attempt,
            response_len = raw.len(),
            "Generation response received"
        );
        let payload = extract_json_payload(&raw);
        parse_items::<K::Item>(payload, self.kind.items_key())
    }
}

impl<K, C> BatchSource<K::Item> for BatchGenerator<'_, K, C>
where
    K: ContentKind,
    C: GenerationClient + ?Sized,
{
    async fn generate_batch(&self, request: &GenerationRequest) -> Vec<K::Item> {
        let system = self.kind.system_prompt();
        let user = self.kind.user_prompt(request);
        let label = format!("{}/{}", self.kind.kind_name(), request.category.key);

        let (system, user) = (system.as_str(), user.as_str());
        let outcome = retry_bounded(&self.retry, &label, |attempt| {
            self.attempt(system, user, attempt)
        })
        .await;

        match outcome {
            Some(items) => {
                if items.len() != request.desired_count {
                    warn!(
                        kind = self.kind.kind_name(),
                        category = %request.category.key,
                        expected = request.desired_count,
                        received = items.len(),
                        "Item count differs from request; using what was returned"
                    );
                } else {
                    info!(
                        kind = self.kind.kind_name(),
                        category = %request.category.key,
                        received = items.len(),
                        "Batch generated"
                    );
                }
                items
            }
            None => Vec::new(),
        }
    }
}
