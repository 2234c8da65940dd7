use rand::Rng;
use std::sync::atomic::{AtomicI64, Ordering};

/// Upper bound (exclusive) of the random component
const RANDOM_SPACE: u32 = 1_000_000;

/// Generates per-attempt session ids of the form `<unix-millis>-<random>`
///
/// The timestamp part never repeats within one generator: if the clock has
/// not moved since the previous id, the previous timestamp + 1 is used.
#[derive(Debug, Default)]
pub struct SessionIdGenerator {
    last_millis: AtomicI64,
}

impl SessionIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> String {
        let now = chrono::Utc::now().timestamp_millis();

        let previous = self
            .last_millis
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);
        let millis = now.max(previous + 1);

        let random = rand::thread_rng().gen_range(0..RANDOM_SPACE);

        format!("{}-{}", millis, random)
    }
}
