use dashmap::DashMap;
use sha1::{Digest, Sha1};
use std::future::Future;
use std::time::{Duration, Instant};

/// A memoized generative response. Records are immutable once written; an
/// expired record is simply overwritten by the next successful computation.
struct CacheRecord {
    value: String,
    stored_at: Instant,
}

/// Time-bounded memoization of generative calls, keyed by the
/// (instruction, prompt) pair.
///
/// Two call sites issuing the same instruction and prompt are
/// cache-equivalent. Staleness is checked lazily on read; there is no
/// eviction thread. Concurrent writers for the same key race harmlessly
/// (last write wins, the values are equivalent).
pub struct ResponseCache {
    records: DashMap<String, CacheRecord>,
}

impl ResponseCache {
    pub fn new() -> Self {
        ResponseCache {
            records: DashMap::new(),
        }
    }

    /// Content-addressed key over instruction + prompt.
    fn key(instruction: &str, prompt: &str) -> String {
        let mut hasher = Sha1::new();
        hasher.update(instruction.as_bytes());
        hasher.update(b"\n");
        hasher.update(prompt.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Return the cached value for (instruction, prompt) when a fresh record
    /// exists; otherwise await `compute`, store its result and hand it back.
    /// A failed computation propagates to the caller and is never cached.
    pub async fn get_or_compute<F, Fut>(
        &self,
        instruction: &str,
        prompt: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<String, String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, String>>,
    {
        let key = Self::key(instruction, prompt);

        // Scope the read guard so it is released before awaiting compute.
        {
            if let Some(record) = self.records.get(&key) {
                if record.stored_at.elapsed() <= ttl {
                    log::debug!("[CACHE] Hit for key {}", &key[..8]);
                    return Ok(record.value.clone());
                }
                log::debug!("[CACHE] Stale record for key {}", &key[..8]);
            }
        }

        let value = compute().await?;
        self.records.insert(
            key,
            CacheRecord {
                value: value.clone(),
                stored_at: Instant::now(),
            },
        );
        Ok(value)
    }

    /// Number of stored records, fresh or stale.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record. Intended for tests.
    pub fn clear(&self) {
        self.records.clear();
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}
