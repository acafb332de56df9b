//! Process-level cache of the computed bundle, owned by the entry point.
//!
//! At most one recomputation is in flight at a time; concurrent readers
//! either get the cached bundle immediately or wait for the computation in
//! progress. A failed recomputation leaves the previous bundle untouched.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::error::SourceUnavailable;
use crate::pipeline::{run_pipeline, PipelineBundle};
use crate::source::TableSource;

pub struct BundleCache {
    source: Arc<dyn TableSource>,
    current: RwLock<Option<Arc<PipelineBundle>>>,
    // Guards the compute path: single-flight recomputation.
    recompute: Mutex<()>,
}

impl BundleCache {
    pub fn new(source: Arc<dyn TableSource>) -> Self {
        Self {
            source,
            current: RwLock::new(None),
            recompute: Mutex::new(()),
        }
    }

    /// Cached bundle, computed on first use.
    pub async fn get(&self) -> Result<Arc<PipelineBundle>, SourceUnavailable> {
        if let Some(bundle) = self.current.read().await.clone() {
            return Ok(bundle);
        }

        let _guard = self.recompute.lock().await;
        // A concurrent caller may have populated the slot while we waited.
        if let Some(bundle) = self.current.read().await.clone() {
            return Ok(bundle);
        }
        self.compute().await
    }

    /// Invalidate and recompute. The previous bundle keeps serving readers
    /// until the new one lands, and survives a failed run.
    pub async fn reload(&self) -> Result<Arc<PipelineBundle>, SourceUnavailable> {
        let _guard = self.recompute.lock().await;
        info!("reload requested");
        self.compute().await
    }

    async fn compute(&self) -> Result<Arc<PipelineBundle>, SourceUnavailable> {
        // Input is a bounded in-memory table; the run is short enough to
        // stay on the current task.
        match run_pipeline(self.source.as_ref()) {
            Ok(bundle) => {
                let bundle = Arc::new(bundle);
                *self.current.write().await = Some(Arc::clone(&bundle));
                Ok(bundle)
            }
            Err(e) => {
                warn!(source = %e.source_id, "pipeline run failed; keeping previous bundle");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;
    use crate::source::{RawRow, SheetData, StaticSource};

    fn one_row() -> Vec<RawRow> {
        let mut row = RawRow::new();
        row.insert("T1 PLANEADO 2025".to_string(), json!(10));
        vec![row]
    }

    /// Source that counts reads and can be switched to fail.
    struct FlakySource {
        reads: AtomicUsize,
        fail: AtomicBool,
    }

    impl TableSource for FlakySource {
        fn read(&self) -> Result<SheetData, SourceUnavailable> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(SourceUnavailable::new(
                    "flaky",
                    std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
                ));
            }
            Ok(SheetData {
                rows: one_row(),
                source_id: "flaky".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn get_computes_once_and_serves_cached() {
        let source = Arc::new(FlakySource {
            reads: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        });
        let cache = BundleCache::new(source.clone());

        let a = cache.get().await.unwrap();
        let b = cache.get().await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(source.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn reload_recomputes() {
        let source = Arc::new(FlakySource {
            reads: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        });
        let cache = BundleCache::new(source.clone());

        let a = cache.get().await.unwrap();
        let b = cache.reload().await.unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(source.reads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_reload_keeps_previous_bundle() {
        let source = Arc::new(FlakySource {
            reads: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        });
        let cache = BundleCache::new(source.clone());

        let before = cache.get().await.unwrap();
        source.fail.store(true, Ordering::SeqCst);
        assert!(cache.reload().await.is_err());

        // The old bundle is still served, with no recomputation.
        let after = cache.get().await.unwrap();
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[tokio::test]
    async fn first_get_failure_surfaces_error() {
        let source = Arc::new(FlakySource {
            reads: AtomicUsize::new(0),
            fail: AtomicBool::new(true),
        });
        let cache = BundleCache::new(source);
        let err = cache.get().await.unwrap_err();
        assert_eq!(err.source_id, "flaky");
    }

    #[tokio::test]
    async fn static_source_round_trips_through_cache() {
        let cache = BundleCache::new(Arc::new(StaticSource::new(one_row(), "mem")));
        let bundle = cache.get().await.unwrap();
        assert_eq!(bundle.metadata.source_id, "mem");
        assert_eq!(bundle.records.len(), 1);
        assert_eq!(bundle.records[0].total_plan, 10.0);
    }
}
