// src/pipeline/refresh.rs

//! Server-side cache refresh.

use crate::api::{AdminApi, CacheRefresh, CacheTarget};
use crate::error::Result;

/// Rebuild every cache in `targets`, in order.
///
/// All endpoints are announced before the first request. The first failure
/// aborts the rest of the sequence.
pub async fn refresh_all(api: &dyn AdminApi, targets: &[CacheTarget]) -> Result<Vec<CacheRefresh>> {
    for target in targets {
        log::info!(
            "update {} endpoint: {}",
            target.name,
            api.endpoint(target.path)
        );
    }

    let mut refreshed = Vec::with_capacity(targets.len());
    for target in targets {
        log::info!("Updating {} cache...", target.name);
        let refresh = api.update_cache(target).await?;
        log::info!("Success! time: {}ms", refresh.time_ms);
        refreshed.push(refresh);
    }
    Ok(refreshed)
}
