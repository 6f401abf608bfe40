use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request};
use axum::middleware::Next;
use axum::response::Response;

use crate::db::queries::settings as db_settings;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::Settings;
use crate::state::AppState;

/// One cached value, tagged with the generation it was loaded under.
/// Settings live here because nearly every response formats money with
/// them, so they are served from memory until the next write.
struct Slot<T> {
    inner: RwLock<Option<(u64, T)>>,
}

impl<T: Clone> Slot<T> {
    fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    fn get(&self, gen: u64) -> Option<T> {
        let guard = self.inner.read().ok()?;
        match guard.as_ref() {
            Some((stored_gen, val)) if *stored_gen == gen => Some(val.clone()),
            _ => None,
        }
    }

    fn set(&self, gen: u64, val: T) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = Some((gen, val));
        }
    }
}

/// Read-through cache keyed on a generation counter. Bumping the generation
/// makes every slot stale at once.
pub struct AppCache {
    generation: AtomicU64,
    settings: Slot<Settings>,
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AppCache {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            settings: Slot::new(),
        }
    }

    pub fn invalidate(&self) {
        let previous = self.generation.fetch_add(1, Ordering::SeqCst);
        tracing::trace!(generation = previous + 1, "Cache invalidated");
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn load_settings(&self, pool: &DbPool) -> AppResult<Settings> {
        let gen = self.generation();
        if let Some(cached) = self.settings.get(gen) {
            return Ok(cached);
        }
        let conn = pool.get()?;
        let settings = db_settings::get_settings(&conn)?;
        self.settings.set(gen, settings.clone());
        Ok(settings)
    }
}

/// Invalidate the cache after every successful mutating request.
pub async fn cache_invalidation_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let mutating = matches!(
        *req.method(),
        Method::POST | Method::PUT | Method::DELETE | Method::PATCH
    );
    let resp = next.run(req).await;
    if mutating && resp.status().is_success() {
        state.cache.invalidate();
    }
    resp
}
