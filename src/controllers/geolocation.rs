//! Geolocation acquisition state machine

use crate::controllers::EngineEvent;
use crate::providers::{GeoFix, GeolocationProvider, ProviderError};
use crate::runtime::AsyncSpawner;
use crate::core::geo::LatLng;
use crossbeam_channel::Sender;
use instant::Instant;
use serde::Serialize;
use std::sync::Arc;

/// Where the geolocation permission flow stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionState {
    NotRequested,
    Requested,
    Granted,
    Denied,
}

/// One acquired fix, kept in the append-only history
#[derive(Debug, Clone, Copy)]
pub struct FixRecord {
    pub fix: GeoFix,
    pub acquired_at: Instant,
}

/// What applying a fix completion did
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum FixApplied {
    /// A usable fix was recorded; the engine should recenter on it
    Recenter(LatLng),
    /// The request concluded without a usable fix (denied, failed, or the
    /// fix was malformed and rejected)
    Settled,
    /// The completion belonged to an abandoned generation and was discarded
    Stale,
}

/// Drives position acquisition through the injected provider.
///
/// State machine: `NotRequested → Requested → (Granted | Denied)`, with
/// `Granted` and `Denied` both allowing re-acquisition. A request while one
/// is already in flight is a no-op so the provider is never invoked twice
/// for a single user intent. History grows without bound here; retention is
/// an external concern.
pub struct GeolocationController {
    generation: u64,
    permission: PermissionState,
    /// State to fall back to when a completion has to be rejected
    prior: PermissionState,
    last_fix: Option<GeoFix>,
    history: Vec<FixRecord>,
    provider: Arc<dyn GeolocationProvider>,
    events: Sender<EngineEvent>,
    spawner: Arc<dyn AsyncSpawner>,
}

impl GeolocationController {
    pub(crate) fn new(
        provider: Arc<dyn GeolocationProvider>,
        spawner: Arc<dyn AsyncSpawner>,
        events: Sender<EngineEvent>,
    ) -> Self {
        Self {
            generation: 0,
            permission: PermissionState::NotRequested,
            prior: PermissionState::NotRequested,
            last_fix: None,
            history: Vec::new(),
            provider,
            events,
            spawner,
        }
    }

    /// Asks the provider for a position fix.
    ///
    /// Valid from any state except `Requested`: a second call while a
    /// request is in flight is a no-op, not an error. Returns whether a
    /// provider call was issued.
    pub fn request_location(&mut self) -> bool {
        if self.permission == PermissionState::Requested {
            log::debug!("location request already in flight, ignoring");
            return false;
        }

        self.generation += 1;
        let generation = self.generation;
        self.prior = self.permission;
        self.permission = PermissionState::Requested;

        let provider = Arc::clone(&self.provider);
        let events = self.events.clone();
        self.spawner.spawn_boxed(Box::pin(async move {
            let outcome = provider.request_fix().await;
            let _ = events.send(EngineEvent::FixResolved {
                generation,
                outcome,
            });
        }));

        true
    }

    /// Applies a provider completion.
    ///
    /// Completions from abandoned generations are discarded, a malformed fix
    /// is rejected in favor of whatever state we had before the request, and
    /// denial or failure lands in `Denied`, which a later
    /// [`GeolocationController::request_location`] may retry out of.
    pub(crate) fn apply_completion(
        &mut self,
        generation: u64,
        outcome: Result<GeoFix, ProviderError>,
    ) -> FixApplied {
        if generation != self.generation {
            log::debug!(
                "discarding geolocation completion: {}",
                crate::EngineError::StaleAsyncResult {
                    received: generation,
                    current: self.generation,
                }
            );
            return FixApplied::Stale;
        }

        match outcome {
            Ok(fix) => match fix.validate() {
                Err(error) => {
                    // A stale-but-valid fix beats a corrupt one
                    log::warn!("rejecting fix from provider: {error}");
                    self.permission = self.prior;
                    FixApplied::Settled
                }
                Ok(()) => {
                    self.permission = PermissionState::Granted;
                    self.last_fix = Some(fix);
                    self.history.push(FixRecord {
                        fix,
                        acquired_at: Instant::now(),
                    });
                    FixApplied::Recenter(fix.position)
                }
            },
            Err(ProviderError::PermissionDenied) => {
                log::warn!("geolocation permission denied");
                self.permission = PermissionState::Denied;
                FixApplied::Settled
            }
            Err(error) => {
                log::warn!("geolocation provider failed: {error}");
                self.permission = PermissionState::Denied;
                FixApplied::Settled
            }
        }
    }

    pub fn permission(&self) -> PermissionState {
        self.permission
    }

    pub fn last_fix(&self) -> Option<GeoFix> {
        self.last_fix
    }

    /// Acquired fixes in acquisition order
    pub fn history(&self) -> &[FixRecord] {
        &self.history
    }

    pub fn is_loading(&self) -> bool {
        self.permission == PermissionState::Requested
    }
}
