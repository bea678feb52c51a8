//! In-memory collaborators for exercising the orchestrator and router.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use eventscout_core::GeoPoint;
use eventscout_upstream::{DiscoveryRequest, EventCatalog, Geocoder, UpstreamError};
use futures::future::{self, BoxFuture, FutureExt};
use serde_json::Value;

enum GeocodeOutcome {
    Unreachable,
    Resolve(f64, f64),
    Fail(String),
}

pub struct FakeGeocoder {
    outcome: GeocodeOutcome,
    calls: AtomicUsize,
    addresses: Mutex<Vec<String>>,
}

impl FakeGeocoder {
    /// Panics if called; for paths that must never geocode.
    pub fn unreachable() -> Self {
        Self::with_outcome(GeocodeOutcome::Unreachable)
    }

    pub fn resolving(latitude: f64, longitude: f64) -> Self {
        Self::with_outcome(GeocodeOutcome::Resolve(latitude, longitude))
    }

    pub fn failing(status: &str) -> Self {
        Self::with_outcome(GeocodeOutcome::Fail(status.to_string()))
    }

    fn with_outcome(outcome: GeocodeOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            addresses: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn addresses(&self) -> Vec<String> {
        self.addresses.lock().expect("addresses lock").clone()
    }
}

impl Geocoder for FakeGeocoder {
    fn geocode<'a>(&'a self, address: &'a str) -> BoxFuture<'a, Result<GeoPoint, UpstreamError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.addresses
            .lock()
            .expect("addresses lock")
            .push(address.to_string());

        let result = match &self.outcome {
            GeocodeOutcome::Unreachable => panic!("geocoder must not be called for {address:?}"),
            GeocodeOutcome::Resolve(lat, lng) => {
                Ok(GeoPoint::new(*lat, *lng).expect("fake coordinates in range"))
            }
            GeocodeOutcome::Fail(status) => Err(UpstreamError::GeocodeStatus(status.clone())),
        };
        future::ready(result).boxed()
    }
}

pub struct FakeCatalog {
    response: Option<Value>,
    requests: Mutex<Vec<DiscoveryRequest>>,
}

impl FakeCatalog {
    pub fn responding(response: Value) -> Self {
        Self {
            response: Some(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call the way a non-JSON upstream body would.
    pub fn failing() -> Self {
        Self {
            response: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<DiscoveryRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl EventCatalog for FakeCatalog {
    fn fetch<'a>(
        &'a self,
        request: &'a DiscoveryRequest,
    ) -> BoxFuture<'a, Result<Value, UpstreamError>> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());

        let result = self.response.clone().ok_or_else(|| UpstreamError::Deserialize {
            context: "fake catalog".to_string(),
            source: serde_json::from_str::<Value>("<html>").expect_err("not json"),
        });
        future::ready(result).boxed()
    }
}
