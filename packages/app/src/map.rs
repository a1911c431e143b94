//! Map panel controller and the injected map capability.
//!
//! The map SDK is consumed through [`MapProvider`] so the panel logic can
//! be tested with a fake implementation; the real SDK adapter lives at the
//! boundary. The panel owns at most one [`MapSurface`] per mounted
//! lifetime: the surface is created on the first available center, panned
//! on later center changes, and dropped when the center is cleared.

use bizscope_geocoder::GeocodeError;
use bizscope_models::GeoPoint;

use crate::state::Event;

/// Capability interface over the third-party mapping service.
#[async_trait::async_trait]
pub trait MapProvider: Send + Sync {
    /// Resolves a free-text address to a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] when the provider is not ready, answers
    /// non-OK, or matches nothing.
    async fn geocode(&self, address: &str) -> Result<GeoPoint, GeocodeError>;

    /// Creates an interactive map surface centered on `center`.
    fn create_map(&self, center: GeoPoint) -> Box<dyn MapSurface>;
}

/// An instantiated interactive map.
pub trait MapSurface: Send {
    /// Pans to a new center without reinitializing.
    fn pan_to(&mut self, center: GeoPoint);

    /// Creates, moves or removes the marker. `None` removes it.
    fn set_marker(&mut self, position: Option<GeoPoint>);
}

/// Owns the map surface for one mounted lifetime.
#[derive(Default)]
pub struct MapPanel {
    surface: Option<Box<dyn MapSurface>>,
}

impl MapPanel {
    /// Creates an unmounted panel.
    #[must_use]
    pub const fn new() -> Self {
        Self { surface: None }
    }

    /// Whether a map surface currently exists.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    /// Reconciles the surface against the desired center and marker.
    ///
    /// No center unmounts the panel. A first center initializes the
    /// surface exactly once; later centers pan the existing surface.
    /// The marker always mirrors `marker`.
    pub fn sync(
        &mut self,
        provider: &dyn MapProvider,
        center: Option<GeoPoint>,
        marker: Option<GeoPoint>,
    ) {
        let Some(center) = center else {
            self.surface = None;
            return;
        };

        if let Some(surface) = self.surface.as_mut() {
            surface.pan_to(center);
        } else {
            self.surface = Some(provider.create_map(center));
        }

        if let Some(surface) = self.surface.as_mut() {
            surface.set_marker(marker);
        }
    }

    /// Translates a click on the map surface into a selection event.
    ///
    /// The click never moves the center itself; callers decide whether to
    /// re-center.
    #[must_use]
    pub const fn click(point: GeoPoint) -> Event {
        Event::MapClicked(point)
    }
}
