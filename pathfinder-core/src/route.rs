//! Ordered visiting sequences.
//!
//! A solved route starts and ends at the depot and visits every stop once in
//! between.

use geo::Coord;

use crate::geodesy::path_distance_km;
use crate::{Schedule, Stop, TimeOfDay, TravelModel};

/// An ordered path through stops.
///
/// # Examples
/// ```
/// use pathfinder_core::{Route, Stop};
///
/// let depot = Stop::from_lat_lng(0.0, 0.0);
/// let route = Route::new(vec![
///     depot.clone(),
///     Stop::from_lat_lng(0.0, 1.0),
///     depot,
/// ]);
///
/// assert_eq!(route.len(), 3);
/// assert_eq!(route.interior().len(), 1);
/// assert!(route.distance_km() > 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Route {
    stops: Vec<Stop>,
}

impl Route {
    /// Construct a route visiting `stops` in order.
    #[must_use]
    pub const fn new(stops: Vec<Stop>) -> Self {
        Self { stops }
    }

    /// Stops in visiting order.
    #[must_use]
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Consume the route, returning its stops.
    #[must_use]
    pub fn into_stops(self) -> Vec<Stop> {
        self.stops
    }

    /// Number of positions, counting the depot at both ends.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether the route has no positions at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// The first stop.
    #[must_use]
    pub fn depot(&self) -> Option<&Stop> {
        self.stops.first()
    }

    /// Stops strictly between the two depot positions.
    ///
    /// Routes with fewer than three positions have no interior.
    #[must_use]
    pub fn interior(&self) -> &[Stop] {
        match self.stops.as_slice() {
            [_, interior @ .., _] => interior,
            _ => &[],
        }
    }

    /// Coordinates in visiting order.
    pub fn locations(&self) -> impl Iterator<Item = Coord<f64>> + '_ {
        self.stops.iter().map(|stop| stop.location)
    }

    /// Total great-circle length in kilometres.
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        path_distance_km(self.locations())
    }

    /// Whether every window is met when leaving the depot at `start`.
    #[must_use]
    pub fn is_feasible(&self, model: &TravelModel, start: TimeOfDay) -> bool {
        model.is_feasible(&self.stops, start)
    }

    /// Timed visits when leaving the depot at `start`, if feasible.
    #[must_use]
    pub fn schedule(&self, model: &TravelModel, start: TimeOfDay) -> Option<Schedule> {
        model.schedule(&self.stops, start)
    }
}

impl From<Vec<Stop>> for Route {
    fn from(stops: Vec<Stop>) -> Self {
        Self::new(stops)
    }
}
