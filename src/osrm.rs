//! OSRM HTTP adapter for exact road distances.
//!
//! One-to-many lookups go through the `table` service, leg sequences and
//! single pairs through the `route` service.

use rayon::prelude::*;
use serde::Deserialize;

use crate::config::OsrmConfig;
use crate::error::DistanceError;
use crate::models::{Coordinate, TravelEstimate, TravelMode};
use crate::traits::DistanceProvider;

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn get<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, DistanceError> {
        tracing::debug!(url, "querying routing service");
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(DistanceError::Status(status.as_u16()));
        }
        response
            .json::<T>()
            .map_err(|err| DistanceError::Malformed(err.to_string()))
    }

    /// One `table` request: `origin` to every coordinate in `destinations`.
    fn table(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
        mode: TravelMode,
    ) -> Result<Vec<TravelEstimate>, DistanceError> {
        let mut points = Vec::with_capacity(destinations.len() + 1);
        points.push(origin);
        points.extend_from_slice(destinations);

        let destination_indices = (1..=destinations.len())
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(";");

        let url = format!(
            "{}/table/v1/{}/{}?sources=0&destinations={}&annotations=duration,distance",
            self.config.base_url,
            mode.osrm_profile(),
            format_coordinates(&points),
            destination_indices
        );

        let body: OsrmTableResponse = self.get(&url)?;
        body.check()?;

        let durations = first_row(body.durations, "durations")?;
        let distances = first_row(body.distances, "distances")?;
        if durations.len() != destinations.len() || distances.len() != destinations.len() {
            return Err(DistanceError::Malformed(format!(
                "expected {} table cells, got {} durations and {} distances",
                destinations.len(),
                durations.len(),
                distances.len()
            )));
        }

        durations
            .into_iter()
            .zip(distances)
            .map(|(duration, distance)| match (duration, distance) {
                (Some(seconds), Some(meters)) => Ok(to_estimate(meters, seconds)),
                _ => Err(DistanceError::Malformed("unreachable destination".to_string())),
            })
            .collect()
    }

    /// One `route` request through `waypoints`, returning per-leg estimates.
    fn route_legs(
        &self,
        waypoints: &[Coordinate],
        mode: TravelMode,
    ) -> Result<Vec<TravelEstimate>, DistanceError> {
        let url = format!(
            "{}/route/v1/{}/{}?overview=false",
            self.config.base_url,
            mode.osrm_profile(),
            format_coordinates(waypoints)
        );

        let body: OsrmRouteResponse = self.get(&url)?;
        if body.code != "Ok" {
            return Err(DistanceError::Service {
                code: body.code,
                message: body.message.unwrap_or_default(),
            });
        }

        let route = body
            .routes
            .and_then(|routes| routes.into_iter().next())
            .ok_or_else(|| DistanceError::Malformed("no route returned".to_string()))?;

        if route.legs.len() != waypoints.len() - 1 {
            return Err(DistanceError::Malformed(format!(
                "expected {} legs, got {}",
                waypoints.len() - 1,
                route.legs.len()
            )));
        }

        Ok(route
            .legs
            .into_iter()
            .map(|leg| to_estimate(leg.distance, leg.duration))
            .collect())
    }
}

impl DistanceProvider for OsrmClient {
    fn distances_from(
        &self,
        origin: Coordinate,
        destinations: &[Coordinate],
        mode: TravelMode,
    ) -> Result<Vec<TravelEstimate>, DistanceError> {
        if destinations.is_empty() {
            return Ok(Vec::new());
        }

        let chunk_size = self.config.max_table_destinations.max(1);
        if destinations.len() <= chunk_size {
            return self.table(origin, destinations, mode);
        }

        let chunks = destinations
            .par_chunks(chunk_size)
            .map(|chunk| self.table(origin, chunk, mode))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(chunks.into_iter().flatten().collect())
    }

    fn pair_distances(
        &self,
        pairs: &[(Coordinate, Coordinate)],
        mode: TravelMode,
    ) -> Result<Vec<TravelEstimate>, DistanceError> {
        pairs
            .par_iter()
            .map(|(from, to)| self.distance(*from, *to, mode))
            .collect()
    }

    fn leg_distances(
        &self,
        waypoints: &[Coordinate],
        mode: TravelMode,
    ) -> Result<Vec<TravelEstimate>, DistanceError> {
        if waypoints.len() < 2 {
            return Ok(Vec::new());
        }
        self.route_legs(waypoints, mode)
    }

    fn distance(
        &self,
        from: Coordinate,
        to: Coordinate,
        mode: TravelMode,
    ) -> Result<TravelEstimate, DistanceError> {
        self.route_legs(&[from, to], mode)?
            .into_iter()
            .next()
            .ok_or_else(|| DistanceError::Malformed("no leg returned".to_string()))
    }
}

fn format_coordinates(points: &[Coordinate]) -> String {
    points
        .iter()
        .map(|point| format!("{:.6},{:.6}", point.longitude, point.latitude))
        .collect::<Vec<_>>()
        .join(";")
}

fn to_estimate(meters: f64, seconds: f64) -> TravelEstimate {
    TravelEstimate {
        distance_km: meters / 1000.0,
        travel_time_minutes: (seconds / 60.0).ceil().max(0.0) as u32,
    }
}

fn first_row(
    matrix: Option<Vec<Vec<Option<f64>>>>,
    field: &str,
) -> Result<Vec<Option<f64>>, DistanceError> {
    matrix
        .and_then(|rows| rows.into_iter().next())
        .ok_or_else(|| DistanceError::Malformed(format!("missing {}", field)))
}

#[derive(Debug, Deserialize)]
struct OsrmTableResponse {
    code: String,
    message: Option<String>,
    durations: Option<Vec<Vec<Option<f64>>>>,
    distances: Option<Vec<Vec<Option<f64>>>>,
}

impl OsrmTableResponse {
    fn check(&self) -> Result<(), DistanceError> {
        if self.code == "Ok" {
            Ok(())
        } else {
            Err(DistanceError::Service {
                code: self.code.clone(),
                message: self.message.clone().unwrap_or_default(),
            })
        }
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    message: Option<String>,
    routes: Option<Vec<OsrmRoute>>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    distance: f64,
    duration: f64,
}
