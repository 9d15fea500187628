use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ---------- Categorical inputs ----------

// Each group parses permissively: strings that don't match an enumerated
// value degrade to the group's encoding baseline instead of failing the
// request, so a typo'd category still yields a prediction.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
    Unknown,
}

impl From<String> for TimeOfDay {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Morning" => Self::Morning,
            "Evening" => Self::Evening,
            "Night" => Self::Night,
            "Unknown" => Self::Unknown,
            // "Afternoon" and anything unrecognized: encoding baseline
            _ => Self::Afternoon,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum DayOfWeek {
    Weekday,
    Weekend,
    Unknown,
}

impl From<String> for DayOfWeek {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Weekday" => Self::Weekday,
            "Weekend" => Self::Weekend,
            // this group has no Unknown indicator column; "Unknown" and
            // unrecognized strings both encode as all-zeros
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum TrafficConditions {
    Low,
    Medium,
    High,
    Unknown,
}

impl From<String> for TrafficConditions {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Low" => Self::Low,
            "Medium" => Self::Medium,
            "Unknown" => Self::Unknown,
            // "High" and anything unrecognized: encoding baseline
            _ => Self::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Weather {
    Clear,
    Rain,
    Snow,
    Unknown,
}

impl From<String> for Weather {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Rain" => Self::Rain,
            "Snow" => Self::Snow,
            "Unknown" => Self::Unknown,
            // "Clear" and anything unrecognized: encoding baseline
            _ => Self::Clear,
        }
    }
}

// ---------- Request/Response types ----------

/// Trip attributes as submitted by a caller. Wire field names match the
/// model's training columns, which is what the UI already sends.
#[derive(Debug, Clone, Deserialize)]
pub struct TripInput {
    #[serde(rename = "Trip_Distance_km")]
    pub trip_distance_km: f64,
    #[serde(rename = "Trip_Duration_Minutes")]
    pub trip_duration_minutes: f64,
    #[serde(rename = "Time_of_Day")]
    pub time_of_day: TimeOfDay,
    #[serde(rename = "Day_of_Week")]
    pub day_of_week: DayOfWeek,
    #[serde(rename = "Traffic_Conditions")]
    pub traffic_conditions: TrafficConditions,
    #[serde(rename = "Weather")]
    pub weather: Weather,
}

impl TripInput {
    /// Numeric boundary checks; the categorical fields are total and never
    /// reject.
    pub fn validate(&self) -> Result<(), ApiError> {
        if !self.trip_distance_km.is_finite() || self.trip_distance_km <= 0.0 {
            return Err(ApiError::InvalidInput(
                "Trip_Distance_km must be a positive number".to_string(),
            ));
        }
        if !self.trip_duration_minutes.is_finite() || self.trip_duration_minutes <= 0.0 {
            return Err(ApiError::InvalidInput(
                "Trip_Duration_Minutes must be a positive number".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct PredictionOut {
    pub estimated_price: f64,
    pub currency: &'static str,
    pub predicted_price_log: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteRequest {
    pub from_address: String,
    pub to_address: String,
}

impl RouteRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.from_address.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "from_address must not be empty".to_string(),
            ));
        }
        if self.to_address.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "to_address must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Route summary with the polyline already flipped to [lat, lon] pairs for
/// map rendering.
#[derive(Debug, Clone, Serialize)]
pub struct RouteResponse {
    pub distance_km: f64,
    pub duration_min: f64,
    pub start_lat: f64,
    pub start_lon: f64,
    pub end_lat: f64,
    pub end_lon: f64,
    pub polyline_latlon: Vec<[f64; 2]>,
}
