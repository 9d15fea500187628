use crate::types::{DayOfWeek, TimeOfDay, TrafficConditions, TripInput, Weather};

/// Authoritative input order for the trained model. One-hot columns use
/// dropped-first encoding: the baseline of each group (Afternoon, High,
/// Clear) has no column and is represented by all-zeros, and Day_of_Week
/// carries no Unknown column at all.
pub const FEATURE_NAMES: [&str; 14] = [
    "Trip_Distance_km",
    "Trip_Duration_Minutes",
    "Time_of_Day_Evening",
    "Time_of_Day_Morning",
    "Time_of_Day_Night",
    "Time_of_Day_Unknown",
    "Day_of_Week_Weekday",
    "Day_of_Week_Weekend",
    "Traffic_Conditions_Low",
    "Traffic_Conditions_Medium",
    "Traffic_Conditions_Unknown",
    "Weather_Rain",
    "Weather_Snow",
    "Weather_Unknown",
];

/// Maps a trip onto the model's fixed feature layout. Total function: every
/// `TripInput` encodes, baselines and unrecognized categories included.
pub fn build_features(trip: &TripInput) -> [f32; 14] {
    let mut x = [0.0f32; 14];
    x[0] = trip.trip_distance_km as f32;
    x[1] = trip.trip_duration_minutes as f32;

    match trip.time_of_day {
        TimeOfDay::Evening => x[2] = 1.0,
        TimeOfDay::Morning => x[3] = 1.0,
        TimeOfDay::Night => x[4] = 1.0,
        TimeOfDay::Unknown => x[5] = 1.0,
        TimeOfDay::Afternoon => {} // baseline
    }

    match trip.day_of_week {
        DayOfWeek::Weekday => x[6] = 1.0,
        DayOfWeek::Weekend => x[7] = 1.0,
        DayOfWeek::Unknown => {}
    }

    match trip.traffic_conditions {
        TrafficConditions::Low => x[8] = 1.0,
        TrafficConditions::Medium => x[9] = 1.0,
        TrafficConditions::Unknown => x[10] = 1.0,
        TrafficConditions::High => {} // baseline
    }

    match trip.weather {
        Weather::Rain => x[11] = 1.0,
        Weather::Snow => x[12] = 1.0,
        Weather::Unknown => x[13] = 1.0,
        Weather::Clear => {} // baseline
    }

    x
}
