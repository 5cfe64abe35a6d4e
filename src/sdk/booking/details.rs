use super::error::ValidationError;
use crate::sdk::routing::MIN_ADDRESS_LEN;
use crate::sdk::vehicles::Vehicle;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PickupType {
    Airport,
    TrainStation,
    #[default]
    Custom,
}

impl PickupType {
    /// Label of the pickup location field for this kind of pickup.
    pub fn location_label(&self) -> &'static str {
        match self {
            PickupType::Airport => "Airport & Flight Number",
            PickupType::TrainStation => "Train Station & Train Number",
            PickupType::Custom => "Pickup Address",
        }
    }
}

impl fmt::Display for PickupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PickupType::Airport => "airport",
            PickupType::TrainStation => "trainStation",
            PickupType::Custom => "custom",
        };
        f.write_str(name)
    }
}

impl FromStr for PickupType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "airport" => Ok(PickupType::Airport),
            "trainstation" | "train" => Ok(PickupType::TrainStation),
            "custom" | "address" => Ok(PickupType::Custom),
            other => Err(format!("Unknown pickup type: {}", other)),
        }
    }
}

/// Everything the customer fills in on the booking form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookingDetails {
    pub first_name: String,
    pub last_name: String,
    pub passport_number: String,
    pub email: String,
    pub phone_number: String,
    pub num_adults: u32,
    pub num_children: u32,
    pub pickup_type: PickupType,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub pickup_date: Option<NaiveDate>,
    /// `HH:MM`, as entered.
    pub pickup_time: String,
    pub special_requests: Option<String>,
}

/// Accepts `HH:MM` and `HH:MM:SS`.
pub fn parse_pickup_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

fn min_chars(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

impl BookingDetails {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    pub fn passengers(&self) -> u32 {
        self.num_adults.saturating_add(self.num_children)
    }

    /// Checks the booking against `vehicle`. Dates before `today` are
    /// rejected. Returns every problem found, not just the first.
    pub fn validate(
        &self,
        vehicle: &Vehicle,
        today: NaiveDate,
    ) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if !min_chars(&self.first_name, 2) {
            errors.push(ValidationError::new(
                "firstName",
                "First name must be at least 2 characters.",
            ));
        }
        if !min_chars(&self.last_name, 2) {
            errors.push(ValidationError::new(
                "lastName",
                "Last name must be at least 2 characters.",
            ));
        }
        if !min_chars(&self.passport_number, 5) {
            errors.push(ValidationError::new(
                "passportNumber",
                "Passport number must be at least 5 characters.",
            ));
        }
        if !fast_chemail::is_valid_email(self.email.trim()) {
            errors.push(ValidationError::new("email", "Please enter a valid email address."));
        }
        if !min_chars(&self.phone_number, 7) {
            errors.push(ValidationError::new("phoneNumber", "Please enter a valid phone number."));
        }
        if self.num_adults < 1 {
            errors.push(ValidationError::new("numAdults", "At least 1 adult is required."));
        }
        if self.passengers() > vehicle.max_passengers {
            errors.push(ValidationError::new(
                "numChildren",
                format!(
                    "The {} seats at most {} passengers.",
                    vehicle.name, vehicle.max_passengers
                ),
            ));
        }
        if !min_chars(&self.pickup_location, MIN_ADDRESS_LEN) {
            errors.push(ValidationError::new(
                "pickupLocation",
                format!(
                    "Please enter a valid {}.",
                    self.pickup_type.location_label().to_lowercase()
                ),
            ));
        }
        if !min_chars(&self.dropoff_location, MIN_ADDRESS_LEN) {
            errors.push(ValidationError::new(
                "dropoffLocation",
                "Please enter a valid destination.",
            ));
        }
        match self.pickup_date {
            None => errors.push(ValidationError::new("pickupDate", "Please select a date.")),
            Some(date) if date < today => {
                errors.push(ValidationError::new("pickupDate", "The pickup date is in the past."))
            }
            Some(_) => {}
        }
        if parse_pickup_time(&self.pickup_time).is_none() {
            errors.push(ValidationError::new("pickupTime", "Please select a time."));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
