use super::details::{parse_pickup_time, BookingDetails, PickupType};
use super::error::ValidationError;
use crate::sdk::vehicles::Vehicle;
use chrono::NaiveDate;
use serde::Serialize;

/// JSON body posted to the reservation API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub name: String,
    pub passport_number: String,
    pub pickup_address: String,
    pub destination_address: String,
    pub email: String,
    pub phone: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM:SS`, 24-hour clock
    pub time: String,
    pub adults: u32,
    pub children: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    pub price: f64,
    pub vehicle_id: String,
    pub pickup_type: PickupType,
}

impl ReservationRequest {
    /// Validates `details` and builds the payload. `price` is the quoted
    /// price for the route in euros.
    pub fn from_booking(
        details: &BookingDetails,
        vehicle: &Vehicle,
        price: f64,
        today: NaiveDate,
    ) -> Result<Self, Vec<ValidationError>> {
        details.validate(vehicle, today)?;

        // Both are present once validation passed.
        let time = parse_pickup_time(&details.pickup_time);
        let (Some(date), Some(time)) = (details.pickup_date, time) else {
            return Err(vec![ValidationError::new("pickupDate", "Please select a date.")]);
        };

        let special_requests = details
            .special_requests
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self {
            name: details.full_name(),
            passport_number: details.passport_number.trim().to_string(),
            pickup_address: details.pickup_location.trim().to_string(),
            destination_address: details.dropoff_location.trim().to_string(),
            email: details.email.trim().to_string(),
            phone: details.phone_number.trim().to_string(),
            date: date.format("%Y-%m-%d").to_string(),
            time: time.format("%H:%M:%S").to_string(),
            adults: details.num_adults,
            children: details.num_children,
            special_requests,
            price,
            vehicle_id: vehicle.id.clone(),
            pickup_type: details.pickup_type,
        })
    }
}
