pub mod client;
pub mod details;
pub mod error;
pub mod request;

pub use client::ReservationClient;
pub use details::{parse_pickup_time, BookingDetails, PickupType};
pub use error::{SubmissionError, ValidationError};
pub use request::ReservationRequest;
