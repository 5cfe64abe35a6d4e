pub mod sdk;

pub use sdk::booking::{BookingDetails, ReservationClient, ReservationRequest, SubmissionError};
pub use sdk::config::QuoteConfig;
pub use sdk::routing::{
    CachedGeocoder, GeocodeOutcome, Geocoder, NominatimGeocoder, QuoteSession, QuoteState,
    RouteEstimate, RouteEstimator,
};
pub use sdk::vehicles::{quote_price, PriceQuote, Vehicle, VehicleCatalog, VehicleType};
