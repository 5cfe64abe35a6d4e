use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use lux_ride_quote::{
    sdk::booking::{
        BookingDetails, PickupType, ReservationClient, ReservationRequest, SubmissionError,
    },
    sdk::config::QuoteConfig,
    sdk::routing::{CachedGeocoder, NominatimGeocoder, RouteEstimator},
    sdk::util::log::init_logging,
    sdk::vehicles::{PriceQuote, VehicleCatalog, VehicleType},
};

/// Distance and price quotes for chauffeur transfers
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the bookable vehicles and their rates
    Vehicles,

    /// Estimate the distance and price between two addresses
    Quote {
        #[command(flatten)]
        route: RouteArgs,
    },

    /// Quote a route and submit a reservation for it
    Book(BookArgs),
}

#[derive(Args, Debug)]
struct RouteArgs {
    /// Pickup address (e.g. "Luxembourg Airport")
    #[arg(short, long)]
    pickup: String,

    /// Destination address (e.g. "25 Boulevard Royal, Luxembourg")
    #[arg(short, long)]
    dropoff: String,

    /// Vehicle type: car or van
    #[arg(short, long, default_value = "car")]
    vehicle: VehicleType,
}

#[derive(Args, Debug)]
struct BookArgs {
    #[command(flatten)]
    route: RouteArgs,

    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    /// Passport or ID number
    #[arg(long)]
    passport: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    phone: String,

    #[arg(long, default_value_t = 1)]
    adults: u32,

    #[arg(long, default_value_t = 0)]
    children: u32,

    /// airport, trainStation or custom
    #[arg(long, default_value = "custom")]
    pickup_type: PickupType,

    /// Pickup date, YYYY-MM-DD
    #[arg(long)]
    date: NaiveDate,

    /// Pickup time, HH:MM
    #[arg(long)]
    time: String,

    /// Child seats, extra luggage, etc.
    #[arg(long)]
    requests: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let config = QuoteConfig::from_env().context("Invalid configuration")?;
    let catalog = VehicleCatalog::standard();

    match cli.command {
        Command::Vehicles => {
            println!("{}", serde_json::to_string_pretty(catalog.all())?);
        }
        Command::Quote { route } => {
            let quote = quote_route(&config, &catalog, &route).await?;
            println!("{}", serde_json::to_string_pretty(&quote)?);
        }
        Command::Book(args) => book(&config, &catalog, args).await?,
    }

    Ok(())
}

async fn quote_route(
    config: &QuoteConfig,
    catalog: &VehicleCatalog,
    route: &RouteArgs,
) -> Result<PriceQuote> {
    let vehicle = catalog
        .by_type(route.vehicle)
        .ok_or_else(|| anyhow!("No {} in the fleet", route.vehicle))?;

    let geocoder = NominatimGeocoder::new(config).context("Failed to build geocoding client")?;
    let estimator = RouteEstimator::from_config(CachedGeocoder::new(geocoder), config);

    log::info!("Estimating route {} → {}", route.pickup, route.dropoff);
    let Some(estimate) = estimator.estimate(&route.pickup, &route.dropoff).await else {
        bail!("Could not estimate a route between these addresses");
    };

    let quote = vehicle.quote(&estimate);
    log::info!(
        "{}: {:.1} km at {:.2} €/km = {:.2} €",
        vehicle.name,
        quote.estimate.distance_km,
        quote.price_per_km,
        quote.price
    );
    Ok(quote)
}

async fn book(config: &QuoteConfig, catalog: &VehicleCatalog, args: BookArgs) -> Result<()> {
    let endpoint = config.require_reservation_url()?;
    let quote = quote_route(config, catalog, &args.route).await?;
    let vehicle = catalog
        .get(&quote.vehicle_id)
        .ok_or_else(|| anyhow!("Unknown vehicle {}", quote.vehicle_id))?;

    let details = BookingDetails {
        first_name: args.first_name,
        last_name: args.last_name,
        passport_number: args.passport,
        email: args.email,
        phone_number: args.phone,
        num_adults: args.adults,
        num_children: args.children,
        pickup_type: args.pickup_type,
        pickup_location: args.route.pickup,
        dropoff_location: args.route.dropoff,
        pickup_date: Some(args.date),
        pickup_time: args.time,
        special_requests: args.requests,
    };

    let today = Local::now().date_naive();
    let request = ReservationRequest::from_booking(&details, vehicle, quote.price, today)
        .map_err(SubmissionError::Invalid)?;

    let client = ReservationClient::new(endpoint, config)?;
    client.submit(&request).await.map_err(submission_failure)?;

    println!(
        "Booking received for {} on {} at {}: {:.2} €",
        request.name, request.date, request.time, request.price
    );
    Ok(())
}

/// Leads with the customer-facing message; the technical cause stays in the
/// error chain.
fn submission_failure(e: SubmissionError) -> anyhow::Error {
    let message = e.user_message();
    anyhow::Error::new(e).context(message)
}
