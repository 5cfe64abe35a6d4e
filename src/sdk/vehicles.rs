use super::routing::haversine::round_half_up;
use super::routing::RouteEstimate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Car,
    Van,
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleType::Car => write!(f, "car"),
            VehicleType::Van => write!(f, "van"),
        }
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car" | "sedan" => Ok(VehicleType::Car),
            "van" => Ok(VehicleType::Van),
            other => Err(format!("Unknown vehicle type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub image_url: String,
    pub max_passengers: u32,
    /// Euros per kilometer.
    pub price_per_km: f64,
    pub description: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub estimate: RouteEstimate,
    pub vehicle_id: String,
    pub price_per_km: f64,
    /// Euros, rounded to cents.
    pub price: f64,
}

/// `distance_km × price_per_km`, rounded half-up to cents.
pub fn quote_price(distance_km: f64, price_per_km: f64) -> f64 {
    round_half_up(distance_km * price_per_km, 2)
}

impl Vehicle {
    pub fn price_for(&self, distance_km: f64) -> f64 {
        quote_price(distance_km, self.price_per_km)
    }

    pub fn quote(&self, estimate: &RouteEstimate) -> PriceQuote {
        PriceQuote {
            estimate: estimate.clone(),
            vehicle_id: self.id.clone(),
            price_per_km: self.price_per_km,
            price: self.price_for(estimate.distance_km),
        }
    }
}

#[derive(Debug, Clone)]
pub struct VehicleCatalog {
    vehicles: Vec<Vehicle>,
}

impl Default for VehicleCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl VehicleCatalog {
    /// The fleet offered for booking.
    pub fn standard() -> Self {
        Self {
            vehicles: vec![
                Vehicle {
                    id: "car-1".to_string(),
                    name: "Luxury Sedan".to_string(),
                    vehicle_type: VehicleType::Car,
                    image_url: "/images/luxury-sedan.jpg".to_string(),
                    max_passengers: 4,
                    price_per_km: 2.5,
                    description: "Comfortable and stylish sedan perfect for city travel \
                                  and airport transfers."
                        .to_string(),
                    features: strings(&[
                        "Air conditioning",
                        "WiFi",
                        "Leather seats",
                        "Professional driver",
                        "Complimentary water",
                    ]),
                },
                Vehicle {
                    id: "van-1".to_string(),
                    name: "Premium Van".to_string(),
                    vehicle_type: VehicleType::Van,
                    image_url: "/images/premium-van.jpg".to_string(),
                    max_passengers: 7,
                    price_per_km: 3.5,
                    description: "Spacious van ideal for groups, families or extra \
                                  luggage requirements."
                        .to_string(),
                    features: strings(&[
                        "Air conditioning",
                        "WiFi",
                        "Spacious seating",
                        "Extra luggage space",
                        "Professional driver",
                        "Complimentary refreshments",
                    ]),
                },
            ],
        }
    }

    pub fn all(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn get(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    /// First vehicle of the given type.
    pub fn by_type(&self, vehicle_type: VehicleType) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.vehicle_type == vehicle_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate(distance_km: f64) -> RouteEstimate {
        RouteEstimate {
            distance_km,
            formatted_pickup_address: "Luxembourg Airport".to_string(),
            formatted_dropoff_address: "Boulevard Royal".to_string(),
        }
    }

    #[test]
    fn price_is_rounded_to_cents() {
        assert_eq!(quote_price(10.0, 2.5), 25.0);
        assert_eq!(quote_price(10.3, 3.5), 36.05);
        assert_eq!(quote_price(0.0, 3.5), 0.0);
        assert_eq!(quote_price(7.3, 2.5), 18.25);
    }

    #[test]
    fn catalog_lookups() {
        let catalog = VehicleCatalog::standard();
        assert_eq!(catalog.all().len(), 2);
        assert_eq!(catalog.get("van-1").unwrap().max_passengers, 7);
        assert_eq!(catalog.by_type(VehicleType::Car).unwrap().price_per_km, 2.5);
        assert!(catalog.get("bus-1").is_none());
    }

    #[test]
    fn vehicle_quote_uses_its_rate() {
        let catalog = VehicleCatalog::standard();
        let quote = catalog.by_type(VehicleType::Van).unwrap().quote(&estimate(10.3));
        assert_eq!(quote.vehicle_id, "van-1");
        assert_eq!(quote.price, 36.05);
        assert_eq!(quote.estimate.distance_km, 10.3);
    }

    #[test]
    fn vehicle_type_parsing() {
        assert_eq!("Car".parse::<VehicleType>(), Ok(VehicleType::Car));
        assert_eq!(" van ".parse::<VehicleType>(), Ok(VehicleType::Van));
        assert!("limo".parse::<VehicleType>().is_err());
        assert_eq!(VehicleType::Van.to_string(), "van");
    }

    #[test]
    fn serializes_with_web_field_names() {
        let catalog = VehicleCatalog::standard();
        let json = serde_json::to_value(catalog.get("car-1").unwrap()).unwrap();
        assert_eq!(json["type"], "car");
        assert_eq!(json["pricePerKm"], 2.5);
        assert_eq!(json["maxPassengers"], 4);
    }
}
