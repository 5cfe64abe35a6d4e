pub mod booking;
pub mod config;
pub mod routing;
pub mod util;
pub mod vehicles;
