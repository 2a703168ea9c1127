//! Order Domain Types

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tabular::{Table, Value};

/// Weather condition at order time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weather {
    #[default]
    Sunny,
    Rainy,
    Cloudy,
    Stormy,
}

impl Weather {
    /// All selectable values, form order
    pub const ALL: [Weather; 4] = [
        Weather::Sunny,
        Weather::Rainy,
        Weather::Cloudy,
        Weather::Stormy,
    ];

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Sunny => "Sunny",
            Weather::Rainy => "Rainy",
            Weather::Cloudy => "Cloudy",
            Weather::Stormy => "Stormy",
        }
    }
}

/// Traffic density on the route
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Traffic {
    #[default]
    Low,
    Medium,
    High,
}

impl Traffic {
    /// All selectable values, form order
    pub const ALL: [Traffic; 3] = [Traffic::Low, Traffic::Medium, Traffic::High];

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Traffic::Low => "Low",
            Traffic::Medium => "Medium",
            Traffic::High => "High",
        }
    }
}

/// Delivery vehicle type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vehicle {
    #[default]
    Bike,
    Car,
    Van,
    Truck,
}

impl Vehicle {
    /// All selectable values, form order
    pub const ALL: [Vehicle; 4] = [Vehicle::Bike, Vehicle::Car, Vehicle::Van, Vehicle::Truck];

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Vehicle::Bike => "Bike",
            Vehicle::Car => "Car",
            Vehicle::Van => "Van",
            Vehicle::Truck => "Truck",
        }
    }
}

/// Delivery area classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Area {
    #[default]
    Urban,
    Metropolitan,
    Rural,
}

impl Area {
    /// All selectable values, form order
    pub const ALL: [Area; 3] = [Area::Urban, Area::Metropolitan, Area::Rural];

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Area::Urban => "Urban",
            Area::Metropolitan => "Metropolitan",
            Area::Rural => "Rural",
        }
    }
}

/// Product category of the order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Electronics,
    Clothing,
    Groceries,
    Other,
}

impl Category {
    /// All selectable values, form order
    pub const ALL: [Category; 4] = [
        Category::Electronics,
        Category::Clothing,
        Category::Groceries,
        Category::Other,
    ];

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Groceries => "Groceries",
            Category::Other => "Other",
        }
    }
}

/// One order as submitted through the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub agent_age: i64,
    pub agent_rating: f64,
    pub distance_km: f64,
    pub weather: Weather,
    pub traffic: Traffic,
    pub vehicle: Vehicle,
    pub area: Area,
    pub category: Category,
    pub order_date: NaiveDate,
    pub order_time: NaiveTime,
}

impl OrderDetails {
    /// Form defaults, with the clock fields supplied by the caller
    pub fn template(order_date: NaiveDate, order_time: NaiveTime) -> Self {
        Self {
            agent_age: 30,
            agent_rating: 4.0,
            distance_km: 5.0,
            weather: Weather::default(),
            traffic: Traffic::default(),
            vehicle: Vehicle::default(),
            area: Area::default(),
            category: Category::default(),
            order_date,
            order_time,
        }
    }

    /// Build the single-row raw table for preprocessing.
    ///
    /// The order date becomes a midnight timestamp. The order time is put
    /// through an `%H:%M:%S` format/parse round-trip (dropping any
    /// sub-second part) and lands on `today`, so the calendar features
    /// derived from it reflect the current date.
    pub fn to_table(&self, today: NaiveDate) -> Table {
        let clock = self.order_time.format("%H:%M:%S").to_string();
        let order_time = NaiveTime::parse_from_str(&clock, "%H:%M:%S").unwrap_or(self.order_time);

        Table::single_row([
            ("Agent_Age", Value::Int(self.agent_age)),
            ("Agent_Rating", Value::Float(self.agent_rating)),
            ("Distance_km", Value::Float(self.distance_km)),
            ("Weather", Value::from(self.weather.as_str())),
            ("Traffic", Value::from(self.traffic.as_str())),
            ("Vehicle", Value::from(self.vehicle.as_str())),
            ("Area", Value::from(self.area.as_str())),
            ("Category", Value::from(self.category.as_str())),
            (
                "Order_Date",
                Value::Timestamp(self.order_date.and_time(NaiveTime::MIN)),
            ),
            ("Order_Time", Value::Timestamp(today.and_time(order_time))),
        ])
    }
}
