//! Order Form Routes
//!
//! Server-rendered HTML: the order form on `/` and the prediction result
//! on form submission.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use chrono::{Local, NaiveDate, NaiveTime};
use order_intake::{
    Area, Category, OrderDetails, OrderValidator, Traffic, ValidationError, Vehicle, Weather,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

use crate::AppState;

/// Raw form submission; clock fields arrive as strings from the browser
#[derive(Debug, Deserialize)]
pub struct OrderForm {
    pub agent_age: i64,
    pub agent_rating: f64,
    pub distance_km: f64,
    pub weather: Weather,
    pub traffic: Traffic,
    pub vehicle: Vehicle,
    pub area: Area,
    pub category: Category,
    pub order_date: String,
    pub order_time: String,
}

impl OrderForm {
    /// Parse the clock fields and assemble the order
    fn into_order(self) -> Result<OrderDetails, ValidationError> {
        let order_date = NaiveDate::parse_from_str(&self.order_date, "%Y-%m-%d").map_err(|e| {
            ValidationError::InvalidField {
                field: "order_date",
                reason: e.to_string(),
            }
        })?;
        // Browsers send HH:MM unless a seconds step is set
        let order_time = NaiveTime::parse_from_str(&self.order_time, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(&self.order_time, "%H:%M"))
            .map_err(|e| ValidationError::InvalidField {
                field: "order_time",
                reason: e.to_string(),
            })?;

        Ok(OrderDetails {
            agent_age: self.agent_age,
            agent_rating: self.agent_rating,
            distance_km: self.distance_km,
            weather: self.weather,
            traffic: self.traffic,
            vehicle: self.vehicle,
            area: self.area,
            category: self.category,
            order_date,
            order_time,
        })
    }
}

fn select_field(name: &str, label: &str, options: &[&str], selected: &str) -> String {
    let mut html = format!(
        "<label>{label}<select name=\"{name}\">"
    );
    for option in options {
        let marker = if *option == selected { " selected" } else { "" };
        html.push_str(&format!("<option{marker}>{option}</option>"));
    }
    html.push_str("</select></label>");
    html
}

fn render_form(order: &OrderDetails, error: Option<&str>) -> String {
    let notice = error
        .map(|msg| format!("<p class=\"error\">{msg}</p>"))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Delivery Time Predictor</title></head>
<body>
<h1>Delivery Time Prediction</h1>
<p>Predict the estimated delivery time for an order from agent, traffic, weather, and product details.</p>
{notice}
<form method="post" action="/predict">
<label>Agent Age<input type="number" name="agent_age" min="18" max="65" value="{age}"></label>
<label>Agent Rating<input type="number" name="agent_rating" min="1.0" max="5.0" step="0.1" value="{rating}"></label>
<label>Distance (km)<input type="number" name="distance_km" min="0.1" max="100.0" step="0.1" value="{distance}"></label>
{weather}
{traffic}
{vehicle}
{area}
{category}
<label>Order Date<input type="date" name="order_date" value="{date}"></label>
<label>Order Time<input type="time" name="order_time" value="{time}"></label>
<button type="submit">Predict Delivery Time</button>
</form>
</body>
</html>"#,
        age = order.agent_age,
        rating = order.agent_rating,
        distance = order.distance_km,
        weather = select_field(
            "weather",
            "Weather",
            &Weather::ALL.map(|w| w.as_str()),
            order.weather.as_str()
        ),
        traffic = select_field(
            "traffic",
            "Traffic",
            &Traffic::ALL.map(|t| t.as_str()),
            order.traffic.as_str()
        ),
        vehicle = select_field(
            "vehicle",
            "Vehicle",
            &Vehicle::ALL.map(|v| v.as_str()),
            order.vehicle.as_str()
        ),
        area = select_field(
            "area",
            "Delivery Area",
            &Area::ALL.map(|a| a.as_str()),
            order.area.as_str()
        ),
        category = select_field(
            "category",
            "Product Category",
            &Category::ALL.map(|c| c.as_str()),
            order.category.as_str()
        ),
        date = order.order_date.format("%Y-%m-%d"),
        time = order.order_time.format("%H:%M"),
    )
}

fn render_result(hours: f64, defaulted: usize) -> String {
    let note = if defaulted > 0 {
        format!("<p class=\"note\">{defaulted} feature column(s) were defaulted to 0.</p>")
    } else {
        String::new()
    };
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Delivery Time Predictor</title></head>
<body>
<h1>Delivery Time Prediction</h1>
<p class="success">Estimated Delivery Time: <strong>{hours:.2} hours</strong></p>
{note}
<a href="/">Predict another order</a>
</body>
</html>"#
    )
}

/// Render the order form with defaults and the current clock
pub async fn show_form() -> Html<String> {
    let now = Local::now();
    let order = OrderDetails::template(now.date_naive(), now.time());
    Html(render_form(&order, None))
}

/// Handle a form submission and render the prediction
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    Form(form): Form<OrderForm>,
) -> Response {
    let now = Local::now();

    let order = match form.into_order() {
        Ok(order) => order,
        Err(e) => {
            let fallback = OrderDetails::template(now.date_naive(), now.time());
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(render_form(&fallback, Some(&e.to_string()))),
            )
                .into_response();
        }
    };

    let validation = OrderValidator::default().validate(&order);
    if !validation.valid {
        let message = validation
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(render_form(&order, Some(&message))),
        )
            .into_response();
    }

    match state.runtime.estimate(&order.to_table(now.date_naive())) {
        Ok(estimate) => {
            Html(render_result(estimate.hours, estimate.defaulted_columns.len())).into_response()
        }
        Err(e) => {
            error!("form prediction failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Html(e.to_string())).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_order() -> OrderDetails {
        OrderDetails::template(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        )
    }

    #[test]
    fn test_form_carries_defaults_and_constraints() {
        let html = render_form(&default_order(), None);
        assert!(html.contains("value=\"30\""));
        assert!(html.contains("min=\"18\" max=\"65\""));
        assert!(html.contains("<option selected>Sunny</option>"));
        assert!(html.contains("value=\"2024-01-15\""));
        assert!(html.contains("value=\"09:30\""));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn test_form_shows_error_notice() {
        let html = render_form(&default_order(), Some("agent_age out of range"));
        assert!(html.contains("class=\"error\""));
        assert!(html.contains("agent_age out of range"));
    }

    #[test]
    fn test_result_formats_two_decimals() {
        let html = render_result(4.5, 0);
        assert!(html.contains("Estimated Delivery Time: <strong>4.50 hours</strong>"));
        assert!(!html.contains("defaulted"));
    }

    #[test]
    fn test_result_mentions_defaulted_columns() {
        let html = render_result(3.25, 2);
        assert!(html.contains("2 feature column(s) were defaulted"));
    }

    fn sample_form(time: &str) -> OrderForm {
        OrderForm {
            agent_age: 30,
            agent_rating: 4.0,
            distance_km: 5.0,
            weather: Weather::Sunny,
            traffic: Traffic::Low,
            vehicle: Vehicle::Bike,
            area: Area::Urban,
            category: Category::Electronics,
            order_date: "2024-01-15".to_string(),
            order_time: time.to_string(),
        }
    }

    #[test]
    fn test_into_order_accepts_browser_clock_formats() {
        let order = sample_form("09:30").into_order().unwrap();
        assert_eq!(order.order_time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());

        let order = sample_form("09:30:15").into_order().unwrap();
        assert_eq!(order.order_time, NaiveTime::from_hms_opt(9, 30, 15).unwrap());
    }

    #[test]
    fn test_into_order_rejects_malformed_clock() {
        let err = sample_form("later today").into_order().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidField { field: "order_time", .. }
        ));
    }
}
