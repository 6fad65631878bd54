//! OpenWeatherMap current-conditions client

use reqwest::{StatusCode, Url};
use serde::Deserialize;

use crate::error::LookupError;
use crate::state::{CityQuery, Units, WeatherSnapshot};

pub const OPENWEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    #[serde(default)]
    name: String,
    main: MainReadings,
    #[serde(default)]
    visibility: Option<f64>,
    wind: Wind,
    #[serde(default)]
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
    #[serde(default)]
    deg: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

impl From<CurrentResponse> for WeatherSnapshot {
    fn from(data: CurrentResponse) -> Self {
        let (description, icon) = data
            .weather
            .into_iter()
            .next()
            .map(|c| (c.description, c.icon))
            .unwrap_or_default();

        WeatherSnapshot {
            name: data.name,
            temperature: data.main.temp,
            feels_like: data.main.feels_like,
            temp_min: data.main.temp_min,
            temp_max: data.main.temp_max,
            humidity: data.main.humidity.round().clamp(0.0, 100.0) as u8,
            pressure: data.main.pressure,
            visibility: data.visibility,
            wind_speed: data.wind.speed,
            wind_deg: data.wind.deg,
            description,
            icon,
        }
    }
}

// ============================================================================
// Client
// ============================================================================

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
    units: Units,
}

impl OpenWeatherClient {
    pub fn new(endpoint: Url, api_key: impl Into<String>, units: Units) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key: api_key.into(),
            units,
        }
    }

    /// Full request URL, credential included
    pub fn request_url(&self, query: &CityQuery) -> Url {
        let mut params: Vec<(&str, String)> = match query {
            CityQuery::City(city) => vec![("q", city.clone())],
            CityQuery::Coordinates(coords) => {
                vec![("lat", coords.lat.to_string()), ("lon", coords.lon.to_string())]
            }
        };
        params.push(("appid", self.api_key.clone()));
        params.push(("units", self.units.as_param().to_string()));

        let mut url = self.endpoint.clone();
        url.query_pairs_mut().extend_pairs(&params);
        url
    }

    /// Fetch current conditions. Every failure mode maps onto `LookupError`.
    pub async fn fetch_current(&self, query: &CityQuery) -> Result<WeatherSnapshot, LookupError> {
        let url = self.request_url(query);
        tracing::debug!(?query, units = self.units.as_param(), "fetching current weather");

        let response = self.client.get(url).send().await.map_err(|e| {
            let e = e.without_url();
            tracing::warn!(error = %e, "weather request failed");
            LookupError::Network(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LookupError::Network(e.without_url().to_string()))?;

        let result = interpret_response(status, &body);
        match &result {
            Ok(snapshot) => tracing::info!(%status, location = %snapshot.name, "weather loaded"),
            Err(error) => tracing::warn!(%status, %error, "weather lookup failed"),
        }
        result
    }
}

/// Map a provider status + body onto a snapshot or a typed error.
pub fn interpret_response(status: StatusCode, body: &str) -> Result<WeatherSnapshot, LookupError> {
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|e| e.message);
        return Err(LookupError::provider(message));
    }

    serde_json::from_str::<CurrentResponse>(body)
        .map(WeatherSnapshot::from)
        .map_err(|e| LookupError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FALLBACK_LOOKUP_MESSAGE;
    use crate::state::Coordinates;
    use pretty_assertions::assert_eq;

    const NEW_YORK: &str = r#"{
        "name": "New York",
        "main": { "temp": 70, "humidity": 50, "temp_max": 75, "temp_min": 65, "feels_like": 68, "pressure": 1012 },
        "weather": [{ "description": "clear sky", "icon": "01d" }],
        "visibility": 10000,
        "wind": { "speed": 10 }
    }"#;

    fn client(units: Units) -> OpenWeatherClient {
        let endpoint = Url::parse(OPENWEATHER_ENDPOINT).unwrap();
        OpenWeatherClient::new(endpoint, "secret", units)
    }

    #[test]
    fn test_success_body_maps_to_snapshot() {
        let snapshot = interpret_response(StatusCode::OK, NEW_YORK).unwrap();

        assert_eq!(
            snapshot,
            WeatherSnapshot {
                name: "New York".into(),
                temperature: 70.0,
                feels_like: 68.0,
                temp_min: 65.0,
                temp_max: 75.0,
                humidity: 50,
                pressure: 1012.0,
                visibility: Some(10000.0),
                wind_speed: 10.0,
                wind_deg: None,
                description: "clear sky".into(),
                icon: "01d".into(),
            }
        );
    }

    #[test]
    fn test_missing_conditions_list_is_tolerated() {
        let body = r#"{
            "name": "Nowhere",
            "main": { "temp": 1, "humidity": 2, "temp_max": 3, "temp_min": 4, "feels_like": 5, "pressure": 6 },
            "wind": { "speed": 7, "deg": 270 }
        }"#;

        let snapshot = interpret_response(StatusCode::OK, body).unwrap();
        assert_eq!(snapshot.description, "");
        assert_eq!(snapshot.visibility, None);
        assert_eq!(snapshot.wind_deg, Some(270.0));
    }

    #[test]
    fn test_fractional_humidity_is_rounded() {
        let body = r#"{
            "name": "Lima",
            "main": { "temp": 60, "humidity": 82.6, "temp_max": 62, "temp_min": 58, "feels_like": 59, "pressure": 1014 },
            "wind": { "speed": 4 }
        }"#;

        let snapshot = interpret_response(StatusCode::OK, body).unwrap();
        assert_eq!(snapshot.humidity, 83);
        assert_eq!(snapshot.name, "Lima");
    }

    #[test]
    fn test_provider_error_message_is_used() {
        let err = interpret_response(
            StatusCode::NOT_FOUND,
            r#"{"cod":"404","message":"city not found"}"#,
        )
        .unwrap_err();

        assert_eq!(
            err,
            LookupError::Provider {
                message: "city not found".into()
            }
        );
    }

    #[test]
    fn test_unreadable_error_body_falls_back() {
        for body in ["<html>bad gateway</html>", "{}", r#"{"message": ""}"#] {
            let err = interpret_response(StatusCode::BAD_GATEWAY, body).unwrap_err();
            assert_eq!(err.to_string(), FALLBACK_LOOKUP_MESSAGE);
        }
    }

    #[test]
    fn test_malformed_success_body_is_parse_error() {
        let err = interpret_response(StatusCode::OK, r#"{"name": "X"}"#).unwrap_err();
        assert!(matches!(err, LookupError::Parse(_)));
        assert_eq!(err.to_string(), FALLBACK_LOOKUP_MESSAGE);
    }

    #[test]
    fn test_city_url_shape() {
        let url = client(Units::Imperial)
            .request_url(&CityQuery::City("New York".into()));

        assert_eq!(
            url.as_str(),
            "https://api.openweathermap.org/data/2.5/weather?q=New+York&appid=secret&units=imperial"
        );
    }

    #[test]
    fn test_empty_city_is_still_sent() {
        let url = client(Units::Imperial)
            .request_url(&CityQuery::City(String::new()));

        assert!(url.query().unwrap().starts_with("q=&"));
    }

    #[test]
    fn test_coordinate_url_shape() {
        let url = client(Units::Metric)
            .request_url(&CityQuery::Coordinates(Coordinates {
                lat: 51.5,
                lon: -0.12,
            }));

        assert_eq!(
            url.query(),
            Some("lat=51.5&lon=-0.12&appid=secret&units=metric")
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_network_error() {
        let endpoint = Url::parse("http://127.0.0.1:9/weather").unwrap();
        let client = OpenWeatherClient::new(endpoint, "secret", Units::Imperial);

        let err = client
            .fetch_current(&CityQuery::City("Paris".into()))
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::Network(_)));
        assert!(!err.to_string().is_empty());
    }
}
