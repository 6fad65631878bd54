//! Platform location sources
//!
//! A terminal has no geolocation prompt, so "where am I" is answered by one
//! of: coordinates given on the command line, an IP geolocation service, or
//! nothing at all (reported as unsupported).

use serde::Deserialize;

use crate::error::LocationError;
use crate::state::Coordinates;

pub const IP_LOOKUP_ENDPOINT: &str = "http://ip-api.com/json/?fields=status,message,lat,lon";

#[derive(Clone, Debug, PartialEq)]
pub enum LocationSource {
    /// Always report these coordinates
    Fixed(Coordinates),
    /// Ask an ip-api compatible service
    IpLookup { endpoint: String },
    /// Location capability switched off
    Disabled,
}

impl Default for LocationSource {
    fn default() -> Self {
        LocationSource::IpLookup {
            endpoint: IP_LOOKUP_ENDPOINT.to_string(),
        }
    }
}

impl LocationSource {
    pub async fn locate(&self) -> Result<Coordinates, LocationError> {
        match self {
            LocationSource::Fixed(coords) => Ok(*coords),
            LocationSource::Disabled => Err(LocationError::Unsupported),
            LocationSource::IpLookup { endpoint } => {
                tracing::debug!(%endpoint, "looking up location by IP");
                let response = reqwest::get(endpoint)
                    .await
                    .map_err(|e| LocationError::Unavailable(e.to_string()))?;
                let body = response
                    .text()
                    .await
                    .map_err(|e| LocationError::Unavailable(e.to_string()))?;
                interpret_ip_lookup(&body)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

/// Parse an ip-api style body: `{status, lat, lon}` or `{status: "fail", message}`.
pub fn interpret_ip_lookup(body: &str) -> Result<Coordinates, LocationError> {
    let data: IpLookupResponse =
        serde_json::from_str(body).map_err(|e| LocationError::Unavailable(e.to_string()))?;

    if data.status != "success" {
        let reason = data.message.unwrap_or(data.status);
        return Err(LocationError::Unavailable(reason));
    }

    match (data.lat, data.lon) {
        (Some(lat), Some(lon)) => Ok(Coordinates { lat, lon }),
        _ => Err(LocationError::Unavailable("response had no coordinates".into())),
    }
}
