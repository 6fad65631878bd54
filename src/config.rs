//! Runtime configuration resolved from CLI flags and the environment

use reqwest::Url;

use crate::api::OpenWeatherClient;
use crate::error::ConfigError;
use crate::geolocation::{LocationSource, IP_LOOKUP_ENDPOINT};
use crate::state::{Coordinates, Units};

/// Environment variable holding the provider credential
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

#[derive(Clone, Debug)]
pub struct LookupConfig {
    /// Not validated; an empty key is sent as-is and rejected upstream
    pub api_key: String,
    pub endpoint: Url,
    pub units: Units,
    pub location: LocationSource,
}

impl LookupConfig {
    /// Flag value wins over the environment
    pub fn resolve_api_key(flag: Option<String>) -> String {
        flag.or_else(|| std::env::var(API_KEY_ENV).ok())
            .unwrap_or_default()
    }

    /// Parse `--endpoint` once at startup.
    pub fn parse_endpoint(endpoint: &str) -> Result<Url, ConfigError> {
        Url::parse(endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }

    /// `--lat/--lon` pin the location, `--no-locate` disables it, otherwise IP lookup.
    pub fn location_source(
        lat: Option<f64>,
        lon: Option<f64>,
        no_locate: bool,
        locate_endpoint: Option<String>,
    ) -> LocationSource {
        if no_locate {
            return LocationSource::Disabled;
        }
        match (lat, lon) {
            (Some(lat), Some(lon)) => LocationSource::Fixed(Coordinates { lat, lon }),
            _ => LocationSource::IpLookup {
                endpoint: locate_endpoint.unwrap_or_else(|| IP_LOOKUP_ENDPOINT.to_string()),
            },
        }
    }

    pub fn weather_client(&self) -> OpenWeatherClient {
        OpenWeatherClient::new(self.endpoint.clone(), self.api_key.clone(), self.units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::OPENWEATHER_ENDPOINT;

    #[test]
    fn test_location_source_precedence() {
        assert_eq!(
            LookupConfig::location_source(Some(1.0), Some(2.0), true, None),
            LocationSource::Disabled
        );
        assert_eq!(
            LookupConfig::location_source(Some(1.0), Some(2.0), false, None),
            LocationSource::Fixed(Coordinates { lat: 1.0, lon: 2.0 })
        );
        assert_eq!(
            LookupConfig::location_source(Some(1.0), None, false, None),
            LocationSource::default()
        );
    }

    #[test]
    fn test_endpoint_is_validated_up_front() {
        let url = LookupConfig::parse_endpoint(OPENWEATHER_ENDPOINT).unwrap();
        assert_eq!(url.host_str(), Some("api.openweathermap.org"));

        let err = LookupConfig::parse_endpoint("not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn test_flag_api_key_wins() {
        assert_eq!(LookupConfig::resolve_api_key(Some("flag".into())), "flag");
    }
}
