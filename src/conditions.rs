//! Provider icon codes → condition categories → glyphs
//!
//! OpenWeatherMap icon codes are two digits plus a day/night suffix
//! (`01d`, `10n`, ...). Only the digits decide the category.

/// Weather condition categories
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeatherCondition {
    ClearSky,
    ClearNight,
    PartlyCloudy,
    Cloudy,
    Rain,
    Showers,
    Thunderstorm,
    Snow,
    Mist,
    Unknown,
}

impl WeatherCondition {
    /// Map a provider icon code to a condition
    pub fn from_icon(icon: &str) -> Self {
        let night = icon.ends_with('n');
        match icon.get(..2) {
            Some("01") if night => WeatherCondition::ClearNight,
            Some("01") => WeatherCondition::ClearSky,
            Some("02") => WeatherCondition::PartlyCloudy,
            Some("03") | Some("04") => WeatherCondition::Cloudy,
            Some("09") => WeatherCondition::Showers,
            Some("10") => WeatherCondition::Rain,
            Some("11") => WeatherCondition::Thunderstorm,
            Some("13") => WeatherCondition::Snow,
            Some("50") => WeatherCondition::Mist,
            _ => WeatherCondition::Unknown,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            WeatherCondition::ClearSky => "\u{2600}\u{fe0f}",
            WeatherCondition::ClearNight => "\u{1f319}",
            WeatherCondition::PartlyCloudy => "\u{26c5}",
            WeatherCondition::Cloudy | WeatherCondition::Unknown => "\u{2601}\u{fe0f}",
            WeatherCondition::Showers => "\u{1f327}\u{fe0f}",
            WeatherCondition::Rain => "\u{1f326}\u{fe0f}",
            WeatherCondition::Thunderstorm => "\u{26c8}\u{fe0f}",
            WeatherCondition::Snow => "\u{2744}\u{fe0f}",
            WeatherCondition::Mist => "\u{1f32b}\u{fe0f}",
        }
    }
}

/// Emoji for a provider icon code
pub fn condition_emoji(icon: &str) -> &'static str {
    WeatherCondition::from_icon(icon).emoji()
}
