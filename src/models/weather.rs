use serde::{Deserialize, Serialize};
use serde_json::Number;

pub const WIND_SPEED_UNIT: &str = "м/с";

#[derive(Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
}

/// Normalized weather for one city, as returned to callers and stored in the cache.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct WeatherRecord {
    #[serde(rename = "город")]
    pub city: String,
    #[serde(rename = "температура")]
    pub temperature: String,
    #[serde(rename = "влажность")]
    pub humidity: String,
    #[serde(rename = "погода")]
    pub description: String,
    #[serde(rename = "скорость_ветра")]
    pub wind_speed: String,
}

// OpenWeatherMap /data/2.5/weather payload, only the fields we read.
#[derive(Deserialize, Debug)]
pub struct OwCurrentResponse {
    pub name: String,
    pub main: OwMain,
    pub weather: Vec<OwCondition>,
    pub wind: OwWind,
}

#[derive(Deserialize, Debug)]
pub struct OwMain {
    pub temp: Number,
    pub humidity: Number,
}

#[derive(Deserialize, Debug)]
pub struct OwCondition {
    pub description: String,
}

#[derive(Deserialize, Debug)]
pub struct OwWind {
    pub speed: Number,
}

impl OwCurrentResponse {
    /// Returns `None` when the payload carries no weather condition.
    pub fn into_record(self) -> Option<WeatherRecord> {
        let condition = self.weather.into_iter().next()?;

        Some(WeatherRecord {
            city: self.name,
            temperature: format!("{}°C", self.main.temp),
            humidity: format!("{}%", self.main.humidity),
            description: capitalize(&condition.description),
            wind_speed: format!("{} {WIND_SPEED_UNIT}", self.wind.speed),
        })
    }
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn capitalize_matches_sentence_case() {
        assert_eq!(capitalize("clear sky"), "Clear sky");
        assert_eq!(capitalize("ясно"), "Ясно");
        assert_eq!(capitalize("HEAVY RAIN"), "Heavy rain");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn upstream_payload_maps_to_record() {
        let payload = json!({
            "name": "Paris",
            "main": {"temp": 21.5, "humidity": 60, "pressure": 1012},
            "weather": [{"description": "clear sky"}, {"description": "mist"}],
            "wind": {"speed": 3.4, "deg": 200}
        });
        let parsed: OwCurrentResponse = serde_json::from_value(payload).unwrap();
        let record = parsed.into_record().unwrap();

        assert_eq!(record.city, "Paris");
        assert_eq!(record.temperature, "21.5°C");
        assert_eq!(record.humidity, "60%");
        assert_eq!(record.description, "Clear sky");
        assert_eq!(record.wind_speed, "3.4 м/с");
    }

    #[test]
    fn empty_condition_list_has_no_record() {
        let payload = json!({
            "name": "Paris",
            "main": {"temp": 1, "humidity": 60},
            "weather": [],
            "wind": {"speed": 0}
        });
        let parsed: OwCurrentResponse = serde_json::from_value(payload).unwrap();
        assert!(parsed.into_record().is_none());
    }

    #[test]
    fn record_serializes_with_display_keys() {
        let record = WeatherRecord {
            city: "Paris".into(),
            temperature: "21.5°C".into(),
            humidity: "60%".into(),
            description: "Clear sky".into(),
            wind_speed: "3.4 м/с".into(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "город": "Paris",
                "температура": "21.5°C",
                "влажность": "60%",
                "погода": "Clear sky",
                "скорость_ветра": "3.4 м/с"
            })
        );
    }
}
