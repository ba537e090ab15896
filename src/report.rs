use serde_json;

use compensation::Measurement;
use host::HostStats;

/// Single-line JSON record of one reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Unix seconds
    pub ts: u64,
    pub temp: f64,
    pub press: f64,
    pub humid: f64,
    pub cpu_temp: f64,
    pub load: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc: Option<String>,
}

/// Rounds the exact binary value, ties to even, like `printf("%.*f")`.
fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

fn non_empty(s: Option<&str>) -> Option<String> {
    match s {
        Some(s) if !s.is_empty() => Some(s.to_string()),
        _ => None,
    }
}

impl Report {
    /// Readings are kept to one decimal, the load average to two.
    pub fn new(
        measurement: &Measurement,
        host: &HostStats,
        ts: u64,
        source: Option<&str>,
        location: Option<&str>,
    ) -> Report {
        Report {
            src: non_empty(source),
            ts: ts,
            temp: round_to(measurement.temperature, 1),
            press: round_to(measurement.pressure, 1),
            humid: round_to(measurement.humidity, 1),
            cpu_temp: round_to(host.cpu_temp, 1),
            load: round_to(host.load, 2),
            loc: non_empty(location),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Human-readable three-line rendering.
pub fn plain_text(m: &Measurement) -> String {
    format!(
        "Temperature: {:.2} °C\nPressure:    {:.2} hPa\nHumidity:    {:.2} %RH",
        m.temperature, m.pressure, m.humidity
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_measurement() -> Measurement {
        Measurement {
            temperature: 25.08,
            pressure: 1006.5325390625,
            humidity: 49.46484375,
        }
    }

    fn host() -> HostStats {
        HostStats {
            cpu_temp: 51.375,
            load: 0.214,
        }
    }

    #[test]
    fn json_with_source_and_location() {
        let report = Report::new(
            &reference_measurement(),
            &host(),
            1_726_561_234,
            Some("ipn:2.1"),
            Some("roof"),
        );
        assert_eq!(
            report.to_json().unwrap(),
            "{\"src\":\"ipn:2.1\",\"ts\":1726561234,\"temp\":25.1,\"press\":1006.5,\
             \"humid\":49.5,\"cpu_temp\":51.4,\"load\":0.21,\"loc\":\"roof\"}"
        );
    }

    #[test]
    fn empty_fields_are_omitted() {
        let report = Report::new(&reference_measurement(), &host(), 7, None, Some(""));
        assert_eq!(
            report.to_json().unwrap(),
            "{\"ts\":7,\"temp\":25.1,\"press\":1006.5,\"humid\":49.5,\"cpu_temp\":51.4,\"load\":0.21}"
        );
    }

    #[test]
    fn rounding_matches_printf() {
        let measurement = Measurement {
            temperature: 20.25,
            pressure: 1006.55,
            humidity: 49.46484375,
        };
        let host = HostStats {
            cpu_temp: 48.25,
            load: 0.125,
        };
        let report = Report::new(&measurement, &host, 7, None, None);
        assert_eq!(report.temp, 20.2);
        assert_eq!(report.press, 1006.5);
        assert_eq!(report.cpu_temp, 48.2);
        assert_eq!(report.load, 0.12);
        assert_eq!(
            report.to_json().unwrap(),
            "{\"ts\":7,\"temp\":20.2,\"press\":1006.5,\"humid\":49.5,\"cpu_temp\":48.2,\"load\":0.12}"
        );
    }

    #[test]
    fn plain_text_uses_two_decimals() {
        assert_eq!(
            plain_text(&reference_measurement()),
            "Temperature: 25.08 °C\nPressure:    1006.53 hPa\nHumidity:    49.46 %RH"
        );
    }
}
