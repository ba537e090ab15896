//! CPU temperature and load of the machine the sensor hangs off.

use std::fs;
use std::path::Path;

pub const THERMAL_ZONE: &'static str = "/sys/class/thermal/thermal_zone0/temp";
pub const LOADAVG: &'static str = "/proc/loadavg";

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HostStats {
    /// Degrees Celsius
    pub cpu_temp: f64,
    /// 1-minute load average
    pub load: f64,
}

impl HostStats {
    /// Reads both values; anything unreadable is reported as 0.0.
    pub fn read() -> HostStats {
        HostStats::read_from(Path::new(THERMAL_ZONE), Path::new(LOADAVG))
    }

    pub fn read_from(thermal_zone: &Path, loadavg: &Path) -> HostStats {
        HostStats {
            cpu_temp: read_value(thermal_zone, parse_thermal_zone).unwrap_or(0.0),
            load: read_value(loadavg, parse_loadavg).unwrap_or(0.0),
        }
    }
}

fn read_value(path: &Path, parse: fn(&str) -> Option<f64>) -> Option<f64> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let value = parse(&contents);
            if value.is_none() {
                debug!("Unparsable contents in {}: {:?}", path.display(), contents);
            }
            value
        }
        Err(e) => {
            debug!("Can't read {}: {}", path.display(), e);
            None
        }
    }
}

/// Thermal zones report millidegrees.
pub fn parse_thermal_zone(contents: &str) -> Option<f64> {
    contents
        .split_whitespace()
        .next()
        .and_then(|s| s.parse::<i64>().ok())
        .map(|millis| millis as f64 / 1000.0)
}

pub fn parse_loadavg(contents: &str) -> Option<f64> {
    contents
        .split_whitespace()
        .next()
        .and_then(|s| s.parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs::File;
    use std::io::Write;
    use std::process;

    #[test]
    fn thermal_zone_is_millidegrees() {
        assert_eq!(parse_thermal_zone("51375\n"), Some(51.375));
        assert_eq!(parse_thermal_zone("-2500"), Some(-2.5));
        assert_eq!(parse_thermal_zone(""), None);
        assert_eq!(parse_thermal_zone("hot"), None);
    }

    #[test]
    fn loadavg_takes_first_field() {
        assert_eq!(parse_loadavg("0.21 0.30 0.25 1/123 4567\n"), Some(0.21));
        assert_eq!(parse_loadavg("\n"), None);
    }

    #[test]
    fn unreadable_files_read_as_zero() {
        let dir = env::temp_dir();
        let missing = dir.join(format!("bme280-missing-{}", process::id()));
        let loadavg = dir.join(format!("bme280-loadavg-{}", process::id()));
        File::create(&loadavg)
            .and_then(|mut f| f.write_all(b"1.50 0.30 0.25 1/123 4567\n"))
            .unwrap();

        let stats = HostStats::read_from(&missing, &loadavg);
        fs::remove_file(&loadavg).unwrap();
        assert_eq!(
            stats,
            HostStats {
                cpu_temp: 0.0,
                load: 1.5,
            }
        );
    }
}
