extern crate bme280_snapshot;
extern crate docopt;
extern crate env_logger;
extern crate i2cdev;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

use docopt::Docopt;

use std::error::Error;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(target_os = "linux")]
use i2cdev::linux::*;

use bme280_snapshot::host::HostStats;
use bme280_snapshot::report::{plain_text, Report};
use bme280_snapshot::*;

const USAGE: &'static str = "
Reading BME280 sensor value

Usage:
  bme280 [<device>] [--address=<addr>] [--json] [--source=<src>] [--location=<loc>] [--verbose]
  bme280 (-h | --help)
  bme280 (-v | --version)

Options:
  -h --help            Show this help text.
  -a --address=<addr>  I2C device address, decimal or 0x-prefixed hex [default: 0x76].
  --json               Print one JSON line, including CPU temperature and load.
  --source=<src>       Source identifier stored in the JSON line.
  --location=<loc>     Location stored in the JSON line.
  --verbose            Log debug output.
  -v --version         Show version.
";

const DEFAULT_DEVICE: &'static str = "/dev/i2c-1";

#[derive(Debug, Deserialize)]
struct Args {
    arg_device: Option<String>,
    flag_address: String,
    flag_json: bool,
    flag_source: Option<String>,
    flag_location: Option<String>,
    flag_verbose: bool,
    flag_version: bool,
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn unix_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(target_os = "linux")]
fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let address = parse_address(&args.flag_address)
        .map_err(|e| format!("invalid I2C address {:?}: {}", args.flag_address, e))?;
    let device = args
        .arg_device
        .clone()
        .unwrap_or_else(|| DEFAULT_DEVICE.to_string());

    let dev = LinuxI2CDevice::new(&device, address).map_err(|e| {
        error!("Can't open {} at {:#04x}", device, address);
        TransportError::from(e)
    })?;
    // The device is closed when `bme280` drops, on every path out of here.
    let mut bme280 = BME280::new(dev, Config::default())?;
    if bme280.is_bme280() && !args.flag_json {
        println!(
            "BME280 detected (chip-id {:#04x}) at {:#04x} on {}",
            bme280.chip_id(),
            address,
            device
        );
    }

    bme280.wait_for_measurement();
    let measurement = bme280.measure()?;
    info!("Measurement: {:?}", measurement);

    if args.flag_json {
        let report = Report::new(
            &measurement,
            &HostStats::read(),
            unix_time(),
            args.flag_source.as_ref().map(|s| s.as_str()),
            args.flag_location.as_ref().map(|s| s.as_str()),
        );
        println!("{}", report.to_json()?);
    } else {
        println!("{}", plain_text(&measurement));
    }
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn main() {
    println!("This program can run only on Linux")
}

#[cfg(target_os = "linux")]
fn main() {
    let args: Args = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    if args.flag_version {
        println!("bme280 {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    init_logging(args.flag_verbose);

    if let Err(e) = run(&args) {
        error!("{}", e);
        eprintln!("bme280: {}", e);
        process::exit(1);
    }
}
