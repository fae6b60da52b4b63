//! Writes a synthetic hourly weather CSV in the open-meteo export layout.
//!
//! Usage: `generate_sample [OUTPUT] [MONTHS]`
//! (defaults: `data/open-meteo-subset.csv`, 12 months starting 2020-01-01).

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, Months, NaiveDate, Timelike};

const HEADERS: [&str; 6] = [
    "time",
    "temperature_2m (°C)",
    "precipitation (mm)",
    "wind_speed_10m (m/s)",
    "wind_gusts_10m (m/s)",
    "wind_direction_10m (°)",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Weather state carried from one hour to the next.
struct Weather {
    temp_anomaly: f64,
    wind: f64,
    direction: f64,
    raining: bool,
}

impl Weather {
    fn step(&mut self, rng: &mut SimpleRng, day_of_year: f64, hour: f64) -> [f64; 5] {
        use std::f64::consts::PI;

        // Seasonal cycle peaking mid-July, daily cycle peaking mid-afternoon.
        let seasonal = 6.5 - 8.5 * (2.0 * PI * (day_of_year + 10.0) / 366.0).cos();
        let daily = 2.5 * (2.0 * PI * (hour - 9.0) / 24.0).sin();
        self.temp_anomaly = 0.95 * self.temp_anomaly + rng.gauss(0.0, 0.35);
        let temperature = seasonal + daily + self.temp_anomaly;

        if rng.next_f64() < if self.raining { 0.15 } else { 0.05 } {
            self.raining = !self.raining;
        }
        let precipitation = if self.raining {
            (rng.gauss(0.8, 0.7)).max(0.0)
        } else {
            0.0
        };

        self.wind = (0.9 * self.wind + 0.1 * 4.5 + rng.gauss(0.0, 0.6)).max(0.0);
        let gusts = self.wind * (1.6 + 0.3 * rng.next_f64());
        self.direction = (self.direction + rng.gauss(0.0, 12.0)).rem_euclid(360.0);

        [
            round1(temperature),
            round1(precipitation),
            round1(self.wind),
            round1(gusts),
            self.direction.round(),
        ]
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let output_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data").join("open-meteo-subset.csv"));
    let months: u32 = match args.next() {
        Some(m) => m.parse().context("MONTHS must be a positive integer")?,
        None => 12,
    };

    let start = NaiveDate::from_ymd_opt(2020, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .context("invalid start date")?;
    let end = start
        .checked_add_months(Months::new(months))
        .context("MONTHS out of range")?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    writer.write_record(HEADERS)?;

    let mut rng = SimpleRng::new(42);
    let mut weather = Weather {
        temp_anomaly: 0.0,
        wind: 4.0,
        direction: 220.0,
        raining: false,
    };

    let mut rows = 0usize;
    let mut ts = start;
    while ts < end {
        let day_of_year = ts.date().ordinal0() as f64;
        let hour = ts.time().hour() as f64;
        let values = weather.step(&mut rng, day_of_year, hour);

        let mut record = vec![ts.format("%Y-%m-%dT%H:%M").to_string()];
        record.extend(values.iter().map(|v| v.to_string()));
        writer.write_record(&record)?;

        rows += 1;
        ts += Duration::hours(1);
    }
    writer.flush()?;

    println!("Wrote {rows} hourly rows to {}", output_path.display());
    Ok(())
}
