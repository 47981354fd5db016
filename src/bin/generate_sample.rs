use anyhow::{Context, Result};

const OUTPUT: &str = "mock_stock_data.csv";
const SYMBOLS: [(&str, f64); 4] = [
    ("AAPL", 150.0),
    ("GOOG", 140.0),
    ("MSFT", 320.0),
    ("AMZN", 170.0),
];
const DAYS: u32 = 20;

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

/// Write a deterministic mock stock price CSV: a few tickers over a date
/// range with random-walk prices, plus a couple of malformed rows the
/// loader is expected to tolerate.
fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let mut writer =
        csv::Writer::from_path(OUTPUT).with_context(|| format!("creating {OUTPUT}"))?;

    writer.write_record(["Stock", "Date", "Price"])?;

    for (symbol, start) in SYMBOLS {
        let mut price = start;
        for day in 0..DAYS {
            let date = format!("2024-01-{:02}", day + 2);
            price = (price + rng.gauss(0.0, 2.5)).max(1.0);
            let printed = format!("{price:.2}");
            writer.write_record([symbol, date.as_str(), printed.as_str()])?;
        }
    }

    // Rows the loader keeps but flags: a non-numeric price, a blank symbol.
    writer.write_record(["TSLA", "2024-01-02", "N/A"])?;
    writer.write_record(["  ", "2024-01-03", "251.75"])?;

    writer.flush().with_context(|| format!("writing {OUTPUT}"))?;
    println!("Wrote {OUTPUT}");
    Ok(())
}
