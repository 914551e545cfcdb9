//! Writes a synthetic `gene,condition,expression` CSV for trying out uploads.
//!
//! Usage: `generate_sample [OUTPUT] [--with-invalid]`
//! (default output: `sample_expression.csv`).

use anyhow::{Context, Result};

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

/// Baseline expression per gene and the fold change applied under each
/// condition.
const GENES: [(&str, f64); 6] = [
    ("BRCA1", 2.5),
    ("TP53", 3.0),
    ("EGFR", 4.0),
    ("MYC", 1.5),
    ("KRAS", 3.5),
    ("PIK3CA", 2.0),
];
const CONDITIONS: [(&str, f64); 3] = [("Normal", 1.0), ("Tumor", 2.2), ("Treated", 0.6)];
const REPLICATES: usize = 3;

fn main() -> Result<()> {
    let mut output_path = String::from("sample_expression.csv");
    let mut with_invalid = false;
    for arg in std::env::args().skip(1) {
        if arg == "--with-invalid" {
            with_invalid = true;
        } else {
            output_path = arg;
        }
    }

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["gene", "condition", "expression"])?;

    let mut rows = 0usize;
    for &(gene, baseline) in &GENES {
        for &(condition, fold) in &CONDITIONS {
            for _ in 0..REPLICATES {
                let value = (baseline * fold + rng.gauss(0.0, 0.4)).max(0.0);
                let expression = format!("{value:.3}");
                writer.write_record([gene, condition, expression.as_str()])?;
                rows += 1;
            }
        }
    }

    // A few rows the upload validator should drop.
    if with_invalid {
        writer.write_record(["BRCA1", "Normal", ""])?;
        writer.write_record(["", "Tumor", "4.2"])?;
        writer.write_record(["TP53", "Tumor", "n/a"])?;
    }

    writer.flush().context("flushing CSV")?;

    println!(
        "Wrote {rows} rows ({} genes x {} conditions x {REPLICATES} replicates) to {output_path}{}",
        GENES.len(),
        CONDITIONS.len(),
        if with_invalid { " plus 3 invalid rows" } else { "" }
    );
    Ok(())
}
