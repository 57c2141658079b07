use std::io::Write;

use anyhow::{Context, Result};

/// Peak of height `height` centred on `centre` with width `width`.
fn peak(x: f64, centre: f64, width: f64, height: f64) -> f64 {
    let z = (x - centre) / width;
    height * (-0.5 * z * z).exp()
}

/// Gaussian peaks on a sloped linear baseline, plus noise.
fn generate_spectrum(
    wavenumbers: &[f64],
    peaks: &[(f64, f64, f64)],
    baseline: (f64, f64),
    noise_level: f64,
    rng: &mut NoiseRng,
) -> Vec<f64> {
    let (slope, intercept) = baseline;
    wavenumbers
        .iter()
        .map(|&wn| {
            let signal: f64 = peaks
                .iter()
                .map(|&(mu, sigma, amp)| peak(wn, mu, sigma, amp))
                .sum();
            signal + slope * wn + intercept + rng.gauss(noise_level)
        })
        .collect()
}

/// Seeded splitmix64 noise source; only Gaussian draws are needed here.
struct NoiseRng(u64);

impl NoiseRng {
    fn uniform(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        ((z ^ (z >> 31)) >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller, standard deviation `sigma` around zero.
    fn gauss(&mut self, sigma: f64) -> f64 {
        let u1 = self.uniform().max(1e-15);
        let u2 = self.uniform();
        sigma * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = NoiseRng(42);

    // Wavenumbers: 400 → 3998, step 2
    let wavenumbers: Vec<f64> = (0..1800).map(|i| 400.0 + i as f64 * 2.0).collect();
    let peaks = [(1050.0, 40.0, 0.8), (1650.0, 30.0, 0.5), (2900.0, 60.0, 1.1)];
    let baseline = (1.5e-4, 0.2);
    let y = generate_spectrum(&wavenumbers, &peaks, baseline, 0.01, &mut rng);

    // Whitespace-delimited, no header
    let txt_path = "sample_baseline.txt";
    let mut txt = std::io::BufWriter::new(
        std::fs::File::create(txt_path).with_context(|| format!("creating {txt_path}"))?,
    );
    for (x, y) in wavenumbers.iter().zip(&y) {
        writeln!(txt, "{x:.4} {y:.8}").context("writing text sample")?;
    }
    txt.flush().context("flushing text sample")?;

    // CSV with header
    let csv_path = "sample_baseline.csv";
    let mut writer = csv::Writer::from_path(csv_path).with_context(|| format!("creating {csv_path}"))?;
    writer.write_record(["wavenumber", "intensity"])?;
    for (x, y) in wavenumbers.iter().zip(&y) {
        writer.write_record([format!("{x:.4}"), format!("{y:.8}")])?;
    }
    writer.flush().context("flushing CSV sample")?;

    log::info!("Wrote {} samples to {txt_path} and {csv_path}", wavenumbers.len());
    println!(
        "Wrote {} samples to {txt_path} and {csv_path} (baseline y = {} x + {})",
        wavenumbers.len(),
        baseline.0,
        baseline.1
    );
    Ok(())
}
