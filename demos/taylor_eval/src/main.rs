use anyhow::Result;
use clap::Parser;
use hornpipe_core::{EngineConfig, HornerEngine, StreamEvaluator};
use hornpipe_math::{Fixed, QFormat};

/// Drive the pipelined Taylor evaluator through the x^2 and 5-term e^x
/// scenarios, one sample per step, and print the streamed results next to
/// the exact polynomial values.
#[derive(Parser)]
struct Args {
    /// Total fixed-point width W
    #[arg(long, default_value_t = 32)]
    width: u32,
    /// Fractional bits F
    #[arg(long, default_value_t = 16)]
    frac: u32,
    /// Also print the 5-term-vs-exp() approximation quality table
    #[arg(long)]
    quality: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let format = QFormat::new(args.width, args.frac)?;

    println!("hornpipe taylor_eval  (Q{}.{}, scale = {})", format.width() - format.frac() - 1, format.frac(), format.scale());

    // f(x) = x^2: c0 = 0, c1 = 0, c2 = 1, x0 = 0.
    let square = EngineConfig {
        format,
        order: 2,
        max_order: 7,
        x0: Fixed::ZERO,
        coeffs: pad(format, &[0.0, 0.0, 1.0], 8),
    };
    let xs = [-3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0];
    run_scenario("f(x) = x^2", HornerEngine::new(square)?, &xs, |x| x * x)?;

    // e^x truncated after x^4: c0..c4 = 1, 1, 1/2, 1/6, 1/24.
    let exp5 = EngineConfig {
        format,
        order: 4,
        max_order: 7,
        x0: Fixed::ZERO,
        coeffs: pad(format, &[1.0, 1.0, 0.5, 1.0 / 6.0, 1.0 / 24.0], 8),
    };
    let xs = [-1.0, 0.0, 0.5, 1.0, 2.0, 0.25];
    let p4 = |x: f64| 1.0 + x + x * x / 2.0 + x * x * x / 6.0 + x * x * x * x / 24.0;
    run_scenario("e^x 5-term", HornerEngine::new(exp5)?, &xs, p4)?;

    if args.quality {
        println!("\nApproximation quality: 5-term polynomial vs exp()");
        println!("  {:>6}  {:>12}  {:>12}  {:>10}", "x", "5-term", "exp(x)", "abs err");
        for x in [-1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 2.0] {
            let poly = p4(x);
            let exact = x.exp();
            println!("  {:6.2}  {:12.7}  {:12.7}  {:10.2e}", x, poly, exact, (poly - exact).abs());
        }
    }
    Ok(())
}

fn pad(format: QFormat, coeffs: &[f64], len: usize) -> Vec<Fixed> {
    let mut table: Vec<Fixed> = coeffs.iter().map(|&c| format.from_f64(c)).collect();
    table.resize(len, Fixed::ZERO);
    table
}

fn run_scenario(
    label: &str,
    mut eng: HornerEngine,
    xs: &[f64],
    reference: impl Fn(f64) -> f64,
) -> Result<()> {
    let format = eng.format();
    println!("\n--- {}  (order {}, latency {} steps) ---", label, eng.order(), eng.latency());

    let mut emitted = 0usize;
    for step in 0..xs.len() + eng.latency() {
        if step < xs.len() {
            eng.advance(format.from_f64(xs[step]), true);
        } else {
            eng.advance(Fixed::ZERO, false);
        }
        let (y, valid) = eng.output();
        if valid {
            let x = xs[emitted];
            let got = format.to_f64(y);
            let expected = reference(x);
            println!(
                "  step {:3}  x = {:7.3}  y = {:12.7}  (exact {:12.7}, err {:.3e})",
                step,
                x,
                got,
                expected,
                (got - expected).abs()
            );
            emitted += 1;
        }
    }
    println!("  {} samples in, {} valid samples out", xs.len(), emitted);
    Ok(())
}
