// Integration tests for the full evaluation pipeline: latency, throughput,
// exactness on exactly-representable polynomials, saturation, and the
// 5-term e^x acceptance scenario.
use hornpipe_core::{EngineConfig, HornerEngine, StreamEvaluator};
use hornpipe_math::{Fixed, QFormat};

fn q16_16() -> QFormat {
    QFormat::new(32, 16).unwrap()
}

fn engine(order: usize, x0: f64, coeffs: &[f64]) -> HornerEngine {
    let format = q16_16();
    let config = EngineConfig {
        format,
        order,
        max_order: coeffs.len() - 1,
        x0: format.from_f64(x0),
        coeffs: coeffs.iter().map(|&c| format.from_f64(c)).collect(),
    };
    HornerEngine::new(config).unwrap()
}

/// Drive `xs` one sample per step, then drain the pipeline with bubbles.
/// Returns the decoded valid outputs in arrival order, also asserting that
/// each one surfaced exactly `latency` steps after its input (query after
/// the advance of step t + order means step t + order + 1 in wall-clock
/// step numbering).
fn run_stream(eng: &mut HornerEngine, xs: &[f64]) -> Vec<f64> {
    let format = eng.format();
    let latency = eng.latency();
    let mut outputs = Vec::new();

    for step in 0..xs.len() + latency {
        if step < xs.len() {
            eng.advance(format.from_f64(xs[step]), true);
        } else {
            eng.advance(Fixed::ZERO, false);
        }
        let (y, valid) = eng.output();
        if valid {
            let expected_step = outputs.len() + latency - 1;
            assert_eq!(
                step, expected_step,
                "output {} surfaced at step {}, expected step {}",
                outputs.len(),
                step,
                expected_step
            );
            outputs.push(format.to_f64(y));
        }
    }
    outputs
}

#[test]
fn test_latency_single_sample() {
    // One present sample into an order-2 pipeline: the output is valid at
    // exactly one step (after advance number `order`, counting from the
    // feeding call), and invalid everywhere else in the window.
    let mut eng = engine(2, 0.0, &[0.0, 0.0, 1.0]);
    let format = eng.format();

    eng.advance(format.from_f64(3.0), true);
    let mut valid_steps = Vec::new();
    if eng.output().1 {
        valid_steps.push(0);
    }
    for step in 1..10 {
        eng.advance(Fixed::ZERO, false);
        if eng.output().1 {
            valid_steps.push(step);
        }
    }
    assert_eq!(valid_steps, vec![eng.order()], "valid at wrong steps");
}

#[test]
fn test_throughput_one_output_per_input() {
    // f(x) = x, fed 50 consecutive samples: exactly 50 valid outputs, in
    // order, no drops or duplicates.
    let mut eng = engine(1, 0.0, &[0.0, 1.0]);
    let xs: Vec<f64> = (0..50).map(|i| (i as f64) * 0.25 - 6.0).collect();

    let ys = run_stream(&mut eng, &xs);
    assert_eq!(ys.len(), xs.len());
    for (x, y) in xs.iter().zip(ys.iter()) {
        assert_eq!(y, x, "identity polynomial distorted {}", x);
    }
}

#[test]
fn test_x_squared_exact() {
    // c0 = 0, c1 = 0, c2 = 1: P(x) = x^2. For binary-rational x both the
    // delta and the single multiply are exact, so the pipeline must
    // reproduce x^2 with zero error.
    let mut eng = engine(2, 0.0, &[0.0, 0.0, 1.0]);
    let xs = [-3.0, -2.0, -1.0, 0.0, 1.0, 1.5, 2.0, 3.0];

    let ys = run_stream(&mut eng, &xs);
    assert_eq!(ys.len(), xs.len());
    for (x, y) in xs.iter().zip(ys.iter()) {
        assert_eq!(*y, x * x, "x^2 mismatch at x = {}", x);
    }
}

#[test]
fn test_exp_five_term_scenario() {
    // The canonical Q16.16 table for e^x truncated after the x^4 term:
    // c0..c4 = {1, 1, 1/2, ~1/6, ~1/24}, padded to max_order 7.
    let format = q16_16();
    let raw_coeffs: [i64; 8] = [65536, 65536, 32768, 10923, 2731, 0, 0, 0];
    let config = EngineConfig {
        format,
        order: 4,
        max_order: 7,
        x0: Fixed::ZERO,
        coeffs: raw_coeffs.iter().map(|&r| Fixed::from_raw(r)).collect(),
    };
    let mut eng = HornerEngine::new(config).unwrap();
    assert_eq!(eng.latency(), 5);

    let xs = [-1.0, 0.0, 0.5, 1.0, 2.0, 0.25];
    let p4 = |x: f64| 1.0 + x + x * x / 2.0 + x * x * x / 6.0 + x * x * x * x / 24.0;
    let tol = 16.0 / format.scale() as f64;

    let ys = run_stream(&mut eng, &xs);
    assert_eq!(ys.len(), xs.len());
    for (x, y) in xs.iter().zip(ys.iter()) {
        let expected = p4(*x);
        assert!(
            (y - expected).abs() <= tol,
            "e^x 5-term at x = {}: got {}, expected {} (tol {})",
            x,
            y,
            expected,
            tol
        );
    }
    // P_4(1) = 65/24.
    assert!((ys[3] - 65.0 / 24.0).abs() <= tol);
}

#[test]
fn test_accumulator_saturates_positive() {
    // c0 sits one unit under SAT_MAX and the Horner product adds ten more:
    // the sum must clamp to SAT_MAX, never wrap negative.
    let format = q16_16();
    let near_max = format.to_f64(Fixed::from_raw(format.max_raw())) - 1.0;
    let mut eng = engine(1, 0.0, &[near_max, 1.0]);

    let mut got = None;
    eng.advance(format.from_f64(10.0), true);
    for _ in 0..eng.latency() {
        eng.advance(Fixed::ZERO, false);
        if eng.output().1 {
            got = Some(eng.output().0);
        }
    }
    let y = got.expect("no valid output");
    assert_eq!(y.raw, format.max_raw(), "positive overflow did not clamp");
}

#[test]
fn test_accumulator_saturates_negative() {
    let format = q16_16();
    let near_min = format.to_f64(Fixed::from_raw(format.min_raw())) + 1.0;
    let mut eng = engine(1, 0.0, &[near_min, 1.0]);

    let mut got = None;
    eng.advance(format.from_f64(-10.0), true);
    for _ in 0..eng.latency() {
        eng.advance(Fixed::ZERO, false);
        if eng.output().1 {
            got = Some(eng.output().0);
        }
    }
    let y = got.expect("no valid output");
    assert_eq!(y.raw, format.min_raw(), "negative overflow did not clamp");
}

#[test]
fn test_bubbles_flow_through() {
    // Alternate present samples and bubbles: every present sample yields
    // exactly one valid output with correct value, every bubble one
    // valid=false slot, same latency for both.
    let mut eng = engine(2, 0.0, &[0.0, 0.0, 1.0]);
    let format = eng.format();
    let xs = [1.0, 2.0, 3.0, 4.0];

    let mut valid_values = Vec::new();
    let mut invalid_count = 0;
    let total_steps = 2 * xs.len() + eng.latency();
    for step in 0..total_steps {
        if step < 2 * xs.len() {
            if step % 2 == 0 {
                eng.advance(format.from_f64(xs[step / 2]), true);
            } else {
                eng.advance(Fixed::ZERO, false);
            }
        } else {
            eng.advance(Fixed::ZERO, false);
        }
        let (y, valid) = eng.output();
        if valid {
            valid_values.push(format.to_f64(y));
        } else {
            invalid_count += 1;
        }
    }

    let expected: Vec<f64> = xs.iter().map(|x| x * x).collect();
    assert_eq!(valid_values, expected, "bubble interleave corrupted outputs");
    assert_eq!(invalid_count, total_steps - xs.len());
}

#[test]
fn test_nonzero_expansion_point() {
    // P(x) = 2 + 3 (x - 1) around x0 = 1: P(4) = 11, P(1) = 2, P(-1) = -4.
    let mut eng = engine(1, 1.0, &[2.0, 3.0]);
    let ys = run_stream(&mut eng, &[4.0, 1.0, -1.0]);
    assert_eq!(ys, vec![11.0, 2.0, -4.0]);
}

#[test]
fn test_independent_engines_share_nothing() {
    // Two engines over different polynomials, advanced round-robin in one
    // thread, produce the same results as if run alone.
    let mut square = engine(2, 0.0, &[0.0, 0.0, 1.0]);
    let mut line = engine(1, 0.0, &[1.0, 1.0]);
    let xs = [1.0, 2.0, 3.0];

    let square_alone = run_stream(&mut engine(2, 0.0, &[0.0, 0.0, 1.0]), &xs);
    let line_alone = run_stream(&mut engine(1, 0.0, &[1.0, 1.0]), &xs);

    let format = q16_16();
    let mut square_out = Vec::new();
    let mut line_out = Vec::new();
    for step in 0..xs.len() + 3 {
        let (x, present) = if step < xs.len() {
            (format.from_f64(xs[step]), true)
        } else {
            (Fixed::ZERO, false)
        };
        square.advance(x, present);
        line.advance(x, present);
        if square.output().1 {
            square_out.push(format.to_f64(square.output().0));
        }
        if line.output().1 {
            line_out.push(format.to_f64(line.output().0));
        }
    }
    assert_eq!(square_out, square_alone);
    assert_eq!(line_out, line_alone);
}
