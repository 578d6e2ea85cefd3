//! Noisy glyph classification with a multi-class bit-plane machine.
//!
//! Run with `RUST_LOG=debug` to see per-epoch events from the library.

use std::time::Instant;

use bitplane_tsetlin::{Config, MultiClass, Word, literal_bit, pack_features, utils::rng_from_seed};
use rand::Rng;
use tracing_subscriber::EnvFilter;

const SIDE: usize = 5;
const FEATURES: usize = SIDE * SIDE;

const GLYPHS: [&str; 4] = [
    // 0: ring
    ".###.#...##...##...#.###.",
    // 1: bar
    "..#....#....#....#....#..",
    // 2: cross
    "#...#.#.#...#...#.#.#...#",
    // 3: box
    "######...##...##...######"
];

fn glyph_features(glyph: &str) -> Vec<u8> {
    glyph.bytes().map(|b| (b == b'#') as u8).collect()
}

fn noisy_dataset<R: Rng>(per_class: usize, noise: f32, rng: &mut R) -> (Vec<Vec<Word>>, Vec<usize>) {
    let mut x = Vec::with_capacity(per_class * GLYPHS.len());
    let mut y = Vec::with_capacity(per_class * GLYPHS.len());

    for _ in 0..per_class {
        for (class, glyph) in GLYPHS.iter().enumerate() {
            let mut features = glyph_features(glyph);
            for f in &mut features {
                if rng.random::<f32>() < noise {
                    *f ^= 1;
                }
            }
            x.push(pack_features(&features));
            y.push(class);
        }
    }

    (x, y)
}

fn print_glyph(x: &[Word]) {
    for row in 0..SIDE {
        let line: String = (0..SIDE)
            .map(|col| if literal_bit(x, row * SIDE + col) { '@' } else { '.' })
            .collect();
        println!("  {line}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = rng_from_seed(7);
    let (x_train, y_train) = noisy_dataset(200, 0.05, &mut rng);
    let (x_test, y_test) = noisy_dataset(50, 0.05, &mut rng);

    println!("Example glyph (label = {}):", y_test[0]);
    print_glyph(&x_test[0]);

    let config = Config::builder()
        .clauses(40)
        .features(FEATURES)
        .threshold(15)
        .specificity(3.9)
        .build()?;
    let mut tm = MultiClass::new(config, GLYPHS.len(), 42)?;

    for epoch in 1..=10 {
        let start = Instant::now();
        tm.fit(&x_train, &y_train, 1)?;
        let train_time = start.elapsed();

        let start = Instant::now();
        let accuracy = tm.evaluate(&x_test, &y_test)?;
        let eval_time = start.elapsed();

        println!(
            "Epoch {epoch:>2}: train {:>8.2?}  eval {:>8.2?}  test accuracy {:.1}%",
            train_time,
            eval_time,
            accuracy * 100.0
        );
    }

    let sample = x_test.len() - 1;
    println!("\nTrue label: {}", y_test[sample]);
    println!("Predicted:  {}", tm.predict(&x_test[sample])?);
    print_glyph(&x_test[sample]);

    Ok(())
}
