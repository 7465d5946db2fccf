//! Evolves a population of 2-4-1 networks towards XOR without any backprop.
//!
//! Run with `RUST_LOG=debug cargo run --example evolve_xor` to see the operators at work.

use neuroevo::{Dataset, MutationConfig, NeuralNetwork, genetics};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const POPULATION: usize = 60;
const GENERATIONS: usize = 300;
const ELITE: usize = 10;

fn main() -> neuroevo::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let xs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let ys = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];
    let data = Dataset::from_rows(&xs, &ys)?;

    let mut rng = StdRng::seed_from_u64(0);
    let mutation = MutationConfig {
        rate: 0.3,
        strength: 0.5,
    };

    let mut population = (0..POPULATION)
        .map(|_| NeuralNetwork::new_with_rng(2, 4, 1, &mut rng))
        .collect::<neuroevo::Result<Vec<_>>>()?;

    for generation in 0..GENERATIONS {
        for nn in &mut population {
            let mse = nn.evaluate_mse(&data)?;
            nn.set_fitness(1.0 - mse);
        }
        population.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));

        if generation % 50 == 0 {
            log::info!(
                "generation {generation}: best fitness {:.4}, color {:?}",
                population[0].fitness(),
                population[0].display_color()
            );
        }

        let mut next: Vec<NeuralNetwork> = population[..ELITE].iter().map(genetics::copy).collect();
        while next.len() < POPULATION {
            let a = &population[rng.gen_range(0..ELITE)];
            let b = &population[rng.gen_range(0..ELITE)];
            let child = genetics::reproduce(a, b, &mut rng)?;
            next.push(genetics::mutate_with_rng(&child, &mutation, &mut rng)?);
        }
        population = next;
    }

    let best = &population[0];
    for (input, _) in data.iter() {
        log::info!("xor({input:?}) = {:.3}", best.predict(input)?[0]);
    }
    Ok(())
}
