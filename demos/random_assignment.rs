//! Random assignment demo: generate a cost matrix, print it, solve it.
//!
//! Run with: cargo run --example random_assignment

use parallel_munkres::HungarianSolver;
use rand::Rng;

fn main() {
    let mut rng = rand::thread_rng();

    let sinks = 6;
    let sources = 6;
    let mut solver = HungarianSolver::new(sinks, sources).expect("non-empty dimensions");

    for source in 0..sources {
        print!("\t   {}", source);
    }
    println!();
    for sink in 0..sinks {
        print!("  {}\t", sink);
        for source in 0..sources {
            let cost: f64 = rng.gen_range(0.0..100.0);
            solver
                .set_cost(sink, source, cost)
                .expect("indices inside declared extent");
            print!("{:.2}\t", cost);
        }
        println!();
    }

    let matches = solver.compute();
    println!("\nsink/source:");
    for (sink, &source) in matches.iter().take(sinks).enumerate() {
        match source {
            Some(source) => println!("{} <- {}", sink, source),
            None => println!("{} <- x", sink),
        }
    }
}
