//! # Assignment demo
//!
//! Assigns four workers to four jobs and prints the cost matrix, the chosen
//! pairs and the solver statistics. Set `RUST_LOG=munkres_core=trace` to watch
//! every step transition.

use munkres_core::{CostMatrix, Munkres};
use tracing_subscriber::EnvFilter;

const WORKERS: [&str; 4] = ["ana", "bo", "cy", "di"];
const JOBS: [&str; 4] = ["paint", "wire", "plumb", "tile"];

fn main() -> Result<(), munkres_core::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let costs = CostMatrix::from_rows(&[
        [82.0, 83.0, 69.0, 92.0],
        [77.0, 37.0, 49.0, 92.0],
        [11.0, 69.0, 5.0, 86.0],
        [8.0, 9.0, 98.0, 23.0],
    ])?;

    println!("cost matrix:\n{}", costs.render());

    let solver = Munkres::default();
    let assignment = solver.assign(&costs)?;

    for (worker, job) in assignment.pairs() {
        println!(
            "  {:<4} -> {:<6} ({})",
            WORKERS[worker],
            JOBS[job],
            costs.get(worker, job)
        );
    }
    println!(
        "total cost {} ({} augmentations, {} adjustments)",
        assignment.total_cost, assignment.augmentations, assignment.adjustments
    );
    Ok(())
}
