use clap::Parser;
use rand::{Rng, SeedableRng, rngs::StdRng};

use ntree::{
    ForceSettings, Octree, PointMass, Vector3,
    force::{direct_accelerations, total_potential_energy},
};

/// Approximate gravitational accelerations of a random body cloud with a
/// Barnes-Hut octree.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of bodies
    #[arg(short = 'n', long, default_value_t = 1000)]
    bodies: usize,

    /// Opening tolerance; nodes are opened while width > tolerance * distance
    #[arg(long, default_value_t = ForceSettings::DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Softening length
    #[arg(short = 'e', long, default_value_t = 0.0)]
    softening: f64,

    /// Seed for the body cloud
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Use the direct O(n^2) sum instead of the tree
    #[arg(long)]
    no_tree: bool,

    /// Query the tree from the rayon thread pool
    #[arg(long)]
    parallel: bool,

    /// Compare tree accelerations against the direct sum
    #[arg(long)]
    compare: bool,

    /// Print one acceleration per line
    #[arg(long)]
    print: bool,
}

fn init_logger() {
    env_logger::init();
}

fn random_bodies(n: usize, seed: u64) -> Vec<PointMass> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mass = 1.0 / n.max(1) as f64;
    (0..n)
        .map(|_| {
            let position = Vector3::new(
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            );
            PointMass::new(position, mass)
        })
        .collect()
}

fn max_relative_error(approx: &[Vector3], exact: &[Vector3]) -> f64 {
    approx
        .iter()
        .zip(exact)
        .map(|(a, e)| (*a - *e).magnitude() / e.magnitude().max(f64::MIN_POSITIVE))
        .fold(0.0, f64::max)
}

fn run(args: &Args) -> ntree::Result<()> {
    let settings = ForceSettings::new(args.tolerance, args.softening)?;
    let bodies = random_bodies(args.bodies, args.seed);
    log::info!("generated {} bodies (seed {})", bodies.len(), args.seed);

    let start = std::time::Instant::now();
    let accelerations = if args.no_tree {
        direct_accelerations(&bodies, settings.softening())?
    } else {
        let mut tree = Octree::build_enclosing(&bodies)?;
        tree.aggregate();
        log::info!(
            "tree built: depth {}, {} nodes, in {:?}",
            tree.depth(),
            tree.nodes().count(),
            start.elapsed()
        );
        if args.parallel {
            tree.par_accelerations(&bodies, &settings)?
        } else {
            tree.accelerations(&bodies, &settings)?
        }
    };
    log::info!("accelerations computed in {:?}", start.elapsed());

    if args.compare && !args.no_tree {
        let start = std::time::Instant::now();
        let exact = direct_accelerations(&bodies, settings.softening())?;
        log::info!("direct sum computed in {:?}", start.elapsed());
        log::info!(
            "max relative error against direct sum: {:e}",
            max_relative_error(&accelerations, &exact)
        );
    }

    if args.compare {
        log::info!(
            "total potential energy: {}",
            total_potential_energy(&bodies, settings.softening())?
        );
    }

    if args.print {
        for acc in &accelerations {
            println!("{}", acc);
        }
    }
    Ok(())
}

fn main() {
    init_logger();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
