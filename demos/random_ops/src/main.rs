use clap::{Parser, ValueEnum};
use lazytree::{AggregateKind, AggregateResult, AnyTree, UpdateKind, Value, build};
use log::{error, info};
use std::process::ExitCode;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Aggregate {
    Sum,
    MinIndex,
    Xor,
}

impl From<Aggregate> for AggregateKind {
    fn from(aggregate: Aggregate) -> Self {
        match aggregate {
            Aggregate::Sum => AggregateKind::Sum,
            Aggregate::MinIndex => AggregateKind::MinIndex,
            Aggregate::Xor => AggregateKind::Xor,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(short, long, value_parser, default_value_t = 1000)]
    len: usize,
    #[clap(short, long, value_parser, default_value_t = 100_000)]
    ops: usize,
    #[clap(short, long, value_enum, default_value_t = Aggregate::Sum)]
    aggregate: Aggregate,
    #[clap(short, long, value_parser, default_value_t = 1000)]
    max_value: Value,
    #[clap(short, long, value_parser)]
    seed: Option<u64>,
}

/// Answers the same query by scanning the plain array
fn scan(kind: AggregateKind, values: &[Value], left: usize, right: usize) -> AggregateResult {
    let range = &values[left..=right];
    match kind {
        AggregateKind::Sum => {
            AggregateResult::Sum(range.iter().fold(0, |acc: Value, v| acc.wrapping_add(*v)))
        }
        AggregateKind::Xor => AggregateResult::Xor(range.iter().fold(0, |acc, v| acc ^ v)),
        AggregateKind::MinIndex => {
            let mut best = 0;
            for (i, v) in range.iter().enumerate() {
                if *v <= range[best] {
                    best = i;
                }
            }
            AggregateResult::MinIndex(left + best)
        }
    }
}

fn random_range(rng: &mut fastrand::Rng, len: usize) -> (usize, usize) {
    let a = rng.usize(0..len);
    let b = rng.usize(0..len);
    (a.min(b), a.max(b))
}

fn run(args: &Args, rng: &mut fastrand::Rng) -> Result<usize, lazytree::Error> {
    let kind = AggregateKind::from(args.aggregate);
    let max = args.max_value.max(1);
    let mut model: Vec<Value> = (0..args.len).map(|_| rng.i64(-max..=max)).collect();
    let mut tree: AnyTree = build(&model, kind)?;
    let mut mismatches = 0;

    for step in 0..args.ops {
        let (left, right) = random_range(rng, args.len);
        let value = rng.i64(-max..=max);
        match rng.u8(0..4) {
            0 if kind != AggregateKind::Xor => {
                tree.update(left, right, UpdateKind::Add, value)?;
                model[left..=right]
                    .iter_mut()
                    .for_each(|v| *v = v.wrapping_add(value));
            }
            0 | 1 => {
                tree.update(left, right, UpdateKind::Assign, value)?;
                model[left..=right].iter_mut().for_each(|v| *v = value);
            }
            2 => {
                tree.point_update(left, value)?;
                match kind {
                    AggregateKind::Xor => model[left] ^= value,
                    _ => model[left] = value,
                }
            }
            _ => {
                let expected = scan(kind, &model, left, right);
                let actual = tree.query(left, right)?;
                if actual != expected {
                    error!(
                        "step {} query [{}, {}]: tree answered {:?}, array answered {:?}",
                        step, left, right, actual, expected
                    );
                    mismatches += 1;
                }
            }
        }
    }

    if tree.values()? != model {
        error!("final element values differ from the array");
        mismatches += 1;
    }
    tree.validate()?;
    Ok(mismatches)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    if args.len == 0 {
        error!("--len must be at least 1");
        return ExitCode::FAILURE;
    }

    let seed = args.seed.unwrap_or_else(|| fastrand::u64(..));
    let mut rng = fastrand::Rng::with_seed(seed);
    info!(
        "Running {} random operations over {} elements with {} (seed {})",
        args.ops,
        args.len,
        AggregateKind::from(args.aggregate),
        seed
    );

    match run(&args, &mut rng) {
        Ok(0) => {
            println!("OK: {} operations matched the plain array", args.ops);
            ExitCode::SUCCESS
        }
        Ok(mismatches) => {
            println!("FAILED: {} mismatches (seed {})", mismatches, seed);
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("tree operation failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
