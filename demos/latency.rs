use std::env::args;
use std::fs::read_to_string;
use std::time::{Duration, Instant};

use rolling_window::{reduce, Config, Policy};

fn main() {
    env_logger::init();

    let path = args().nth(1).expect("must pass an input file");
    let contents = read_to_string(path.as_str()).expect("unable to open file");
    let config = Config {
        buckets: 10,
        bucket_capacity: 64,
        bucket_duration: Duration::from_millis(100),
    };
    let last = config.point_policy::<f64>().expect("invalid window configuration");
    let recent = config.time_policy::<f64>().expect("invalid window configuration");
    let start = Instant::now();

    let mut samples = 0;

    for sample in contents.split_whitespace().filter_map(|s| s.parse::<f64>().ok()) {
        samples += 1;
        last.append(sample);
        recent.append(sample);
    }

    let end = Instant::now();

    println!("Elapse: {}", (end - start).as_secs_f64());
    println!("Total samples: {samples}");
    println!(
        "Last {} samples: sum {}, avg {}, min {}, max {}",
        last.count(),
        last.reduce(reduce::sum),
        last.reduce(reduce::avg),
        last.reduce(reduce::min),
        last.reduce(reduce::max)
    );

    let count = recent.count();
    if count > 0 {
        println!(
            "Last {:?} ({count} samples): sum {}, avg {}, min {}, max {}",
            recent.bucket_duration() * recent.buckets() as u32,
            recent.reduce(reduce::sum),
            recent.reduce(reduce::avg),
            recent.reduce(reduce::min),
            recent.reduce(reduce::max)
        );
    } else {
        println!("No samples in the last {:?}", recent.bucket_duration() * recent.buckets() as u32);
    }
}
