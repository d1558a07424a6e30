use log::LevelFilter;
use simplelog::{Config, SimpleLogger};
use std::env;
use std::io;
use std::process;
use treap_engine::priority::PriorityRange;
use treap_engine::shell::{self, Shell};
use treap_engine::treap::Treap;
use treap_engine::Result;

fn log_level() -> LevelFilter {
    env::var("TREAP_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Warn)
}

fn run() -> Result<()> {
    let keys = env::args()
        .skip(1)
        .map(|arg| shell::parse_key(&arg))
        .collect::<Result<Vec<char>>>()?;

    let range = if env::var_os("TREAP_REFERENCE_PRIORITIES").is_some() {
        PriorityRange::reference()
    } else {
        PriorityRange::Full
    };
    let mut treap = Treap::with_range(range)?;
    treap.extend(keys);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(stdin.lock(), stdout.lock(), treap);
    shell.run()
}

fn main() {
    if let Err(err) = SimpleLogger::init(log_level(), Config::default()) {
        eprintln!("failed to initialize logger: {}", err);
    }

    if let Err(err) = run() {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
