use clap::Parser;

use google_fonts_woff2::Args;

fn main() {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    google_fonts_woff2::run(&args);
}
