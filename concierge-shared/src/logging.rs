use log::LevelFilter;
use simple_logger::SimpleLogger;

pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";

pub fn init() {
    let level = level_from(std::env::var(LOG_LEVEL_VAR).ok().as_deref());
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("logger already initialised: {}", e);
    }
}

fn level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info)
}
