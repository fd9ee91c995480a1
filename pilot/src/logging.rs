use env_logger::Builder;
use log::LevelFilter;

pub struct Logger;

impl Logger {
    /// `RUST_LOG` still wins over the level given here
    pub fn init(level: LevelFilter) {
        let mut builder: Builder = colog::default_builder();
        builder.filter_level(level).parse_default_env().init();
    }
}
