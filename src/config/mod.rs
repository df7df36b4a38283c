pub mod map;
pub mod settings;

pub use map::MapConfig;
pub use settings::Settings;
