pub mod lcd;

pub use lcd::Lcd;
