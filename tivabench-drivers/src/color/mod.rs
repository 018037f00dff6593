pub mod tcs34727;

pub use tcs34727::{DetectedColor, RawColor, Tcs34727, Tcs34727Error};
