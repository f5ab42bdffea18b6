pub use crate::display::{Display, DisplayConfig};

mod display;
