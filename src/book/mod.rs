// ============================================================================
// Book Module
// Price levels and the two sides of the limit order book
// ============================================================================

pub mod level;
pub mod side;

pub use level::PriceLevel;
pub use side::{BookSide, Fill, LevelView};
