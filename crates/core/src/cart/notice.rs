//! Notices emitted by cart mutations.

use serde::{Deserialize, Serialize};

/// Short human-readable outcome of a cart mutation.
///
/// Mutations return a notice instead of displaying anything themselves, so
/// the cart can be exercised without a UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartNotice {
    /// A new line was appended.
    ItemAdded,
    /// An existing line's quantity went up.
    QuantityIncreased,
    /// An existing line's quantity went down and the line remains.
    QuantityDecreased,
    /// A line was deleted.
    ItemRemoved,
    /// Every line was deleted.
    CartCleared,
}

impl CartNotice {
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::ItemAdded => "Item added to cart",
            Self::QuantityIncreased | Self::QuantityDecreased => "Cart updated",
            Self::ItemRemoved => "Item removed",
            Self::CartCleared => "Cart cleared",
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::ItemAdded => "Your item has been added to your cart",
            Self::QuantityIncreased => "Item quantity has been increased",
            Self::QuantityDecreased => "Item quantity has been decreased",
            Self::ItemRemoved => "Item has been removed from your cart",
            Self::CartCleared => "All items have been removed from your cart",
        }
    }
}
