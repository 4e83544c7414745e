pub mod article;
pub mod datetime;
pub mod dining_commons_menu_item;
pub mod help_request;
pub mod menu_item_review;
pub mod organization;
pub mod recommendation_request;

pub use article::*;
pub use dining_commons_menu_item::*;
pub use help_request::*;
pub use menu_item_review::*;
pub use organization::*;
pub use recommendation_request::*;

use serde::{Deserialize, Deserializer};

/// Surrogate ids are zero until storage assigns one.
pub(crate) fn assigned(id: i64) -> Option<i64> {
    (id != 0).then_some(id)
}

/// Treats an explicit JSON `null` like an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
