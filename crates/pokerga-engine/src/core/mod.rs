pub use self::{card::*, category::*, hand::*};

pub(crate) mod card;
pub(crate) mod category;
pub(crate) mod hand;
