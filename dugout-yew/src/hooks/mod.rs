mod use_description;

pub use use_description::{use_description, DescriptionContext};
