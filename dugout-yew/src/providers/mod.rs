mod description_provider;

pub use description_provider::{DescriptionProvider, DescriptionProviderProps};
