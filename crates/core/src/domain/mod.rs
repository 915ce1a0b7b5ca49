pub mod page;
pub mod rating;
pub mod recommendation;

pub use page::{BrowseMode, PageDescriptor};
pub use rating::RatingEvent;
pub use recommendation::Recommendation;
