pub mod event;
pub mod ephemeris;

pub use ephemeris::{EventDetail, EventSummary, Link};
pub use event::{Event, OnThisDayFeed, Page, Year};
