//! Application services for status relaying.

mod relay;

pub use relay::{DETAIL_SOURCE, StatusRelayError, StatusRelayResult, StatusRelayService};
