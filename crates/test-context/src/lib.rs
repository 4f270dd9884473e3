pub mod entity;
pub mod fixture;
pub mod recording;
pub mod request;

pub use entity::*;
pub use fixture::*;
pub use recording::*;
pub use request::*;

pub fn harness_name() -> &'static str {
    "test-context"
}
