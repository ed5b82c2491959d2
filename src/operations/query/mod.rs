
pub use hit_test::{contains_point, end_cap_contains, intersects_rectangle, start_cap_contains};
