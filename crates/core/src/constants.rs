//! Constants used throughout the Ward core crate.

/// Number of rooms in the ward. Rooms are labelled `"1"` to `"40"`.
pub const ROOM_POOL_SIZE: u16 = 40;

/// Largest number of admission records one synthesis run may produce.
pub const MAX_GENERATE_TOTAL: u32 = 10_000;

/// Seconds to wait for the people source before giving up.
pub const FETCH_TIMEOUT_SECS: u64 = 10;

/// Rows per page in the patient table when no page size is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Public demo endpoint returning `{"users": [...]}`.
pub const DEFAULT_PEOPLE_SOURCE_URL: &str = "https://dummyjson.com/users";

/// Default listen address for the REST API.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Upper bounds (inclusive) of the age buckets shown on the overview page; the last bucket is open.
pub const AGE_GROUP_BOUNDS: [(&str, u32); 3] = [("0-20", 20), ("21-40", 40), ("41-60", 60)];

/// Label of the open-ended top age bucket.
pub const AGE_GROUP_OLDEST: &str = "61+";
