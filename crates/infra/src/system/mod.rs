use chrono::Utc;

// Abstracts the wall clock so that delay computations can be tested
// against a fixed point in time.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;
}

/// Real wall clock, used everywhere outside of tests
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
