use chrono::{DateTime, Utc};

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current instant
    fn get_utc_now(&self) -> DateTime<Utc>;
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System with a frozen clock, for tests
pub struct StaticTimeSys(pub DateTime<Utc>);
impl ISys for StaticTimeSys {
    fn get_utc_now(&self) -> DateTime<Utc> {
        self.0
    }
}
