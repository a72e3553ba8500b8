mod grpc;
mod memory;
mod redis;

pub use self::grpc::GrpcSessionManager;
pub use self::memory::MemorySessionManager;
pub use self::redis::RedisSessionManager;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifetime of a session and of the `session_id` cookie that points at it.
pub const SESSION_TTL: Duration = Duration::days(365);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
