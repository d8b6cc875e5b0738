/// Application-level result codes carried in the response envelope.
///
/// Codes are banded by convention: 200 success, 400-405 and 429 for
/// client-caused failures, 500-503 for server-side failures, and 600-603 for
/// business rejections that callers are expected to branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    /// Operation succeeded
    Success,

    /// Generic failure
    Failed,

    /// Request parameters failed validation
    ValidateFailed,

    /// Missing or expired authentication
    Unauthorized,

    /// Authenticated but not allowed
    Forbidden,

    /// Requested resource does not exist
    NotFound,

    /// HTTP method not supported for this resource
    MethodNotAllowed,

    /// Too many requests
    RateLimited,

    /// Unexpected server-side failure
    InternalServerError,

    /// Service temporarily unavailable
    ServiceUnavailable,

    /// Expected business rejection
    BusinessError,

    /// Downstream service call failed
    RemoteCallFailed,

    /// Database operation failed
    DatabaseError,

    /// Cache operation failed
    CacheError,
}

impl ResultCode {
    /// Numeric code written into the envelope
    pub const fn code(self) -> u16 {
        match self {
            Self::Success => 200,
            Self::Failed => 500,
            Self::ValidateFailed => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::RateLimited => 429,
            Self::InternalServerError => 500,
            Self::ServiceUnavailable => 503,
            Self::BusinessError => 600,
            Self::RemoteCallFailed => 601,
            Self::DatabaseError => 602,
            Self::CacheError => 603,
        }
    }

    /// Default human-readable message for this code
    pub const fn message(self) -> &'static str {
        match self {
            Self::Success => "操作成功",
            Self::Failed => "操作失败",
            Self::ValidateFailed => "参数校验失败",
            Self::Unauthorized => "未认证或认证已过期",
            Self::Forbidden => "无权限访问",
            Self::NotFound => "请求的资源不存在",
            Self::MethodNotAllowed => "请求方法不支持",
            Self::RateLimited => "请求过于频繁，请稍后再试",
            Self::InternalServerError => "系统内部错误",
            Self::ServiceUnavailable => "服务不可用",
            Self::BusinessError => "业务异常",
            Self::RemoteCallFailed => "远程服务调用失败",
            Self::DatabaseError => "数据库操作失败",
            Self::CacheError => "缓存操作失败",
        }
    }
}
