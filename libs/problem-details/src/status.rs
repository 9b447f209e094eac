//! Registered HTTP status codes and their reason phrases.

use http::StatusCode;

macro_rules! problem_statuses {
    ($($variant:ident => ($code:literal, $title:literal),)+) => {
        /// An IANA-registered HTTP status code with its reason phrase.
        ///
        /// Only current names are listed: 413 is "Content Too Large" and 422 is
        /// "Unprocessable Content".
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[non_exhaustive]
        pub enum ProblemStatus {
            $($variant,)+
        }

        impl ProblemStatus {
            /// Every registered status, in ascending code order.
            pub const ALL: &'static [ProblemStatus] = &[$(ProblemStatus::$variant,)+];

            #[must_use]
            pub const fn code(self) -> u16 {
                match self {
                    $(ProblemStatus::$variant => $code,)+
                }
            }

            /// The reason phrase, usable as a problem title.
            #[must_use]
            pub const fn title(self) -> &'static str {
                match self {
                    $(ProblemStatus::$variant => $title,)+
                }
            }

            #[must_use]
            pub const fn from_code(code: u16) -> Option<ProblemStatus> {
                match code {
                    $($code => Some(ProblemStatus::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

problem_statuses! {
    Continue => (100, "Continue"),
    SwitchingProtocols => (101, "Switching Protocols"),
    Processing => (102, "Processing"),
    EarlyHints => (103, "Early Hints"),
    Ok => (200, "OK"),
    Created => (201, "Created"),
    Accepted => (202, "Accepted"),
    NonAuthoritativeInformation => (203, "Non-Authoritative Information"),
    NoContent => (204, "No Content"),
    ResetContent => (205, "Reset Content"),
    PartialContent => (206, "Partial Content"),
    MultiStatus => (207, "Multi-Status"),
    AlreadyReported => (208, "Already Reported"),
    ImUsed => (226, "IM Used"),
    MultipleChoices => (300, "Multiple Choices"),
    MovedPermanently => (301, "Moved Permanently"),
    Found => (302, "Found"),
    SeeOther => (303, "See Other"),
    NotModified => (304, "Not Modified"),
    TemporaryRedirect => (307, "Temporary Redirect"),
    PermanentRedirect => (308, "Permanent Redirect"),
    BadRequest => (400, "Bad Request"),
    Unauthorized => (401, "Unauthorized"),
    PaymentRequired => (402, "Payment Required"),
    Forbidden => (403, "Forbidden"),
    NotFound => (404, "Not Found"),
    MethodNotAllowed => (405, "Method Not Allowed"),
    NotAcceptable => (406, "Not Acceptable"),
    ProxyAuthenticationRequired => (407, "Proxy Authentication Required"),
    RequestTimeout => (408, "Request Timeout"),
    Conflict => (409, "Conflict"),
    Gone => (410, "Gone"),
    LengthRequired => (411, "Length Required"),
    PreconditionFailed => (412, "Precondition Failed"),
    ContentTooLarge => (413, "Content Too Large"),
    UriTooLong => (414, "URI Too Long"),
    UnsupportedMediaType => (415, "Unsupported Media Type"),
    RangeNotSatisfiable => (416, "Range Not Satisfiable"),
    ExpectationFailed => (417, "Expectation Failed"),
    ImATeapot => (418, "I'm a teapot"),
    MisdirectedRequest => (421, "Misdirected Request"),
    UnprocessableContent => (422, "Unprocessable Content"),
    Locked => (423, "Locked"),
    FailedDependency => (424, "Failed Dependency"),
    TooEarly => (425, "Too Early"),
    UpgradeRequired => (426, "Upgrade Required"),
    PreconditionRequired => (428, "Precondition Required"),
    TooManyRequests => (429, "Too Many Requests"),
    RequestHeaderFieldsTooLarge => (431, "Request Header Fields Too Large"),
    UnavailableForLegalReasons => (451, "Unavailable For Legal Reasons"),
    InternalServerError => (500, "Internal Server Error"),
    NotImplemented => (501, "Not Implemented"),
    BadGateway => (502, "Bad Gateway"),
    ServiceUnavailable => (503, "Service Unavailable"),
    GatewayTimeout => (504, "Gateway Timeout"),
    HttpVersionNotSupported => (505, "HTTP Version Not Supported"),
    VariantAlsoNegotiates => (506, "Variant Also Negotiates"),
    InsufficientStorage => (507, "Insufficient Storage"),
    LoopDetected => (508, "Loop Detected"),
    BandwidthLimitExceeded => (509, "Bandwidth Limit Exceeded"),
    NotExtended => (510, "Not Extended"),
    NetworkAuthenticationRequired => (511, "Network Authentication Required"),
}

/// Returned when an `http::StatusCode` has no registered reason phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("status code {0} is not a registered HTTP status")]
pub struct UnknownStatus(pub u16);

impl TryFrom<StatusCode> for ProblemStatus {
    type Error = UnknownStatus;

    fn try_from(status: StatusCode) -> Result<Self, Self::Error> {
        let code = status.as_u16();
        Self::from_code(code).ok_or(UnknownStatus(code))
    }
}

impl From<ProblemStatus> for u16 {
    fn from(status: ProblemStatus) -> Self {
        status.code()
    }
}
