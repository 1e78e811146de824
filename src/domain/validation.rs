use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    InvalidPhoneNumber { input: String },
    InvalidUrl { field: &'static str, input: String },
    MissingCallbackUrl,
    MissingMessageReference,
    InvalidSendWindow { start: String, end: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooLong { field, max, actual } => {
                write!(f, "{field} is too long: {actual} characters (max {max})")
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidUrl { field, input } => write!(f, "invalid {field}: {input}"),
            Self::MissingCallbackUrl => write!(f, "push messages require a callback url"),
            Self::MissingMessageReference => {
                write!(f, "one of id or sms_id must be specified")
            }
            Self::InvalidSendWindow { start, end } => {
                write!(f, "date_end ({end}) must be later than date_beg ({start})")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Client configuration problems detected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Neither an API key nor a login/password pair was supplied.
    MissingCredentials,
    /// Only one half of the login/password pair was supplied.
    IncompleteLoginPassword,
    /// The gateway endpoint is not an absolute URL.
    InvalidEndpoint { input: String },
    /// A request timeout of zero would fail every call.
    ZeroTimeout,
    /// The underlying HTTP client could not be initialized.
    HttpClient { reason: String },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredentials => {
                write!(f, "either an api key or a login/password pair is required")
            }
            Self::IncompleteLoginPassword => {
                write!(f, "login and password must be specified together")
            }
            Self::InvalidEndpoint { input } => write!(f, "invalid gateway endpoint: {input}"),
            Self::ZeroTimeout => write!(f, "request timeout must be greater than zero"),
            Self::HttpClient { reason } => write!(f, "failed to initialize HTTP client: {reason}"),
        }
    }
}

impl std::error::Error for ConfigurationError {}
