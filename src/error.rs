use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised while rendering a trade record into a notification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("order {order_number}: {field} is not a decimal: '{value}'")]
    InvalidDecimal {
        order_number: String,
        field: &'static str,
        value: String,
    },
}

/// Errors reported by the trade-history source itself.
#[derive(Error, Debug, Clone)]
pub enum SourceError {
    /// The API answered 2xx but flagged the call as unsuccessful.
    #[error("trade history API error {code}: {message}")]
    Api { code: String, message: String },

    /// The API answered with a non-success HTTP status.
    #[error("trade history request rejected with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("signing error: {0}")]
    Signing(String),
}

impl Error {
    /// Whether another poll cycle could plausibly succeed after this error.
    ///
    /// Rejected API keys and configuration problems will not fix
    /// themselves between cycles; everything else is treated as transient.
    /// HTTP 403 is the firewall rate limit and counts as transient.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Config(_) | Error::Signing(_) => false,
            Error::Source(SourceError::Rejected { status, .. }) => *status != 401,
            Error::Source(SourceError::Api { code, .. }) => {
                !matches!(code.as_str(), "-2014" | "-2015")
            }
            _ => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_errors_are_recoverable() {
        let api = Error::Source(SourceError::Api {
            code: "-1021".into(),
            message: "Timestamp outside of recvWindow".into(),
        });
        assert!(api.is_recoverable());

        let server = Error::Source(SourceError::Rejected {
            status: 502,
            body: "bad gateway".into(),
        });
        assert!(server.is_recoverable());

        let firewall = Error::Source(SourceError::Rejected {
            status: 403,
            body: String::new(),
        });
        assert!(firewall.is_recoverable());

        let format = Error::Format(FormatError::InvalidDecimal {
            order_number: "X1".into(),
            field: "amount",
            value: "n/a".into(),
        });
        assert!(format.is_recoverable());
    }

    #[test]
    fn credential_rejection_is_fatal() {
        let err = Error::Source(SourceError::Rejected {
            status: 401,
            body: "{\"code\":-2015}".into(),
        });
        assert!(!err.is_recoverable());

        let bad_key = Error::Source(SourceError::Api {
            code: "-2015".into(),
            message: "Invalid API-key, IP, or permissions for action.".into(),
        });
        assert!(!bad_key.is_recoverable());
        assert!(!Error::Config(ConfigError::MissingField { field: "x" }).is_recoverable());
    }

    #[test]
    fn transport_errors_are_recoverable() {
        let err: Error = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Http(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn format_error_names_field_and_value() {
        let err = FormatError::InvalidDecimal {
            order_number: "X1".into(),
            field: "totalPrice",
            value: "abc".into(),
        };
        assert_eq!(
            err.to_string(),
            "order X1: totalPrice is not a decimal: 'abc'"
        );
    }
}
