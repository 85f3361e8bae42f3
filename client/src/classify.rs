use crate::ClientError;

/// Message the service sends when it cannot parse the phone number.
pub const INVALID_PHONE_NUMBER_MESSAGE: &str = "No valid phone number was found please try again";

/// Prefix of the message sent for an unknown key or a non-whitelisted IP.
/// The service appends the caller's address, so only the prefix is stable.
pub const INVALID_API_KEY_PATTERN: &str = "Access denied for your API key and IP";

/// Category of a non-success response, derived from its `message` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceFailure {
    InvalidPhoneNumber,
    InvalidApiKey,
    Other,
}

/// Classify a service message. Checks run in order: exact phone-number
/// message, then the API key prefix anywhere in the message, then fallback.
pub fn classify(message: &str) -> ServiceFailure {
    if message == INVALID_PHONE_NUMBER_MESSAGE {
        ServiceFailure::InvalidPhoneNumber
    } else if message.contains(INVALID_API_KEY_PATTERN) {
        ServiceFailure::InvalidApiKey
    } else {
        ServiceFailure::Other
    }
}

impl ServiceFailure {
    pub fn into_error(self, message: String) -> ClientError {
        match self {
            ServiceFailure::InvalidPhoneNumber => ClientError::InvalidPhoneNumber(message),
            ServiceFailure::InvalidApiKey => ClientError::InvalidApiKey(message),
            ServiceFailure::Other => ClientError::Service(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_phone_number_is_exact() {
        assert_eq!(
            classify("No valid phone number was found please try again"),
            ServiceFailure::InvalidPhoneNumber
        );
        assert_eq!(
            classify("No valid phone number was found please try again."),
            ServiceFailure::Other
        );
        assert_eq!(
            classify("no valid phone number was found please try again"),
            ServiceFailure::Other
        );
    }

    #[test]
    fn test_invalid_api_key_is_substring() {
        assert_eq!(
            classify("Access denied for your API key and IP 1.2.3.4"),
            ServiceFailure::InvalidApiKey
        );
        assert_eq!(
            classify("Error: Access denied for your API key and IP"),
            ServiceFailure::InvalidApiKey
        );
        assert_eq!(classify("Access denied"), ServiceFailure::Other);
    }

    #[test]
    fn test_fallback() {
        assert_eq!(classify(""), ServiceFailure::Other);
        assert_eq!(classify("Rate limit exceeded"), ServiceFailure::Other);
    }

    #[test]
    fn test_into_error_keeps_message() {
        let err = ServiceFailure::InvalidApiKey.into_error("Access denied for your API key and IP 10.0.0.1".into());
        assert!(matches!(err, ClientError::InvalidApiKey(ref m) if m.ends_with("10.0.0.1")));

        let err = ServiceFailure::Other.into_error("Something broke".into());
        assert_eq!(err.to_string(), "Something broke");
    }
}
