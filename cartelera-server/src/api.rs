use serde::Serialize;

/// Uniform envelope wrapping every successful response.
///
/// `data` is always present in the serialized form (`null` for bodyless
/// acknowledgements); `total` only appears on list responses.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            total: None,
        }
    }

    /// Attach a total count (list responses).
    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }
}

impl ApiResponse<()> {
    /// Acknowledgement with no body data.
    pub fn ack(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            total: None,
        }
    }
}
