use textboard_core_types::RequestId;
use thiserror::Error;

/// Result type alias using the structured `ExError`
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that tests and the REPL can rely on
/// regardless of how the human-readable message is worded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    InvalidTitle,
    MissingParameter,
    InvalidParameter,
    UnknownCommand,

    // Lookup
    NotFound,

    // Statement building / binding
    StatementBind,
    UnsupportedValueKind,

    // Persistence
    Persistence,
    Migration,
    ChecksumMismatch,

    // Environment
    Config,
    Io,
    Timeout,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidTitle => "ERR_INVALID_TITLE",
            ExErrorKind::MissingParameter => "ERR_MISSING_PARAMETER",
            ExErrorKind::InvalidParameter => "ERR_INVALID_PARAMETER",
            ExErrorKind::UnknownCommand => "ERR_UNKNOWN_COMMAND",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::StatementBind => "ERR_STATEMENT_BIND",
            ExErrorKind::UnsupportedValueKind => "ERR_UNSUPPORTED_VALUE_KIND",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Migration => "ERR_MIGRATION",
            ExErrorKind::ChecksumMismatch => "ERR_CHECKSUM_MISMATCH",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification (`kind`) for programmatic handling plus optional
/// context for the person reading the REPL output or the logs.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain failures of the text board
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoardError {
    /// No article with this id exists
    #[error("{article_id}번 게시물은 존재하지 않습니다.")]
    ArticleNotFound { article_id: i64 },

    /// Title is empty or whitespace-only
    #[error("Invalid title: {reason}")]
    InvalidTitle { reason: String },

    /// A required query-string parameter is absent
    #[error("Missing parameter: {name}")]
    MissingParameter { name: String },

    /// A query-string parameter could not be interpreted
    #[error("Invalid parameter {name}={value}: {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    /// No route matches the path typed at the prompt
    #[error("존재하지 않는 명령어입니다: {path}")]
    UnknownCommand { path: String },
}

impl From<BoardError> for ExError {
    fn from(err: BoardError) -> Self {
        let message = err.to_string();
        match err {
            BoardError::ArticleNotFound { article_id } => ExError::new(ExErrorKind::NotFound)
                .with_op("article_lookup")
                .with_entity_id(article_id.to_string())
                .with_message(message),
            BoardError::InvalidTitle { .. } => ExError::new(ExErrorKind::InvalidTitle)
                .with_op("validate_title")
                .with_message(message),
            BoardError::MissingParameter { .. } => ExError::new(ExErrorKind::MissingParameter)
                .with_op("read_parameter")
                .with_message(message),
            BoardError::InvalidParameter { .. } => ExError::new(ExErrorKind::InvalidParameter)
                .with_op("read_parameter")
                .with_message(message),
            BoardError::UnknownCommand { path } => ExError::new(ExErrorKind::UnknownCommand)
                .with_op("dispatch")
                .with_entity_id(path)
                .with_message(message),
        }
    }
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
