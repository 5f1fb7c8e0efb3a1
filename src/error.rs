/// Classifies an error for the HTTP layer: validation failures become
/// 400-class responses, everything else a 500.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-supplied inputs were rejected before any model ran.
    Validation,
    /// Unexpected failure during feature computation, fitting, or prediction.
    Computation,
}

#[derive(Clone)]
pub struct ScoreError {
    kind: ErrorKind,
    message: String,
}

impl ScoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: message.into(),
        }
    }

    pub fn computation(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Computation,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl std::fmt::Display for ScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for ScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for ScoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_survive_construction() {
        assert_eq!(
            ScoreError::validation("bad target").kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            ScoreError::computation("solve failed").kind(),
            ErrorKind::Computation
        );
        assert_eq!(
            ScoreError::validation("bad target").to_string(),
            "bad target"
        );
    }
}
