use std::error::Error;
use std::fmt::{Display, Formatter};

pub type EmuResult<T> = Result<T, EmuError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmuErrorCategory {
    UsageError,
    DomainError,
    IoSystemError,
    ModelError,
    IntegrityError,
}

impl EmuErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::UsageError => 2,
            Self::DomainError => 3,
            Self::IoSystemError => 4,
            Self::ModelError => 5,
            Self::IntegrityError => 6,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UsageError => "UsageError",
            Self::DomainError => "DomainError",
            Self::IoSystemError => "IoSystemError",
            Self::ModelError => "ModelError",
            Self::IntegrityError => "IntegrityError",
        }
    }
}

/// Fatal run error carrying a stable diagnostic code such as `DOMAIN.REDSHIFT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmuError {
    category: EmuErrorCategory,
    code: &'static str,
    message: String,
}

impl EmuError {
    pub fn new(category: EmuErrorCategory, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            category,
            code,
            message: message.into(),
        }
    }

    pub fn usage(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(EmuErrorCategory::UsageError, code, message)
    }

    pub fn domain(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(EmuErrorCategory::DomainError, code, message)
    }

    pub fn io_system(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(EmuErrorCategory::IoSystemError, code, message)
    }

    pub fn model(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(EmuErrorCategory::ModelError, code, message)
    }

    pub fn integrity(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(EmuErrorCategory::IntegrityError, code, message)
    }

    pub const fn category(&self) -> EmuErrorCategory {
        self.category
    }

    pub const fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.code, self.message)
    }

    pub fn fatal_exit_line(&self) -> String {
        format!("FATAL EXIT CODE: {}", self.exit_code())
    }
}

impl Display for EmuError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.as_str(),
            self.code,
            self.message
        )
    }
}

impl Error for EmuError {}
