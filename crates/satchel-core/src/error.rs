use crate::value::Value;

use std::sync::Arc;

/// Helper macro for returning an ad-hoc error from a function.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Helper macro for creating an ad-hoc error.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur in satchel.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    /// A schema constraint was violated while building DDL, e.g. an entity
    /// descriptor without a valid primary key.
    Constraint(ConstraintError),
    /// The database handle was requested in a state that does not permit it.
    State(StateError),
    /// The underlying SQL engine reported a failure.
    Sql(SqlError),
    TypeConversion(TypeConversionError),
    Unknown,
}

#[derive(Debug)]
struct AdhocError {
    message: String,
}

#[derive(Debug)]
struct ConstraintError {
    message: String,
}

#[derive(Debug)]
struct StateError {
    message: String,
}

#[derive(Debug)]
struct SqlError {
    source: anyhow::Error,
}

#[derive(Debug)]
struct TypeConversionError {
    from: &'static str,
    to: String,
}

impl Error {
    /// Creates an ad-hoc error from format arguments. Prefer the `err!` and
    /// `bail!` macros over calling this directly.
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError {
            message: args.to_string(),
        }))
    }

    /// A schema-constraint violation. Fatal: raised before any DDL is issued.
    pub fn constraint(message: impl Into<String>) -> Error {
        Error::from(ErrorKind::Constraint(ConstraintError {
            message: message.into(),
        }))
    }

    /// The database lifecycle state forbids the requested operation.
    pub fn state(message: impl Into<String>) -> Error {
        Error::from(ErrorKind::State(StateError {
            message: message.into(),
        }))
    }

    /// An execution failure reported by the SQL engine.
    pub fn sql(source: impl Into<anyhow::Error>) -> Error {
        Error::from(ErrorKind::Sql(SqlError {
            source: source.into(),
        }))
    }

    /// A value could not be coerced to the requested representation.
    pub fn type_conversion(value: &Value, to: impl Into<String>) -> Error {
        Error::from(ErrorKind::TypeConversion(TypeConversionError {
            from: value.kind_name(),
            to: to.into(),
        }))
    }

    pub fn is_constraint(&self) -> bool {
        matches!(self.kind(), ErrorKind::Constraint(_))
    }

    pub fn is_state(&self) -> bool {
        matches!(self.kind(), ErrorKind::State(_))
    }

    pub fn is_sql(&self) -> bool {
        matches!(self.kind(), ErrorKind::Sql(_))
    }

    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context
    /// is shown first, ending with the root cause.
    pub fn context(self, consequent: Error) -> Error {
        let mut err = consequent;
        if err.inner.is_none() {
            err = Error::from(ErrorKind::Unknown);
        }
        let inner = err.inner.as_mut().unwrap();
        assert!(
            inner.cause.is_none(),
            "consequent error must not already have a cause"
        );
        Arc::get_mut(inner).unwrap().cause = Some(self);
        err
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            ErrorKind::Sql(err) => Some(err.source.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => f.write_str(&err.message),
            Constraint(err) => write!(f, "constraint violation: {}", err.message),
            State(err) => write!(f, "invalid database state: {}", err.message),
            Sql(err) => write!(f, "sql execution failed: {}", err.source),
            TypeConversion(err) => write!(f, "cannot convert {} to {}", err.from, err.to),
            Unknown => f.write_str("unknown satchel error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}
