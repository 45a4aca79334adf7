//! Type-erased single values

use super::error::{ValueError, ValueResult};
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// Exactly one datum of any `'static` type.
///
/// Cloning a scalar shares the datum. Reading it back as a different type
/// is a usage error, reported as [`ValueError::TypeMismatch`].
#[derive(Clone)]
pub struct Scalar {
    datum: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Scalar {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            datum: Arc::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Borrow the datum as `T`
    pub fn get<T: Any>(&self) -> ValueResult<&T> {
        self.datum
            .downcast_ref::<T>()
            .ok_or(ValueError::TypeMismatch {
                expected: type_name::<T>(),
                found: self.type_name,
            })
    }

    /// Whether the datum is a `T`
    pub fn is<T: Any>(&self) -> bool {
        self.datum.is::<T>()
    }

    /// Clone the datum out as `T`
    pub fn cloned<T: Any + Clone>(&self) -> ValueResult<T> {
        self.get::<T>().cloned()
    }

    /// Name of the stored type, as reported by `std::any::type_name`
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Render the common primitive captures; anything else by type
        if let Some(v) = self.datum.downcast_ref::<String>() {
            write!(f, "Scalar({:?})", v)
        } else if let Some(v) = self.datum.downcast_ref::<u64>() {
            write!(f, "Scalar({}u64)", v)
        } else if let Some(v) = self.datum.downcast_ref::<i64>() {
            write!(f, "Scalar({}i64)", v)
        } else if let Some(v) = self.datum.downcast_ref::<f64>() {
            write!(f, "Scalar({:?}f64)", v)
        } else {
            write!(f, "Scalar(<{}>)", self.type_name)
        }
    }
}
