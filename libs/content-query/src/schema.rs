//! Typed field and content type references.
//!
//! - `Schema` trait: maps a field enum to repository field names
//! - `FieldRef`: a field of a schema, usable wherever a field name is
//! - `ContentType`: binds a Rust type to a repository content type name
//! - `IntoQueryValue`: conversion of Rust literals into query values
//!
//! Builder methods accept plain `&str` field names as well, so schemas are
//! optional.

use crate::segment::Value;
use bigdecimal::BigDecimal;
use std::marker::PhantomData;

/// Schema trait defining field enums and their repository names.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Copy, Clone, Eq, PartialEq)]
/// enum TaskField {
///     DisplayName,
///     DueDate,
/// }
///
/// struct TaskSchema;
///
/// impl Schema for TaskSchema {
///     type Field = TaskField;
///
///     fn field_name(field: Self::Field) -> &'static str {
///         match field {
///             TaskField::DisplayName => "DisplayName",
///             TaskField::DueDate => "DueDate",
///         }
///     }
/// }
/// ```
pub trait Schema {
    /// The field enum type (must be Copy + Eq)
    type Field: Copy + Eq;

    /// Map a field enum to its repository name
    fn field_name(field: Self::Field) -> &'static str;
}

/// Field reference bound to a schema.
///
/// Two references are equal when they name the same schema field.
pub struct FieldRef<S: Schema> {
    field: S::Field,
    _phantom: PhantomData<S>,
}

impl<S: Schema> FieldRef<S> {
    /// Create a new field reference.
    ///
    /// ```rust,ignore
    /// const DISPLAY_NAME: FieldRef<TaskSchema> = FieldRef::new(TaskField::DisplayName);
    /// ```
    #[must_use]
    pub const fn new(field: S::Field) -> Self {
        Self {
            field,
            _phantom: PhantomData,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        S::field_name(self.field)
    }
}

impl<S: Schema> Clone for FieldRef<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Schema> Copy for FieldRef<S> {}

impl<S: Schema> std::fmt::Debug for FieldRef<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRef")
            .field("field", &self.name())
            .finish()
    }
}

impl<S: Schema> PartialEq for FieldRef<S> {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field
    }
}

impl<S: Schema> Eq for FieldRef<S> {}

/// Anything that names a content field.
pub trait AsFieldName {
    fn as_field_name(&self) -> &str;
}

impl AsFieldName for str {
    fn as_field_name(&self) -> &str {
        self
    }
}

impl AsFieldName for String {
    fn as_field_name(&self) -> &str {
        self
    }
}

impl<S: Schema> AsFieldName for FieldRef<S> {
    fn as_field_name(&self) -> &str {
        self.name()
    }
}

impl<T: AsFieldName + ?Sized> AsFieldName for &T {
    fn as_field_name(&self) -> &str {
        (*self).as_field_name()
    }
}

/// A Rust type standing for a repository content type.
///
/// ```rust,ignore
/// struct Task;
///
/// impl ContentType for Task {
///     const NAME: &'static str = "Task";
/// }
///
/// let q = QueryExpression::new().type_is_of::<Task>();
/// ```
pub trait ContentType {
    /// Content type name as known by the repository.
    const NAME: &'static str;
}

/// Trait for types that can be compared against a content field.
pub trait IntoQueryValue {
    fn into_query_value(self) -> Value;
}

impl IntoQueryValue for Value {
    fn into_query_value(self) -> Value {
        self
    }
}

impl IntoQueryValue for bool {
    fn into_query_value(self) -> Value {
        Value::Bool(self)
    }
}

impl IntoQueryValue for String {
    fn into_query_value(self) -> Value {
        Value::String(self)
    }
}

impl IntoQueryValue for &str {
    fn into_query_value(self) -> Value {
        Value::String(self.to_owned())
    }
}

impl IntoQueryValue for &String {
    fn into_query_value(self) -> Value {
        Value::String(self.clone())
    }
}

macro_rules! impl_integer_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntoQueryValue for $t {
                fn into_query_value(self) -> Value {
                    Value::Number(self.into())
                }
            }
        )*
    };
}

impl_integer_value!(i8, i16, i32, i64, u8, u16, u32, u64);

impl IntoQueryValue for isize {
    fn into_query_value(self) -> Value {
        i64::try_from(self).map_or_else(
            |_| Value::String(self.to_string()),
            IntoQueryValue::into_query_value,
        )
    }
}

impl IntoQueryValue for usize {
    fn into_query_value(self) -> Value {
        u64::try_from(self).map_or_else(
            |_| Value::String(self.to_string()),
            IntoQueryValue::into_query_value,
        )
    }
}

/// Shortest decimal form that reads back as the same float, so `0.1`
/// renders as `0.1`. `NaN` and infinities keep their textual form.
fn float_value(value: f64) -> Value {
    let text = value.to_string();
    if !value.is_finite() {
        return Value::String(text);
    }
    text.parse::<BigDecimal>()
        .map_or(Value::String(text), Value::Number)
}

impl IntoQueryValue for f64 {
    fn into_query_value(self) -> Value {
        float_value(self)
    }
}

impl IntoQueryValue for f32 {
    fn into_query_value(self) -> Value {
        // f32 -> f64 widening is exact but prints the widened digits.
        self.to_string()
            .parse::<f64>()
            .map_or_else(|_| Value::String(self.to_string()), float_value)
    }
}

impl IntoQueryValue for BigDecimal {
    fn into_query_value(self) -> Value {
        Value::Number(self)
    }
}

impl IntoQueryValue for chrono::DateTime<chrono::Utc> {
    fn into_query_value(self) -> Value {
        Value::DateTime(self)
    }
}

impl IntoQueryValue for chrono::NaiveDateTime {
    fn into_query_value(self) -> Value {
        Value::LocalDateTime(self)
    }
}

impl IntoQueryValue for chrono::NaiveDate {
    fn into_query_value(self) -> Value {
        Value::Date(self)
    }
}
