//! The [`Seekable`] trait: field access for search and sort.

use crate::value::Value;

/// Trait for items that can be searched and sorted by field name.
///
/// [`Record`](crate::Record) implements it over its field map, but any struct
/// can opt in by mapping field names to [`Value`]s.
///
/// ```
/// use reelscan_seeker::{Seekable, Value, Number};
///
/// struct Show {
///     title: String,
///     release_year: i32,
/// }
///
/// impl Seekable for Show {
///     fn seeker_field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "title" => Value::String(&self.title),
///             "release_year" => Value::Number(Number::I64(self.release_year as i64)),
///             _ => Value::Missing,
///         }
///     }
/// }
/// ```
pub trait Seekable {
    /// Returns the value of a field, or [`Value::Missing`] if the item has no
    /// such field.
    fn seeker_field_value(&self, field: &str) -> Value<'_>;
}

impl<T: Seekable + ?Sized> Seekable for &T {
    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        (**self).seeker_field_value(field)
    }
}

impl<T: Seekable + ?Sized> Seekable for Box<T> {
    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        (**self).seeker_field_value(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Number;

    struct Show {
        title: String,
        runtime: i32,
    }

    impl Seekable for Show {
        fn seeker_field_value(&self, field: &str) -> Value<'_> {
            match field {
                "title" => Value::String(&self.title),
                "runtime" => Value::Number(Number::I64(self.runtime as i64)),
                _ => Value::Missing,
            }
        }
    }

    #[test]
    fn manual_impl() {
        let show = Show {
            title: "Blood & Water".to_string(),
            runtime: 45,
        };

        assert_eq!(show.seeker_field_value("title"), Value::String("Blood & Water"));
        assert_eq!(
            show.seeker_field_value("runtime"),
            Value::Number(Number::I64(45))
        );
        assert_eq!(show.seeker_field_value("cast"), Value::Missing);
    }

    #[test]
    fn references_and_boxes_delegate() {
        let show = Show {
            title: "Ganglands".to_string(),
            runtime: 50,
        };
        let by_ref = &show;
        let boxed: Box<Show> = Box::new(Show {
            title: "Ganglands".to_string(),
            runtime: 50,
        });

        assert_eq!(by_ref.seeker_field_value("title"), Value::String("Ganglands"));
        assert_eq!(boxed.seeker_field_value("runtime"), Value::Number(Number::I64(50)));
    }
}
