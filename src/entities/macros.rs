//! Macros for reducing boilerplate when defining records
//!
//! These macros generate the field-addressing `Record` implementation each
//! record type needs so the pipeline can reach its fields by name.

/// Implement [`Record`](crate::core::record::Record) for a struct
///
/// Every listed field is exposed under the given name and converted with
/// `FieldValue::from`. The `id` field must be a `RecordId` and is always
/// exposed as `"id"`. An optional `touch` field is set to the current time
/// whenever a store saves the record.
///
/// # Example
///
/// ```rust,ignore
/// use listview::prelude::*;
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct Ticket {
///     pub id: RecordId,
///     pub subject: String,
///     pub opened_at: DateTime<Utc>,
///     pub edited_at: DateTime<Utc>,
/// }
///
/// impl_record!(
///     Ticket,
///     "tickets",
///     search: ["subject"],
///     fields: {
///         "subject" => subject,
///         "opened_at" => opened_at,
///         "edited_at" => edited_at,
///     },
///     touch: edited_at
/// );
/// ```
#[macro_export]
macro_rules! impl_record {
    (
        $type:ident,
        $resource:expr,
        search: [ $( $search_field:expr ),* $(,)? ],
        fields: { $( $name:literal => $field:ident ),* $(,)? }
        $(, touch: $touched:ident )? $(,)?
    ) => {
        impl $crate::core::record::Record for $type {
            fn resource_name() -> &'static str {
                $resource
            }

            fn search_fields() -> &'static [&'static str] {
                &[ $( $search_field ),* ]
            }

            fn id(&self) -> $crate::core::record::RecordId {
                self.id
            }

            fn set_id(&mut self, id: $crate::core::record::RecordId) {
                self.id = id;
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                match field {
                    "id" => Some($crate::core::field::FieldValue::from(self.id)),
                    $( $name => Some($crate::core::field::FieldValue::from(self.$field.clone())), )*
                    _ => None,
                }
            }

            $(
                fn touch(&mut self, now: ::chrono::DateTime<::chrono::Utc>) {
                    self.$touched = now;
                }
            )?
        }
    };
}
