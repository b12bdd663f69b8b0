use satchel_core::{FieldKind, FromValue, Value};

/// A user-supplied bidirectional mapping between a field's in-memory type
/// and its stored representation.
///
/// Implementations are plain types; a field opts in through
/// [`FieldBinding::converted`](crate::FieldBinding::converted).
pub trait PropertyConverter {
    /// The in-memory field type.
    type Property;

    /// The storage-side type.
    type Stored: Into<Value> + FromValue;

    /// The field kind the stored side is declared as.
    const KIND: FieldKind;

    fn to_stored(property: &Self::Property) -> Self::Stored;

    fn from_stored(stored: Self::Stored) -> Self::Property;
}

/// Stores a `Vec<String>` as comma-joined text.
///
/// The encoding keeps a trailing comma after every element (`["a", "b"]` is
/// stored as `"a,b,"`); decoding splits on commas and drops trailing empty
/// segments, so the pair round-trips.
pub struct CommaListConverter;

impl PropertyConverter for CommaListConverter {
    type Property = Vec<String>;
    type Stored = String;

    const KIND: FieldKind = FieldKind::Text;

    fn to_stored(property: &Self::Property) -> Self::Stored {
        let mut out = String::new();
        for item in property {
            out.push_str(item);
            out.push(',');
        }
        out
    }

    fn from_stored(stored: Self::Stored) -> Self::Property {
        let mut items: Vec<String> = stored.split(',').map(str::to_string).collect();
        while items.last().is_some_and(String::is_empty) {
            items.pop();
        }
        items
    }
}
