use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Tri-state field of a partial update
///
/// | JSON            | Value             |
/// |-----------------|-------------------|
/// | field absent    | `Patch::Unchanged` |
/// | `null`          | `Patch::Clear`     |
/// | any other value | `Patch::Set(v)`    |
///
/// The absent case only works when the field carries `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Unchanged,
    Clear,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Unchanged
    }
}

impl<T> Patch<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Patch::Unchanged)
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(value) => Some(value),
            _ => None,
        }
    }

    /// Apply to a stored value; `Clear` leaves it untouched and reports `false`.
    pub fn apply_to(self, target: &mut T) -> bool {
        match self {
            Patch::Set(value) => {
                *target = value;
                true
            }
            Patch::Unchanged => true,
            Patch::Clear => false,
        }
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Set(value) => value.serialize(serializer),
            Patch::Unchanged | Patch::Clear => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Set(value),
            None => Patch::Clear,
        })
    }
}
