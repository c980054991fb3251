use serde::Serialize;

pub mod stock;

/// A provider field that may be missing, present but empty, or populated.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(tag = "presence", content = "items", rename_all = "snake_case")]
pub enum Presence<T> {
    #[default]
    Absent,
    Empty,
    Populated(T),
}

impl<T> Presence<Vec<T>> {
    pub fn from_items(items: Vec<T>) -> Self {
        if items.is_empty() {
            Self::Empty
        } else {
            Self::Populated(items)
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Populated(items) => items,
            Self::Absent | Self::Empty => vec![],
        }
    }
}

impl<T> Presence<T> {
    pub fn is_populated(&self) -> bool {
        matches!(self, Self::Populated(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_from_items() {
        assert_eq!(Presence::<Vec<u32>>::from_items(vec![]), Presence::Empty);
        assert_eq!(Presence::from_items(vec![1, 2]), Presence::Populated(vec![1, 2]));
        assert!(Presence::from_items(vec![1]).is_populated());
        assert!(!Presence::<Vec<u32>>::Absent.is_populated());
    }

    #[test]
    fn test_presence_into_items() {
        assert!(Presence::<Vec<u32>>::Absent.into_items().is_empty());
        assert!(Presence::<Vec<u32>>::Empty.into_items().is_empty());
        assert_eq!(Presence::Populated(vec![3]).into_items(), vec![3]);
    }
}
