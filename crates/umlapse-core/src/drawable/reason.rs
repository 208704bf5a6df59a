use std::fmt;

/// Why an element differs from its previous revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeReason {
    /// No element with this identity existed in the previous revision.
    Created,
    Name,
    Methods,
    Attributes,
    Tail,
    Head,
    Directedness,
    Aggregatedness,
    Multiplicities,
    ParentPackage,
    ContainedElements,
    Subclusters,
}

impl fmt::Display for ChangeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Created => "Created",
            Self::Name => "Name",
            Self::Methods => "Methods",
            Self::Attributes => "Attributes",
            Self::Tail => "Tail",
            Self::Head => "Head",
            Self::Directedness => "Directedness",
            Self::Aggregatedness => "Aggregatedness",
            Self::Multiplicities => "Multiplicities",
            Self::ParentPackage => "Parent package",
            Self::ContainedElements => "Contained elements",
            Self::Subclusters => "Subclusters changed",
        };
        write!(f, "{text}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ChangeReason::Created.to_string(), "Created");
        assert_eq!(ChangeReason::ParentPackage.to_string(), "Parent package");
        assert_eq!(ChangeReason::Subclusters.to_string(), "Subclusters changed");
    }
}
