use serde::{Deserialize, Serialize};

/// Kind of a resolved media record, serialized as `"movie"` or `"tv"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    #[serde(rename = "movie")]
    Movie,
    #[serde(rename = "tv")]
    Series,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "tv",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_wire_names() {
        assert_eq!(serde_json::to_value(MediaKind::Movie).unwrap(), "movie");
        assert_eq!(serde_json::to_value(MediaKind::Series).unwrap(), "tv");
        assert_eq!(MediaKind::Series.to_string(), "tv");
    }
}
