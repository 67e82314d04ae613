//! Load categories of SNI 1727:2020 Pasal 2.3
//!
//! Serialized by their combination symbol (`"D"`, `"L"`, `"Lr"`, ...), the
//! same way the factors are written in the combination equations.

use serde::{Deserialize, Serialize};

/// Load category in the strength design combinations.
///
/// ```
/// use sni_core::loads::LoadType;
///
/// assert_eq!(LoadType::from_code("Lr"), Some(LoadType::LiveRoof));
/// assert_eq!(LoadType::Seismic.indonesian_name(), "Beban gempa");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LoadType {
    /// Self-weight plus superimposed permanent load
    #[serde(rename = "D")]
    Dead,
    #[serde(rename = "L")]
    Live,
    #[serde(rename = "Lr")]
    LiveRoof,
    /// Ponding rain on the roof
    #[serde(rename = "R")]
    Rain,
    #[serde(rename = "W")]
    Wind,
    #[serde(rename = "E")]
    Seismic,
}

impl LoadType {
    pub const ALL: [LoadType; 6] = [
        LoadType::Dead,
        LoadType::Live,
        LoadType::LiveRoof,
        LoadType::Rain,
        LoadType::Wind,
        LoadType::Seismic,
    ];

    /// Symbol used in the combination equations
    pub fn code(&self) -> &'static str {
        match self {
            LoadType::Dead => "D",
            LoadType::Live => "L",
            LoadType::LiveRoof => "Lr",
            LoadType::Rain => "R",
            LoadType::Wind => "W",
            LoadType::Seismic => "E",
        }
    }

    /// Parse a combination symbol. Case-sensitive: `L` and `Lr` differ only by suffix.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lt| lt.code() == code.trim())
    }

    /// Term used in SNI 1727 (Bahasa Indonesia)
    pub fn indonesian_name(&self) -> &'static str {
        match self {
            LoadType::Dead => "Beban mati",
            LoadType::Live => "Beban hidup",
            LoadType::LiveRoof => "Beban hidup atap",
            LoadType::Rain => "Beban hujan",
            LoadType::Wind => "Beban angin",
            LoadType::Seismic => "Beban gempa",
        }
    }

    /// Acts on the floor/roof area rather than laterally on the frame
    pub fn is_gravity(&self) -> bool {
        !self.is_lateral()
    }

    pub fn is_lateral(&self) -> bool {
        matches!(self, LoadType::Wind | LoadType::Seismic)
    }
}

impl std::fmt::Display for LoadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_parse_back() {
        for lt in LoadType::ALL {
            assert_eq!(LoadType::from_code(lt.code()), Some(lt));
        }
        assert_eq!(LoadType::from_code("l"), None);
        assert_eq!(LoadType::from_code("S"), None);
    }

    #[test]
    fn test_gravity_and_lateral_partition() {
        assert!(LoadType::Dead.is_gravity());
        assert!(LoadType::Rain.is_gravity());
        assert!(LoadType::Wind.is_lateral());
        assert!(!LoadType::Seismic.is_gravity());
    }

    #[test]
    fn test_serializes_as_symbol() {
        assert_eq!(serde_json::to_string(&LoadType::LiveRoof).unwrap(), "\"Lr\"");
        let parsed: LoadType = serde_json::from_str("\"E\"").unwrap();
        assert_eq!(parsed, LoadType::Seismic);
    }
}
