//! Conductor category records and the standard catalog.

/// Material family shared by conductors of similar construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Category {
    /// Display name
    pub name: String,
    /// Modulus of elasticity [kg/mm²]
    pub elastic_modulus: f64,
    /// Coefficient of thermal expansion [1/°C]
    pub thermal_expansion: f64,
    /// Creep allowance, expressed as a temperature offset [°C]
    pub creep: f64,
    /// Temperature coefficient of resistance [1/°C]
    pub alpha: f64,
    /// Optional external key
    pub code: Option<String>,
}

impl Category {
    /// Create a category with no external key.
    pub fn new(
        name: impl Into<String>,
        elastic_modulus: f64,
        thermal_expansion: f64,
        creep: f64,
        alpha: f64,
    ) -> Self {
        Self {
            name: name.into(),
            elastic_modulus,
            thermal_expansion,
            creep,
            alpha,
            code: None,
        }
    }

    fn standard(
        name: &str,
        elastic_modulus: f64,
        thermal_expansion: f64,
        creep: f64,
        alpha: f64,
        code: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            elastic_modulus,
            thermal_expansion,
            creep,
            alpha,
            code: Some(code.to_string()),
        }
    }

    /// Hard-drawn copper.
    pub fn copper() -> Self {
        Self::standard("COPPER", 12_000.0, 0.000_016_9, 0.0, 0.003_74, "CU")
    }

    /// All-aluminium-alloy conductor (also sold as AASC).
    pub fn aaac() -> Self {
        Self::standard("AAAC (AASC)", 6_450.0, 0.000_023_0, 20.0, 0.003_40, "AAAC")
    }

    /// Aluminium conductor, alloy reinforced.
    pub fn acar() -> Self {
        Self::standard("ACAR", 6_450.0, 0.000_025_0, 20.0, 0.003_85, "ACAR")
    }

    /// Aluminium conductor, steel reinforced.
    pub fn acsr() -> Self {
        Self::standard("ACSR", 8_000.0, 0.000_019_1, 20.0, 0.003_95, "ACSR")
    }

    /// All-aluminium conductor.
    pub fn aac() -> Self {
        Self::standard("ALUMINUM", 5_600.0, 0.000_023_0, 20.0, 0.003_95, "AAC")
    }

    /// Copper-clad steel.
    pub fn copperweld() -> Self {
        Self::standard("COPPERWELD", 16_200.0, 0.000_013_0, 0.0, 0.003_80, "CUWELD")
    }

    /// Look up a standard category by its external key.
    ///
    /// Accepts the historical aliases AASC (for AAAC) and ALL (for AAC).
    pub fn by_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "CU" => Some(Self::copper()),
            "AAAC" | "AASC" => Some(Self::aaac()),
            "ACAR" => Some(Self::acar()),
            "ACSR" => Some(Self::acsr()),
            "AAC" | "ALL" => Some(Self::aac()),
            "CUWELD" => Some(Self::copperweld()),
            _ => None,
        }
    }
}
