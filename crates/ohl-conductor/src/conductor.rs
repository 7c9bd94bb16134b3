//! Conductor records and their builder.

use crate::Category;

/// Physical description of one bare overhead conductor.
///
/// All quantities are plain `f64` in the documented units; the solver
/// crates check the subset of fields their formulas rely on.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Conductor {
    /// Display name
    pub name: String,
    /// Owning category
    pub category: Category,
    /// Outer diameter [mm]
    pub diameter: f64,
    /// Cross-section area [mm²]
    pub area: f64,
    /// Weight per unit length [kg/m]
    pub weight: f64,
    /// Rated strength [kg]
    pub strength: f64,
    /// Resistance at 25 °C [Ω/km]
    pub r25: f64,
    /// Heat capacity [kcal/(ft·°C)]
    pub heat_capacity: f64,
    /// Optional external key
    pub code: Option<String>,
}

/// Mutable builder producing immutable [`Conductor`] values.
///
/// Fields left unset default to zero; only the fields a given solver uses
/// need to be filled in.
#[derive(Debug, Clone)]
pub struct ConductorBuilder {
    name: String,
    category: Category,
    diameter: f64,
    area: f64,
    weight: f64,
    strength: f64,
    r25: f64,
    heat_capacity: f64,
    code: Option<String>,
}

impl ConductorBuilder {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
            diameter: 0.0,
            area: 0.0,
            weight: 0.0,
            strength: 0.0,
            r25: 0.0,
            heat_capacity: 0.0,
            code: None,
        }
    }

    /// Outer diameter [mm].
    pub fn diameter(mut self, v: f64) -> Self {
        self.diameter = v;
        self
    }

    /// Cross-section area [mm²].
    pub fn area(mut self, v: f64) -> Self {
        self.area = v;
        self
    }

    /// Weight per unit length [kg/m].
    pub fn weight(mut self, v: f64) -> Self {
        self.weight = v;
        self
    }

    /// Rated strength [kg].
    pub fn strength(mut self, v: f64) -> Self {
        self.strength = v;
        self
    }

    /// Resistance at 25 °C [Ω/km].
    pub fn r25(mut self, v: f64) -> Self {
        self.r25 = v;
        self
    }

    /// Heat capacity [kcal/(ft·°C)].
    pub fn heat_capacity(mut self, v: f64) -> Self {
        self.heat_capacity = v;
        self
    }

    /// External key.
    pub fn code(mut self, v: impl Into<String>) -> Self {
        self.code = Some(v.into());
        self
    }

    /// Freeze into an immutable record.
    pub fn build(self) -> Conductor {
        Conductor {
            name: self.name,
            category: self.category,
            diameter: self.diameter,
            area: self.area,
            weight: self.weight,
            strength: self.strength,
            r25: self.r25,
            heat_capacity: self.heat_capacity,
            code: self.code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_round_trip() {
        let cond = ConductorBuilder::new("AAAC 740,8 MCM FLINT", Category::aaac())
            .diameter(25.17)
            .area(375.4)
            .weight(1.035)
            .strength(11625.0)
            .r25(0.08936)
            .heat_capacity(0.052744)
            .code("FLINT")
            .build();

        assert_eq!(cond.name, "AAAC 740,8 MCM FLINT");
        assert_eq!(cond.category, Category::aaac());
        assert_eq!(cond.diameter, 25.17);
        assert_eq!(cond.area, 375.4);
        assert_eq!(cond.weight, 1.035);
        assert_eq!(cond.strength, 11625.0);
        assert_eq!(cond.r25, 0.08936);
        assert_eq!(cond.heat_capacity, 0.052744);
        assert_eq!(cond.code.as_deref(), Some("FLINT"));
    }

    #[test]
    fn unset_fields_default_to_zero() {
        let cond = ConductorBuilder::new("BARE", Category::copper()).build();
        assert_eq!(cond.diameter, 0.0);
        assert_eq!(cond.strength, 0.0);
        assert_eq!(cond.code, None);
    }
}
