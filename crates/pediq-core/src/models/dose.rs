use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Measurement unit for a computed dose or volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Mg,
    G,
    Mcg,
    Ml,
    MlPerHour,
    MlPerDay,
    MEq,
    Units,
    UnitsPerHour,
    McgPerKgPerMin,
    Joules,
    Mm,
    Cm,
    Puffs,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Mg => "mg",
            Unit::G => "g",
            Unit::Mcg => "mcg",
            Unit::Ml => "mL",
            Unit::MlPerHour => "mL/h",
            Unit::MlPerDay => "mL/day",
            Unit::MEq => "mEq",
            Unit::Units => "U",
            Unit::UnitsPerHour => "U/h",
            Unit::McgPerKgPerMin => "mcg/kg/min",
            Unit::Joules => "J",
            Unit::Mm => "mm",
            Unit::Cm => "cm",
            Unit::Puffs => "puffs",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Administration route, in the abbreviated form clinicians read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Intravenous,
    Intramuscular,
    Oral,
    Nebulized,
    Inhaled,
    Subcutaneous,
    Intraosseous,
    Rectal,
}

impl Route {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Route::Intravenous => "IV",
            Route::Intramuscular => "IM",
            Route::Oral => "PO",
            Route::Nebulized => "NEB",
            Route::Inhaled => "INH",
            Route::Subcutaneous => "SC",
            Route::Intraosseous => "IO",
            Route::Rectal => "PR",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// One computed dose, volume, or equipment size.
///
/// `amount` is already rounded and clamped by the rule that produced it and
/// is never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Dose {
    pub label: String,
    pub amount: f64,
    pub unit: Unit,
    pub route: Option<Route>,
    pub note: Option<String>,
}

impl Dose {
    pub fn new(label: impl Into<String>, amount: f64, unit: Unit) -> Self {
        Self {
            label: label.into(),
            amount,
            unit,
            route: None,
            note: None,
        }
    }

    pub fn via(mut self, route: Route) -> Self {
        self.route = Some(route);
        self
    }

    pub fn noting(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl std::fmt::Display for Dose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} {}", self.label, self.amount, self.unit)?;
        if let Some(route) = self.route {
            write!(f, " {route}")?;
        }
        if let Some(note) = &self.note {
            write!(f, " ({note})")?;
        }
        Ok(())
    }
}
